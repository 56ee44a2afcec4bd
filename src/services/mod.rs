pub mod export;
pub mod extractor;
pub mod llm_client;
pub mod prompt_builder;
pub mod quiz_service;
pub mod response_parser;

pub use llm_client::{LlmClient, OpenAiLlmClient};
pub use quiz_service::{GenerationSettings, QuizService};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// A hosted chat-completion model.
///
/// One call is one request: no retries, no backoff, and no timeout beyond the
/// HTTP client's default. Transport, auth and quota failures come back as
/// `AppError::LlmRequestError` carrying the provider's message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> AppResult<String>;
}

pub struct OpenAiLlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl OpenAiLlmClient {
    pub fn new(config: &Config) -> Self {
        let mut openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());
        if let Some(api_base) = &config.openai_api_base {
            openai_config = openai_config.with_api_base(api_base);
        }

        Self {
            client: Client::with_config(openai_config),
            model_name: config.model_name.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl LlmClient for OpenAiLlmClient {
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> AppResult<String> {
        log::debug!(
            "Calling model {} with a {} character prompt",
            self.model_name,
            prompt.len()
        );

        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_message)])
            .temperature(temperature)
            .max_tokens(max_tokens)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            log::error!("Model {} request failed: {}", self.model_name, e);
            AppError::LlmRequestError(e.to_string())
        })?;

        if let Some(usage) = &response.usage {
            match estimated_cost_usd(&self.model_name, usage.prompt_tokens, usage.completion_tokens) {
                Some(cost) => log::info!(
                    "Token usage for {}: prompt={} completion={} total={} cost=${:.6}",
                    self.model_name,
                    usage.prompt_tokens,
                    usage.completion_tokens,
                    usage.total_tokens,
                    cost
                ),
                None => log::info!(
                    "Token usage for {}: prompt={} completion={} total={}",
                    self.model_name,
                    usage.prompt_tokens,
                    usage.completion_tokens,
                    usage.total_tokens
                ),
            }
        }

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AppError::LlmRequestError(format!("model {} returned no content", self.model_name))
            })
    }
}

/// USD per million prompt and completion tokens, matched by model name
/// prefix. More specific prefixes come first.
const MODEL_PRICES: &[(&str, f64, f64)] = &[
    ("gpt-4o-mini", 0.15, 0.60),
    ("gpt-4o", 2.50, 10.00),
    ("gpt-4-turbo", 10.00, 30.00),
    ("gpt-4", 30.00, 60.00),
    ("gpt-3.5-turbo", 0.50, 1.50),
];

/// Estimated price of one call, or `None` for a model without a known price.
pub fn estimated_cost_usd(model_name: &str, prompt_tokens: u32, completion_tokens: u32) -> Option<f64> {
    MODEL_PRICES
        .iter()
        .find(|(prefix, _, _)| model_name.starts_with(prefix))
        .map(|(_, prompt_price, completion_price)| {
            (prompt_tokens as f64 * prompt_price + completion_tokens as f64 * completion_price)
                / 1_000_000.0
        })
}

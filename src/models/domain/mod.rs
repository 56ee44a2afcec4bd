pub mod document;
pub mod quiz;
pub mod quiz_question;
pub use document::{GenerationRequest, SourceDocument, SourceFormat};
pub use quiz::{DroppedRecord, ParsedQuiz, QuestionTable};
pub use quiz_question::{ChoiceLabel, QuestionRecord};

pub mod request;
pub mod response;
pub use request::{ExportRequest, GenerationParams};
pub use response::{QuizRunResponse, ReviewOutcome};

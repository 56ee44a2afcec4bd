use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::QuestionTable;

/// User-supplied knobs of a generation run, read from the upload form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerationParams {
    #[validate(range(min = 1, max = 50, message = "question count must be between 1 and 50"))]
    pub question_count: u32,

    #[validate(length(min = 1, max = 20, message = "subject must be 1 to 20 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 20, message = "tone must be 1 to 20 characters"))]
    pub tone: String,
}

impl GenerationParams {
    pub fn new(question_count: u32, subject: &str, tone: &str) -> Self {
        Self {
            question_count,
            subject: subject.trim().to_string(),
            tone: tone.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportRequest {
    pub questions: QuestionTable,
}

impl ExportRequest {
    /// Re-checks every row, since the table comes back from the browser.
    pub fn into_table(self) -> AppResult<QuestionTable> {
        for (index, record) in self.questions.iter().enumerate() {
            record
                .validate()
                .map_err(|reason| AppError::ValidationError(format!("row {}: {}", index + 1, reason)))?;
        }
        Ok(self.questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::sample_table;
    use validator::Validate;

    #[test]
    fn test_valid_generation_params() {
        let params = GenerationParams::new(5, "Geography", "Simple");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_question_count_out_of_range() {
        assert!(GenerationParams::new(0, "Geography", "Simple").validate().is_err());
        assert!(GenerationParams::new(51, "Geography", "Simple").validate().is_err());
    }

    #[test]
    fn test_subject_is_trimmed_before_validation() {
        let params = GenerationParams::new(3, "   ", "Simple");
        assert!(params.subject.is_empty());
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_tone_too_long() {
        let params = GenerationParams::new(3, "Geography", "extraordinarily difficult");
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_export_request_accepts_valid_table() {
        let request = ExportRequest {
            questions: sample_table(),
        };
        assert_eq!(request.into_table().unwrap().len(), 2);
    }

    #[test]
    fn test_export_request_rejects_inconsistent_row() {
        let json = r#"{"questions": [
            {"question": "Q?", "choices": {"A": "x", "B": "y"}, "correct": "C"}
        ]}"#;
        let request: ExportRequest = serde_json::from_str(json).unwrap();

        let err = request.into_table().unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{DroppedRecord, ParsedQuiz, QuestionTable};

/// What happened to the second, reviewing model call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReviewOutcome {
    Reviewed { feedback: String },
    Failed { error: String },
    Skipped,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizRunResponse {
    pub source_file: String,
    pub requested_count: u32,
    pub questions: QuestionTable,
    pub dropped_count: usize,
    pub dropped: Vec<DroppedRecord>,
    pub review: ReviewOutcome,
    pub generated_at: DateTime<Utc>,
}

impl QuizRunResponse {
    pub fn new(
        source_file: String,
        requested_count: u32,
        parsed: ParsedQuiz,
        review: ReviewOutcome,
    ) -> Self {
        QuizRunResponse {
            source_file,
            requested_count,
            dropped_count: parsed.dropped.len(),
            questions: parsed.table,
            dropped: parsed.dropped,
            review,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::sample_table;

    #[test]
    fn test_review_outcome_is_tagged_by_status() {
        let reviewed = serde_json::to_value(ReviewOutcome::Reviewed {
            feedback: "PASS".to_string(),
        })
        .unwrap();
        assert_eq!(reviewed["status"], "reviewed");
        assert_eq!(reviewed["feedback"], "PASS");

        let skipped = serde_json::to_value(ReviewOutcome::Skipped).unwrap();
        assert_eq!(skipped, serde_json::json!({ "status": "skipped" }));
    }

    #[test]
    fn test_run_response_reports_dropped_count() {
        let parsed = ParsedQuiz {
            table: sample_table(),
            dropped: vec![DroppedRecord {
                key: "3".to_string(),
                reason: "choice E".to_string(),
            }],
        };

        let response = QuizRunResponse::new("notes.txt".to_string(), 3, parsed, ReviewOutcome::Skipped);

        assert_eq!(response.dropped_count, 1);
        assert_eq!(response.questions.len(), 2);
        assert_eq!(response.requested_count, 3);
    }
}

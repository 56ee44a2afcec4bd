#[cfg(test)]
pub mod fixtures {
    use std::collections::BTreeMap;

    use crate::models::{
        domain::{
            ChoiceLabel, GenerationRequest, QuestionRecord, QuestionTable, SourceDocument,
            SourceFormat,
        },
        dto::GenerationParams,
    };

    pub const PARIS_TEXT: &str = "Paris is the capital of France.";

    pub const PARIS_REPLY: &str = r#"{"1": {"question": "What is the capital of France?", "choices": {"A":"Paris","B":"London","C":"Berlin","D":"Madrid"}, "correct": "A"}}"#;

    fn choices(pairs: [(ChoiceLabel, &str); 4]) -> BTreeMap<ChoiceLabel, String> {
        pairs
            .into_iter()
            .map(|(label, text)| (label, text.to_string()))
            .collect()
    }

    /// The question `PARIS_REPLY` parses to.
    pub fn paris_question() -> QuestionRecord {
        QuestionRecord {
            question: "What is the capital of France?".to_string(),
            choices: choices([
                (ChoiceLabel::A, "Paris"),
                (ChoiceLabel::B, "London"),
                (ChoiceLabel::C, "Berlin"),
                (ChoiceLabel::D, "Madrid"),
            ]),
            correct: ChoiceLabel::A,
        }
    }

    pub fn sample_table() -> QuestionTable {
        QuestionTable::from(vec![
            paris_question(),
            QuestionRecord {
                question: "Which river flows through Paris?".to_string(),
                choices: choices([
                    (ChoiceLabel::A, "Thames"),
                    (ChoiceLabel::B, "Seine"),
                    (ChoiceLabel::C, "Danube"),
                    (ChoiceLabel::D, "Rhine"),
                ]),
                correct: ChoiceLabel::B,
            },
        ])
    }

    pub fn paris_request() -> GenerationRequest {
        GenerationRequest::new(PARIS_TEXT.to_string(), 1, "Geography", "Simple")
    }

    pub fn paris_document() -> SourceDocument {
        SourceDocument::new("paris.txt", SourceFormat::Text, PARIS_TEXT.as_bytes().to_vec())
    }

    pub fn paris_params() -> GenerationParams {
        GenerationParams::new(1, "Geography", "Simple")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    pub const BOUNDARY: &str = "mcq-test-boundary";

    /// A part of a multipart/form-data body.
    pub struct FormPart<'a> {
        pub name: &'a str,
        pub file_name: Option<&'a str>,
        pub content_type: Option<&'a str>,
        pub data: &'a [u8],
    }

    impl<'a> FormPart<'a> {
        pub fn text(name: &'a str, value: &'a str) -> Self {
            Self {
                name,
                file_name: None,
                content_type: None,
                data: value.as_bytes(),
            }
        }

        pub fn file(file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
            Self {
                name: "file",
                file_name: Some(file_name),
                content_type: Some(content_type),
                data,
            }
        }
    }

    pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part.file_name {
                Some(file_name) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, file_name
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                        .as_bytes(),
                ),
            }
            if let Some(content_type) = part.content_type {
                body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    pub fn multipart_content_type() -> String {
        format!("multipart/form-data; boundary={}", BOUNDARY)
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::test_helpers::*;

    #[test]
    fn test_fixtures_paris_question_is_valid() {
        let question = paris_question();
        assert!(question.validate().is_ok());
        assert_eq!(question.correct_choice(), Some("Paris"));
    }

    #[test]
    fn test_fixtures_sample_table() {
        let table = sample_table();
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.validate().is_ok()));
    }

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body(&[
            FormPart::text("subject", "Geography"),
            FormPart::file("paris.txt", "text/plain", PARIS_TEXT.as_bytes()),
        ]);
        let body = String::from_utf8(body).unwrap();

        assert!(body.starts_with("--mcq-test-boundary\r\n"));
        assert!(body.contains("name=\"file\"; filename=\"paris.txt\""));
        assert!(body.ends_with("--mcq-test-boundary--\r\n"));
    }
}

use std::path::Path;

use serde::Serialize;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Pdf,
    Text,
}

impl SourceFormat {
    /// Infers the format from the uploaded file name, falling back to the
    /// declared MIME type only when the name carries no extension.
    pub fn from_upload(file_name: &str, content_type: Option<&str>) -> AppResult<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(SourceFormat::Pdf),
            Some("txt") => Ok(SourceFormat::Text),
            Some(other) => Err(AppError::UnsupportedFormat(format!(
                "'.{}' files are not supported; upload a PDF or .txt file",
                other
            ))),
            None => {
                let essence = content_type
                    .and_then(|ct| ct.split(';').next())
                    .map(|ct| ct.trim().to_ascii_lowercase());
                match essence.as_deref() {
                    Some("application/pdf") => Ok(SourceFormat::Pdf),
                    Some("text/plain") => Ok(SourceFormat::Text),
                    _ => Err(AppError::UnsupportedFormat(format!(
                        "cannot tell the format of '{}'; upload a PDF or .txt file",
                        file_name
                    ))),
                }
            }
        }
    }
}

/// An uploaded file. Dropped as soon as its text has been extracted.
#[derive(Clone, Debug)]
pub struct SourceDocument {
    pub file_name: String,
    pub format: SourceFormat,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(file_name: impl Into<String>, format: SourceFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            bytes,
        }
    }
}

/// Everything one pipeline run needs to build its prompts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub text: String,
    pub question_count: u32,
    pub subject: String,
    pub tone: String,
}

impl GenerationRequest {
    pub fn new(
        text: String,
        question_count: u32,
        subject: impl Into<String>,
        tone: impl Into<String>,
    ) -> Self {
        Self {
            text,
            question_count,
            subject: subject.into(),
            tone: tone.into(),
        }
    }
}

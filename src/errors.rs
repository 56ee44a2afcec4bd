use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Extraction error: {0}")]
    ExtractionError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("LLM request error: {0}")]
    LlmRequestError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            AppError::DecodeError(_) => "DECODE_ERROR",
            AppError::ExtractionError(_) => "EXTRACTION_ERROR",
            AppError::TemplateError(_) => "TEMPLATE_ERROR",
            AppError::LlmRequestError(_) => "LLM_REQUEST_ERROR",
            AppError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::DecodeError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ExtractionError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::TemplateError(_) => StatusCode::BAD_REQUEST,
            AppError::LlmRequestError(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::LlmRequestError(err.to_string())
    }
}
impl From<std::str::Utf8Error> for AppError {
    fn from(err: std::str::Utf8Error) -> Self {
        AppError::DecodeError(format!("uploaded text is not valid UTF-8: {}", err))
    }
}
impl From<lopdf::Error> for AppError {
    fn from(err: lopdf::Error) -> Self {
        AppError::ExtractionError(format!("unreadable PDF: {}", err))
    }
}
impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::InternalError(format!("CSV serialization error: {}", err))
    }
}
impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::ValidationError(format!("invalid upload: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::UnsupportedFormat("docx".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            AppError::TemplateError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::LlmRequestError("quota".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::MalformedResponse("test".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::ExtractionError("test".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::UnsupportedFormat("report.docx".into());
        assert_eq!(err.to_string(), "Unsupported format: report.docx");
    }

    #[test]
    fn test_utf8_error_becomes_decode_error() {
        let bytes = vec![0xff, 0xfe, 0x41];
        let err: AppError = std::str::from_utf8(&bytes).unwrap_err().into();
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }

    #[actix_web::test]
    async fn test_error_response_body_carries_kind() {
        let resp = AppError::MalformedResponse("expected value".into()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["kind"], "MALFORMED_RESPONSE");
        assert_eq!(json["code"], 502);
    }
}

use std::env;
use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_api_base: Option<String>,
    pub model_name: String,
    pub temperature: f32,
    pub generation_max_tokens: u32,
    pub review_max_tokens: u32,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub max_upload_bytes: usize,
    pub log_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE").ok().filter(|v| !v.trim().is_empty()),
            model_name: env::var("LLM_MODEL_NAME").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            temperature: env::var("LLM_TEMPERATURE")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(0.3),
            generation_max_tokens: env::var("GENERATION_MAX_TOKENS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(2048),
            review_max_tokens: env::var("REVIEW_MAX_TOKENS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(1024),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
            log_dir: env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
        }
    }

    /// Rejects configurations the server cannot start with.
    pub fn validate(&self) -> AppResult<()> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "OPENAI_API_KEY is not set. Add it to the environment or a .env file.".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::ValidationError(format!(
                "LLM_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.generation_max_tokens == 0 || self.review_max_tokens == 0 {
            return Err(AppError::ValidationError(
                "GENERATION_MAX_TOKENS and REVIEW_MAX_TOKENS must be positive".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: None,
            model_name: "gpt-3.5-turbo".to_string(),
            temperature: 0.3,
            generation_max_tokens: 2048,
            review_max_tokens: 1024,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            max_upload_bytes: 1024 * 1024,
            log_dir: None,
        }
    }
}

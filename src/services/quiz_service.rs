use std::sync::Arc;

use validator::Validate;

use crate::{
    config::Config,
    errors::AppResult,
    models::{
        domain::{GenerationRequest, ParsedQuiz, QuestionTable, SourceDocument},
        dto::{GenerationParams, QuizRunResponse, ReviewOutcome},
    },
    services::{extractor, llm_client::LlmClient, prompt_builder, response_parser},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub generation_max_tokens: u32,
    pub review_max_tokens: u32,
}

impl From<&Config> for GenerationSettings {
    fn from(config: &Config) -> Self {
        Self {
            temperature: config.temperature,
            generation_max_tokens: config.generation_max_tokens,
            review_max_tokens: config.review_max_tokens,
        }
    }
}

/// Runs extract → generate → parse → review for one upload.
pub struct QuizService {
    llm_client: Arc<dyn LlmClient>,
    settings: GenerationSettings,
}

impl QuizService {
    pub fn new(llm_client: Arc<dyn LlmClient>, settings: GenerationSettings) -> Self {
        Self {
            llm_client,
            settings,
        }
    }

    pub async fn run(
        &self,
        document: SourceDocument,
        params: GenerationParams,
    ) -> AppResult<QuizRunResponse> {
        params.validate()?;

        log::info!(
            "Extracting text from '{}' ({:?}, {} bytes)",
            document.file_name,
            document.format,
            document.bytes.len()
        );
        let text = extractor::extract_text(&document)?;
        let source_file = document.file_name;

        let request = GenerationRequest::new(
            text,
            params.question_count,
            params.subject,
            params.tone,
        );
        let parsed = self.generate(&request).await?;
        let review = self.review(&request, &parsed.table).await;

        Ok(QuizRunResponse::new(
            source_file,
            request.question_count,
            parsed,
            review,
        ))
    }

    pub async fn generate(&self, request: &GenerationRequest) -> AppResult<ParsedQuiz> {
        let prompt = prompt_builder::generation_prompt(request)?;

        log::info!(
            "Generating {} MCQs for '{}' students in '{}' tone",
            request.question_count,
            request.subject,
            request.tone
        );
        let raw = self
            .llm_client
            .complete(
                &prompt,
                self.settings.generation_max_tokens,
                self.settings.temperature,
            )
            .await
            .inspect_err(|e| log::error!("Generation failed: {}", e))?;

        let parsed = response_parser::parse_generation_response(&raw)
            .inspect_err(|e| log::error!("Generation reply rejected: {}", e))?;

        if parsed.table.len() != request.question_count as usize {
            log::warn!(
                "Requested {} questions, model returned {} usable",
                request.question_count,
                parsed.table.len()
            );
        }
        log::info!(
            "Generated {} questions ({} dropped)",
            parsed.table.len(),
            parsed.dropped_count()
        );

        Ok(parsed)
    }

    /// A failed review never discards the table it was reviewing.
    pub async fn review(&self, request: &GenerationRequest, table: &QuestionTable) -> ReviewOutcome {
        if table.is_empty() {
            log::info!("Skipping review: no questions to review");
            return ReviewOutcome::Skipped;
        }

        let prompt = match prompt_builder::review_prompt(&request.subject, &request.text, table) {
            Ok(prompt) => prompt,
            Err(e) => return ReviewOutcome::Failed { error: e.to_string() },
        };

        log::info!("Reviewing {} questions", table.len());
        match self
            .llm_client
            .complete(
                &prompt,
                self.settings.review_max_tokens,
                self.settings.temperature,
            )
            .await
        {
            Ok(feedback) => ReviewOutcome::Reviewed {
                feedback: feedback.trim().to_string(),
            },
            Err(e) => {
                log::error!("Review failed: {}", e);
                ReviewOutcome::Failed { error: e.to_string() }
            }
        }
    }
}

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::{
    constants::prompts::{QUIZ_GENERATION_PROMPT, QUIZ_REVIEW_PROMPT, RESPONSE_JSON},
    errors::{AppError, AppResult},
    models::domain::{GenerationRequest, QuestionTable},
    services::response_parser::{to_raw_quiz, RawQuestion},
};

static RESPONSE_SCHEMA: Lazy<String> = Lazy::new(|| {
    let schema = schemars::schema_for!(BTreeMap<String, RawQuestion>);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
});

pub fn generation_prompt(request: &GenerationRequest) -> AppResult<String> {
    require("text", &request.text)?;
    require("subject", &request.subject)?;
    require("tone", &request.tone)?;
    if request.question_count == 0 {
        return Err(AppError::TemplateError(
            "question count must be at least 1".to_string(),
        ));
    }

    let number = request.question_count.to_string();
    render(
        QUIZ_GENERATION_PROMPT,
        &[
            ("text", request.text.as_str()),
            ("number", number.as_str()),
            ("subject", request.subject.as_str()),
            ("tone", request.tone.as_str()),
            ("response_json", RESPONSE_JSON.trim()),
            ("response_schema", RESPONSE_SCHEMA.as_str()),
        ],
    )
}

pub fn review_prompt(subject: &str, text: &str, table: &QuestionTable) -> AppResult<String> {
    require("subject", subject)?;
    require("text", text)?;
    if table.is_empty() {
        return Err(AppError::TemplateError(
            "there are no questions to review".to_string(),
        ));
    }

    let quiz = serde_json::to_string_pretty(&to_raw_quiz(table))
        .map_err(|e| AppError::InternalError(format!("failed to render quiz: {}", e)))?;

    render(
        QUIZ_REVIEW_PROMPT,
        &[("subject", subject), ("text", text), ("quiz", quiz.as_str())],
    )
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::TemplateError(format!(
            "required prompt field '{}' is empty",
            field
        )));
    }
    Ok(())
}

/// Substitutes `{name}` placeholders in a single pass, so braces inside the
/// substituted values are never expanded again.
fn render(template: &str, vars: &[(&str, &str)]) -> AppResult<String> {
    let extra: usize = vars.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let placeholder = after
            .find('}')
            .map(|close| &after[..close])
            .filter(|name| is_placeholder_name(name));

        match placeholder {
            Some(name) => {
                let value = vars
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| {
                        AppError::TemplateError(format!("no value for placeholder '{}'", name))
                    })?;
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

use std::{collections::BTreeMap, fmt, marker::PhantomData};

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{
    errors::{AppError, AppResult},
    logging::truncate_text,
    models::domain::{ChoiceLabel, DroppedRecord, ParsedQuiz, QuestionRecord, QuestionTable},
};

/// A JSON object read as its entries in document order.
///
/// Repeated keys are kept, so a reply that names the same question or choice
/// twice can be reported instead of silently collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries<V>(pub Vec<(String, V)>);

impl<V: Serialize> Serialize for Entries<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// One question exactly as the model is asked to write it.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RawQuestion {
    /// The question text.
    pub question: String,
    /// Choice label (A, B, C or D) to choice text.
    #[schemars(with = "BTreeMap<String, String>")]
    pub choices: Entries<String>,
    /// Label of the correct choice.
    pub correct: String,
}

/// Question number to question, in the order the model wrote them.
pub type RawQuiz = IndexMap<String, RawQuestion>;

/// Parses a generation reply into a question table.
///
/// The reply must be a JSON object keyed by question index; anything else,
/// including a repeated index, is a `MalformedResponse` and yields no records
/// at all. Records that parse but break an invariant are dropped and reported
/// in `ParsedQuiz::dropped`.
pub fn parse_generation_response(raw: &str) -> AppResult<ParsedQuiz> {
    let trimmed = raw.trim();
    let entries: Entries<RawQuestion> = serde_json::from_str(trimmed).map_err(|e| {
        AppError::MalformedResponse(format!(
            "model reply is not the requested JSON object ({}); reply began with: {}",
            e,
            truncate_text(trimmed, 120)
        ))
    })?;
    let quiz = unique_questions(entries)?;

    let mut parsed = ParsedQuiz::default();
    for (key, question) in quiz {
        match build_record(question) {
            Ok(record) => parsed.table.push(record),
            Err(reason) => {
                log::warn!("Dropping generated question {}: {}", key, reason);
                parsed.dropped.push(DroppedRecord { key, reason });
            }
        }
    }

    Ok(parsed)
}

fn unique_questions(entries: Entries<RawQuestion>) -> AppResult<RawQuiz> {
    let mut quiz = RawQuiz::with_capacity(entries.0.len());
    for (key, question) in entries.0 {
        if quiz.contains_key(&key) {
            return Err(AppError::MalformedResponse(format!(
                "question index '{}' appears more than once in the model reply",
                key
            )));
        }
        quiz.insert(key, question);
    }
    Ok(quiz)
}

fn build_record(raw: RawQuestion) -> Result<QuestionRecord, String> {
    let mut choices = BTreeMap::new();
    for (label, text) in raw.choices.0 {
        let label: ChoiceLabel = label.parse().map_err(|e| format!("choice {}", e))?;
        if choices.insert(label, text.trim().to_string()).is_some() {
            return Err(format!("choice label {} appears more than once", label));
        }
    }

    let correct: ChoiceLabel = raw
        .correct
        .parse()
        .map_err(|e| format!("correct {}", e))?;

    QuestionRecord::new(raw.question.trim(), choices, correct)
}

/// Renders a table back into the reply shape, keyed "1", "2", ...
pub fn to_raw_quiz(table: &QuestionTable) -> RawQuiz {
    table
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let question = RawQuestion {
                question: record.question.clone(),
                choices: Entries(
                    record
                        .choices
                        .iter()
                        .map(|(label, text)| (label.to_string(), text.clone()))
                        .collect(),
                ),
                correct: record.correct.to_string(),
            };
            ((index + 1).to_string(), question)
        })
        .collect()
}

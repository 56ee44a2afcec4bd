use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::QuestionRecord;

/// Generated questions in the order the model produced them.
///
/// The length may differ from the requested count; the model is free to
/// under- or over-produce.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct QuestionTable {
    questions: Vec<QuestionRecord>,
}

impl QuestionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: QuestionRecord) {
        self.questions.push(record);
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionRecord> {
        self.questions.iter()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }
}

impl From<Vec<QuestionRecord>> for QuestionTable {
    fn from(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }
}

impl<'a> IntoIterator for &'a QuestionTable {
    type Item = &'a QuestionRecord;
    type IntoIter = std::slice::Iter<'a, QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// A record the model returned that failed validation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DroppedRecord {
    pub key: String,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedQuiz {
    pub table: QuestionTable,
    pub dropped: Vec<DroppedRecord>,
}

impl ParsedQuiz {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

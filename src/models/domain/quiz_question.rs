use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Answer slot of a multiple-choice question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum ChoiceLabel {
    A,
    B,
    C,
    D,
}

impl ChoiceLabel {
    pub const ALL: [ChoiceLabel; 4] = [ChoiceLabel::A, ChoiceLabel::B, ChoiceLabel::C, ChoiceLabel::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceLabel::A => "A",
            ChoiceLabel::B => "B",
            ChoiceLabel::C => "C",
            ChoiceLabel::D => "D",
        }
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChoiceLabel {
    type Err = String;

    /// Accepts surrounding whitespace and lowercase labels.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(ChoiceLabel::A),
            "B" => Ok(ChoiceLabel::B),
            "C" => Ok(ChoiceLabel::C),
            "D" => Ok(ChoiceLabel::D),
            _ => Err(format!("label '{}' is not one of A, B, C, D", value.trim())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionRecord {
    pub question: String,
    pub choices: BTreeMap<ChoiceLabel, String>,
    pub correct: ChoiceLabel,
}

impl QuestionRecord {
    pub fn new(
        question: impl Into<String>,
        choices: BTreeMap<ChoiceLabel, String>,
        correct: ChoiceLabel,
    ) -> Result<Self, String> {
        let record = Self {
            question: question.into(),
            choices,
            correct,
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks the record invariants and returns the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("question text is empty".to_string());
        }
        if self.choices.len() < 2 {
            return Err(format!(
                "expected at least 2 choices, got {}",
                self.choices.len()
            ));
        }
        if let Some((label, _)) = self.choices.iter().find(|(_, text)| text.trim().is_empty()) {
            return Err(format!("choice {} is empty", label));
        }
        if !self.choices.contains_key(&self.correct) {
            return Err(format!(
                "correct label {} is not among the choices",
                self.correct
            ));
        }
        Ok(())
    }

    pub fn choice(&self, label: ChoiceLabel) -> Option<&str> {
        self.choices.get(&label).map(String::as_str)
    }

    pub fn correct_choice(&self) -> Option<&str> {
        self.choice(self.correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(pairs: &[(ChoiceLabel, &str)]) -> BTreeMap<ChoiceLabel, String> {
        pairs
            .iter()
            .map(|(label, text)| (*label, text.to_string()))
            .collect()
    }

    #[test]
    fn choice_label_parses_loosely() {
        assert_eq!(" b ".parse::<ChoiceLabel>(), Ok(ChoiceLabel::B));
        assert_eq!("D".parse::<ChoiceLabel>(), Ok(ChoiceLabel::D));
        assert!("E".parse::<ChoiceLabel>().is_err());
        assert!("".parse::<ChoiceLabel>().is_err());
    }

    #[test]
    fn choice_label_serializes_as_bare_letter() {
        let json = serde_json::to_string(&ChoiceLabel::C).unwrap();
        assert_eq!(json, "\"C\"");
    }

    #[test]
    fn record_serializes_choices_as_label_keyed_object() {
        let record = QuestionRecord::new(
            "Pick one",
            choices(&[(ChoiceLabel::A, "x"), (ChoiceLabel::B, "y")]),
            ChoiceLabel::B,
        )
        .unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["choices"]["A"], "x");
        assert_eq!(json["correct"], "B");
    }

    #[test]
    fn record_rejects_correct_label_outside_choices() {
        let result = QuestionRecord::new(
            "Pick one",
            choices(&[(ChoiceLabel::A, "x"), (ChoiceLabel::B, "y")]),
            ChoiceLabel::D,
        );

        assert_eq!(
            result.unwrap_err(),
            "correct label D is not among the choices"
        );
    }

    #[test]
    fn record_rejects_blank_question_and_blank_choice() {
        let blank_question = QuestionRecord::new(
            "   ",
            choices(&[(ChoiceLabel::A, "x"), (ChoiceLabel::B, "y")]),
            ChoiceLabel::A,
        );
        assert!(blank_question.is_err());

        let blank_choice = QuestionRecord::new(
            "Pick one",
            choices(&[(ChoiceLabel::A, "x"), (ChoiceLabel::B, " ")]),
            ChoiceLabel::A,
        );
        assert_eq!(blank_choice.unwrap_err(), "choice B is empty");
    }

    #[test]
    fn record_rejects_single_choice() {
        let result = QuestionRecord::new(
            "Pick one",
            choices(&[(ChoiceLabel::A, "only")]),
            ChoiceLabel::A,
        );

        assert!(result.is_err());
    }

    #[test]
    fn correct_choice_returns_answer_text() {
        let record = QuestionRecord::new(
            "What is the capital of France?",
            choices(&[
                (ChoiceLabel::A, "Paris"),
                (ChoiceLabel::B, "London"),
                (ChoiceLabel::C, "Berlin"),
                (ChoiceLabel::D, "Madrid"),
            ]),
            ChoiceLabel::A,
        )
        .unwrap();

        assert_eq!(record.correct_choice(), Some("Paris"));
        assert_eq!(record.choice(ChoiceLabel::D), Some("Madrid"));
    }
}

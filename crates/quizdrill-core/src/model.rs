//! Core data model types for quizdrill.
//!
//! These are the fundamental types that the entire quizdrill system uses
//! to represent questions and question banks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, unique within a bank. Retry rounds correlate
    /// questions across sessions by this id, so bank edits must keep ids
    /// stable for questions that stay.
    pub id: String,
    /// The question text.
    pub prompt: String,
    /// The answer options, in bank order.
    pub options: [String; OPTION_COUNT],
    /// Index of the correct option within `options`.
    pub correct_index: usize,
    /// Shown after the question is answered.
    #[serde(default)]
    pub explanation: String,
}

/// An ordered collection of questions assembled from one or more sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bank {
    /// Questions in source order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Bank {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Drop every question whose id already appeared earlier in the bank,
    /// keeping order. Returns the deduplicated bank and the number of
    /// records dropped.
    pub fn dedup_by_id(self) -> (Bank, usize) {
        let before = self.questions.len();
        let mut seen = HashSet::new();
        let questions: Vec<Question> = self
            .questions
            .into_iter()
            .filter(|question| seen.insert(question.id.clone()))
            .collect();
        let dropped = before - questions.len();
        (Bank { questions }, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, prompt: &str) -> Question {
        Question {
            id: id.into(),
            prompt: prompt.into(),
            options: ["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index: 1,
            explanation: "because".into(),
        }
    }

    #[test]
    fn question_serde_roundtrip() {
        let original = question("Q1", "What is 2+2?");
        let json = serde_json::to_string(&original).unwrap();
        let deserialized: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, "Q1");
        assert_eq!(deserialized.options[1], "b");
        assert_eq!(deserialized.correct_index, 1);
    }

    #[test]
    fn explanation_defaults_to_empty() {
        let json = r#"{
            "id": "Q1",
            "prompt": "?",
            "options": ["a", "b", "c", "d"],
            "correct_index": 0
        }"#;
        let parsed: Question = serde_json::from_str(json).unwrap();
        assert!(parsed.explanation.is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let bank = Bank {
            questions: vec![
                question("Q1", "first"),
                question("Q2", "second"),
                question("Q1", "shadowed"),
            ],
        };
        let (deduped, dropped) = bank.dedup_by_id();
        assert_eq!(dropped, 1);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped.questions[0].prompt, "first");
        assert_eq!(deduped.questions[1].id, "Q2");
    }

    #[test]
    fn dedup_on_unique_bank_drops_nothing() {
        let bank = Bank {
            questions: vec![question("Q1", "one"), question("Q2", "two")],
        };
        let (deduped, dropped) = bank.dedup_by_id();
        assert_eq!(dropped, 0);
        assert_eq!(deduped.len(), 2);
    }
}

//! One-question-at-a-time A/B quiz.

use std::collections::BTreeMap;

use log::warn;

use crate::state::{persist, KeyValueStore};
use crate::SiteError;

pub const ANSWERS_KEY: &str = "nostalgia_ab_answers";
pub const QUESTION_KEY: &str = "nostalgia_ab_question";

/// Chosen option per question number.
pub type AbAnswers = BTreeMap<u32, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbQuiz {
    total: u32,
    current: u32,
    answers: AbAnswers,
}

impl AbQuiz {
    pub fn new(total: u32) -> Self {
        Self {
            total: total.max(1),
            current: 1,
            answers: AbAnswers::new(),
        }
    }

    /// Restores answers and the question cursor; unreadable values fall back to defaults.
    pub fn load(total: u32, store: &impl KeyValueStore) -> Self {
        let mut quiz = Self::new(total);

        if let Some(raw) = store.get(ANSWERS_KEY) {
            match serde_json::from_str::<AbAnswers>(&raw) {
                Ok(answers) => quiz.answers = answers,
                Err(err) => warn!("ignoring stored quiz answers: {err}"),
            }
        }

        if let Some(raw) = store.get(QUESTION_KEY) {
            match raw.trim().parse::<u32>() {
                Ok(question) if (1..=quiz.total).contains(&question) => quiz.current = question,
                Ok(question) => warn!("stored question {question} is out of range, starting over"),
                Err(err) => warn!("ignoring stored question `{raw}`: {err}"),
            }
        }

        quiz
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn answers(&self) -> &AbAnswers {
        &self.answers
    }

    /// Previously chosen option, used to restore the selection when a question reappears.
    pub fn selected(&self, question: u32) -> Option<&str> {
        self.answers.get(&question).map(String::as_str)
    }

    pub fn answer(
        &mut self,
        question: u32,
        value: &str,
        store: &mut impl KeyValueStore,
    ) -> Result<&AbAnswers, SiteError> {
        if !(1..=self.total).contains(&question) {
            return Err(SiteError::UnknownQuestion {
                question,
                total: self.total,
            });
        }

        self.answers.insert(question, value.to_string());
        match serde_json::to_string(&self.answers) {
            Ok(json) => persist(store, ANSWERS_KEY, &json),
            Err(err) => warn!("could not encode quiz answers: {err}"),
        }
        Ok(&self.answers)
    }

    /// Moves to the next question, cycling back to 1 after the last one.
    pub fn advance(&mut self, store: &mut impl KeyValueStore) -> u32 {
        self.current = self.current % self.total + 1;
        persist(store, QUESTION_KEY, &self.current.to_string());
        self.current
    }

    pub fn progress_label(&self) -> String {
        format!("Question {} of {}", self.current, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStore;

    #[test]
    fn advance_cycles_back_to_first_question() {
        let mut store = MemoryStore::new();
        let mut quiz = AbQuiz::new(3);
        assert_eq!(quiz.advance(&mut store), 2);
        assert_eq!(quiz.advance(&mut store), 3);
        assert_eq!(quiz.advance(&mut store), 1);
        assert_eq!(store.get(QUESTION_KEY).as_deref(), Some("1"));
    }

    #[test]
    fn answers_survive_a_reload() {
        let mut store = MemoryStore::new();
        let mut quiz = AbQuiz::new(10);
        quiz.answer(2, "b", &mut store).unwrap();
        quiz.answer(10, "a", &mut store).unwrap();
        quiz.advance(&mut store);

        let restored = AbQuiz::load(10, &store);
        assert_eq!(restored.current(), 2);
        assert_eq!(restored.selected(2), Some("b"));
        assert_eq!(restored.selected(10), Some("a"));
        assert_eq!(restored.progress_label(), "Question 2 of 10");
    }

    #[test]
    fn out_of_range_question_is_rejected() {
        let mut store = MemoryStore::new();
        let mut quiz = AbQuiz::new(10);
        assert_eq!(
            quiz.answer(11, "a", &mut store),
            Err(SiteError::UnknownQuestion {
                question: 11,
                total: 10
            })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_storage_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(ANSWERS_KEY, "{not json").unwrap();
        store.set(QUESTION_KEY, "42").unwrap();
        let quiz = AbQuiz::load(10, &store);
        assert_eq!(quiz.current(), 1);
        assert!(quiz.answers().is_empty());
    }
}

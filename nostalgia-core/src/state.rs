//! Session state and the storage it persists to.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::guesses::GuessBook;
use crate::quiz::{AbAnswers, AbQuiz};
use crate::{SiteConfig, SiteError};

/// Key under which the server-issued session id is cached.
pub const SESSION_KEY: &str = "nostalgia_session_id";

/// String key/value persistence (browser `localStorage`, a JSON file, memory).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SiteError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SiteError> {
        (**self).set(key, value)
    }
}

/// In-memory store; serializable so native hosts can keep it in a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SiteError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Writes a value, logging instead of failing: local state always wins.
pub(crate) fn persist(store: &mut impl KeyValueStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        warn!("could not persist `{key}`: {err}");
    }
}

/// Session id handed out by the collector API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    id: Option<String>,
}

impl Session {
    pub fn load(store: &impl KeyValueStore) -> Self {
        let id = store.get(SESSION_KEY).filter(|id| !id.trim().is_empty());
        Self { id }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Caches a server-issued id; returns whether it changed.
    pub fn adopt(&mut self, id: &str, store: &mut impl KeyValueStore) -> bool {
        let id = id.trim();
        if id.is_empty() || self.id.as_deref() == Some(id) {
            return false;
        }
        self.id = Some(id.to_string());
        persist(store, SESSION_KEY, id);
        true
    }
}

/// Everything a visitor accumulates on the page, bound to its store.
#[derive(Debug)]
pub struct SiteState<S> {
    store: S,
    session: Session,
    quiz: AbQuiz,
    guesses: GuessBook,
}

impl<S: KeyValueStore> SiteState<S> {
    pub fn load(store: S, config: &SiteConfig) -> Self {
        let session = Session::load(&store);
        let quiz = AbQuiz::load(config.quiz_questions, &store);
        Self {
            store,
            session,
            quiz,
            guesses: GuessBook::new(config.guess_slots),
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.id()
    }

    pub fn adopt_session(&mut self, id: &str) -> bool {
        self.session.adopt(id, &mut self.store)
    }

    pub fn quiz(&self) -> &AbQuiz {
        &self.quiz
    }

    pub fn guesses(&self) -> &GuessBook {
        &self.guesses
    }

    /// Records a quiz choice and returns the full answer set to sync.
    pub fn answer(&mut self, question: u32, value: &str) -> Result<&AbAnswers, SiteError> {
        self.quiz.answer(question, value, &mut self.store)
    }

    pub fn advance_question(&mut self) -> u32 {
        self.quiz.advance(&mut self.store)
    }

    /// Replaces the collected guesses with the non-blank inputs.
    pub fn submit_guesses<I, T>(&mut self, inputs: I) -> &[String]
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.guesses.collect(inputs)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), SiteError> {
            Err(SiteError::Storage {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    #[test]
    fn session_is_restored_from_store() {
        let mut store = MemoryStore::new();
        store.set(SESSION_KEY, "abc-123").unwrap();
        assert_eq!(Session::load(&store).id(), Some("abc-123"));
    }

    #[test]
    fn adopt_persists_only_changes() {
        let mut store = MemoryStore::new();
        let mut session = Session::default();
        assert!(session.adopt("s-1", &mut store));
        assert!(!session.adopt("s-1", &mut store));
        assert!(!session.adopt("  ", &mut store));
        assert_eq!(store.get(SESSION_KEY).as_deref(), Some("s-1"));
    }

    #[test]
    fn storage_failure_keeps_local_state() {
        let mut state = SiteState::load(FullStore, &SiteConfig::default());
        assert!(state.adopt_session("s-9"));
        assert_eq!(state.session_id(), Some("s-9"));
        let answers = state.answer(1, "a").unwrap();
        assert_eq!(answers.get(&1).map(String::as_str), Some("a"));
    }
}

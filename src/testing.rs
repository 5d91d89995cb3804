//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit tests.

#![allow(dead_code)]

use crate::error::Result;
use crate::models::Task;
use crate::notifications::AlertSink;
use crate::store::PersistencePort;
use crate::suggest::{RawSuggestion, SuggestionService};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// An in-memory persistence port.
///
/// Clones share the same backing map, so a "reload" from a clone observes
/// everything saved through the original.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a raw value directly, bypassing serialization.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PersistencePort for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A persistence port that always fails, for testing error paths.
#[derive(Debug, Default)]
pub struct FailingStore {
    error_message: String,
}

impl FailingStore {
    /// Create a new failing store with the specified error message.
    #[must_use]
    pub fn new(error_message: impl Into<String>) -> Self {
        Self { error_message: error_message.into() }
    }
}

impl PersistencePort for FailingStore {
    fn load_raw(&self, _key: &str) -> Result<Option<String>> {
        Err(std::io::Error::other(self.error_message.clone()).into())
    }

    fn save_raw(&self, _key: &str, _value: &str) -> Result<()> {
        Err(std::io::Error::other(self.error_message.clone()).into())
    }
}

/// A mock suggestion service.
///
/// Queues canned responses and returns them in order; asking for more
/// responses than were queued panics.
#[derive(Debug, Default)]
pub struct MockSuggestionService {
    task_responses: RefCell<Vec<Vec<RawSuggestion>>>,
    recommendation_responses: RefCell<Vec<Vec<RawSuggestion>>>,
    task_index: RefCell<usize>,
    recommendation_index: RefCell<usize>,
}

impl MockSuggestionService {
    /// Create a new mock suggestion service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `generate_maintenance_tasks`.
    pub fn expect_tasks(&mut self, response: Vec<RawSuggestion>) {
        self.task_responses.borrow_mut().push(response);
    }

    /// Queue a response for `generate_personalized_recommendations`.
    pub fn expect_recommendations(&mut self, response: Vec<RawSuggestion>) {
        self.recommendation_responses.borrow_mut().push(response);
    }
}

impl SuggestionService for MockSuggestionService {
    fn generate_maintenance_tasks(&self, _home_description: &str) -> Result<Vec<RawSuggestion>> {
        let mut index = self.task_index.borrow_mut();
        let responses = self.task_responses.borrow();
        assert!(*index < responses.len(), "No more task suggestion responses expected");
        let response = responses[*index].clone();
        *index += 1;
        Ok(response)
    }

    fn generate_personalized_recommendations(
        &self,
        _home_description: &str,
        _recent_tasks: &[Task],
    ) -> Result<Vec<RawSuggestion>> {
        let mut index = self.recommendation_index.borrow_mut();
        let responses = self.recommendation_responses.borrow();
        assert!(*index < responses.len(), "No more recommendation responses expected");
        let response = responses[*index].clone();
        *index += 1;
        Ok(response)
    }
}

/// A suggestion service that always fails, for testing error paths.
#[derive(Debug, Default)]
pub struct FailingSuggestionService {
    error_message: String,
}

impl FailingSuggestionService {
    /// Create a new failing service with the specified error message.
    #[must_use]
    pub fn new(error_message: impl Into<String>) -> Self {
        Self { error_message: error_message.into() }
    }
}

impl SuggestionService for FailingSuggestionService {
    fn generate_maintenance_tasks(&self, _home_description: &str) -> Result<Vec<RawSuggestion>> {
        Err(crate::error::Error::Suggestion(self.error_message.clone()))
    }

    fn generate_personalized_recommendations(
        &self,
        _home_description: &str,
        _recent_tasks: &[Task],
    ) -> Result<Vec<RawSuggestion>> {
        Err(crate::error::Error::Suggestion(self.error_message.clone()))
    }
}

/// An alert sink that records every shown alert.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    shown: Rc<RefCell<Vec<(String, String, String)>>>,
}

impl RecordingSink {
    /// Create a new recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The (title, body, tag) triples shown so far.
    #[must_use]
    pub fn shown(&self) -> Vec<(String, String, String)> {
        self.shown.borrow().clone()
    }
}

impl AlertSink for RecordingSink {
    fn show(&mut self, title: &str, body: &str, tag: &str) {
        self.shown.borrow_mut().push((title.to_string(), body.to_string(), tag.to_string()));
    }
}

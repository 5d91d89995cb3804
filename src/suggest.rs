//! AI task suggestions and personalized recommendations.
//!
//! The generator itself is an external service behind [`SuggestionService`];
//! this module owns the parts the engine is responsible for: treating the
//! service's output as untrusted and filtering it down to known enum values,
//! and rejecting stale in-flight responses after the selected property
//! changes.

use crate::error::Result;
use crate::models::{Category, Priority, Task};
use serde::{Deserialize, Serialize};

/// A suggestion entry exactly as returned by the external service.
///
/// Category and priority arrive as free-form strings; nothing here is
/// trusted until it passes [`sanitize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSuggestion {
    /// Proposed task name.
    #[serde(rename = "taskName")]
    pub task_name: String,
    /// Claimed category.
    pub category: String,
    /// Claimed priority.
    pub priority: String,
    /// How often the task should be performed (free text).
    #[serde(rename = "recommendedFrequency")]
    pub recommended_frequency: String,
    /// Type of professional to hire, if the service suggested one.
    #[serde(rename = "recommendedProfessional", default, skip_serializing_if = "Option::is_none")]
    pub recommended_professional: Option<String>,
    /// Why the service made this suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A validated suggestion with typed category and priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Proposed task name.
    pub task_name: String,
    /// Validated category.
    pub category: Category,
    /// Validated priority.
    pub priority: Priority,
    /// How often the task should be performed.
    pub recommended_frequency: String,
    /// Type of professional to hire, if suggested.
    pub recommended_professional: Option<String>,
    /// Why the service made this suggestion.
    pub reason: Option<String>,
}

/// The external generator service.
///
/// Implementations talk to a hosted model; the engine only sees the
/// structured results.
pub trait SuggestionService {
    /// Generate a list of maintenance task suggestions for a home.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unavailable or returns malformed
    /// output. Callers surface this to the user for a manual retry.
    fn generate_maintenance_tasks(&self, home_description: &str) -> Result<Vec<RawSuggestion>>;

    /// Generate personalized recommendations given recent task history.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unavailable or returns malformed
    /// output. Callers swallow this and treat it as an empty result.
    fn generate_personalized_recommendations(
        &self,
        home_description: &str,
        recent_tasks: &[Task],
    ) -> Result<Vec<RawSuggestion>>;
}

/// Drop entries with empty names or category/priority values outside the
/// known enum sets, and parse the rest.
#[must_use]
pub fn sanitize(raw: Vec<RawSuggestion>) -> Vec<Suggestion> {
    raw.into_iter()
        .filter_map(|entry| {
            if entry.task_name.trim().is_empty() || entry.recommended_frequency.trim().is_empty() {
                return None;
            }
            let category = Category::from_str(&entry.category).ok()?;
            let priority = Priority::from_str(&entry.priority).ok()?;
            Some(Suggestion {
                task_name: entry.task_name,
                category,
                priority,
                recommended_frequency: entry.recommended_frequency,
                recommended_professional: entry.recommended_professional,
                reason: entry.reason,
            })
        })
        .collect()
}

/// Monotonic counter guarding against stale in-flight fetches.
///
/// Switching the selected property while a recommendation fetch is
/// outstanding starts a new generation; the old response's token no longer
/// matches and its result is discarded instead of overwriting the newer
/// selection's results.
#[derive(Debug, Default)]
pub struct FetchGeneration {
    current: u64,
}

/// A token identifying one fetch generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

impl FetchGeneration {
    /// Start a new fetch, invalidating any outstanding tokens.
    pub fn begin(&mut self) -> FetchToken {
        self.current += 1;
        FetchToken(self.current)
    }

    /// Whether a response carrying this token is still the latest.
    #[must_use]
    pub const fn accept(&self, token: FetchToken) -> bool {
        token.0 == self.current
    }
}

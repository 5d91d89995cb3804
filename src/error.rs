//! Error types for `homely`.

/// Errors that can occur in the maintenance engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The data directory could not be determined.
    #[error("could not determine home directory for data storage")]
    NoDataDir,

    /// No user is logged in for an operation that requires one.
    #[error("no user logged in")]
    NotLoggedIn,

    /// No property is selected for an operation that requires one.
    #[error("no property selected")]
    NoPropertySelected,

    /// The AI suggestion service failed.
    #[error("suggestion service error: {0}")]
    Suggestion(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

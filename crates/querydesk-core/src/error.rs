//! Error types for Querydesk

use thiserror::Error;

/// Core error type for Querydesk operations
#[derive(Error, Debug)]
pub enum QuerydeskError {
    /// The chosen file cannot be opened as a valid database. Fatal for the
    /// session; the shell notifies the user and exits.
    #[error("Not a valid database: {0}")]
    InvalidDatabase(String),

    #[error("Connection error: {0}")]
    Connection(String),

    /// The engine rejected the compiled text. Recoverable; the offending
    /// query travels with the error so shells can show it verbatim.
    #[error("Query error: {message} (offending query: {sql})")]
    Execution { message: String, sql: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Querydesk operations
pub type Result<T> = std::result::Result<T, QuerydeskError>;

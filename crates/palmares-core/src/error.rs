//! Error types for `palmares-core`.
//!
//! All fallible ballot operations return [`CoreResult<T>`], which is an
//! alias for `Result<T, CoreError>`. Failures of the credential
//! verification call itself are a separate type,
//! [`TransportError`](crate::login::TransportError), so that they can never
//! be mistaken for a credential rejection.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or map it onto a response status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced user, category, or candidate does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A unique field (email, phone) is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The input failed validation.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// The user already has a vote in this category.
    #[error("already voted in category {0}")]
    AlreadyVoted(String),

    /// The category does not accept votes (leadership prize).
    #[error("category {0} does not accept votes")]
    NotVotable(String),

    /// The caller lacks the role required for the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The configuration file was not found.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Failed to parse a TOML file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `palmares-core`.
pub type CoreResult<T> = Result<T, CoreError>;

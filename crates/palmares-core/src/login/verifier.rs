//! The credential verification boundary.

use async_trait::async_trait;

use crate::identifier::IdentifierKind;

/// Result of a verification call that completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome<U> {
    /// Credentials accepted.
    Valid(U),
    /// Credentials checked and rejected (wrong password or unknown identifier).
    Invalid,
}

/// A verification call that could not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("verification service unreachable: {0}")]
    Unreachable(String),

    #[error("unexpected status {0} from verification service")]
    UnexpectedStatus(u16),

    #[error("malformed verification response: {0}")]
    Malformed(String),
}

/// Checks an identifier/password pair against the account store.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// The record returned for accepted credentials.
    type User: Send;

    async fn verify(
        &self,
        kind: IdentifierKind,
        identifier: &str,
        password: &str,
    ) -> Result<VerifyOutcome<Self::User>, TransportError>;
}

//! Palmares core library: UI-agnostic awards ballot logic.
//!
//! `palmares-core` holds everything both the web service and the terminal
//! client need: the login throttle and its async form driver, ballot
//! records, tallying, the server-side access gate, and the store
//! abstraction.
//!
//! # Modules
//!
//! - [`throttle`]: Two-counter login lockout state machine and display helpers.
//! - [`login`]: [`LoginForm`] driver and the [`CredentialVerifier`] boundary.
//! - [`identifier`]: Email / phone identifier detection.
//! - [`model`]: Users, categories, candidates, votes.
//! - [`tally`]: Per-category vote counts and percentages.
//! - [`access`]: Server-authoritative platform access gate.
//! - [`store`]: [`BallotStore`] trait and the in-memory implementation.
//! - [`catalog`]: TOML catalog of categories and candidates.
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod access;
pub mod catalog;
pub mod error;
pub mod identifier;
pub mod login;
pub mod model;
pub mod store;
pub mod tally;
pub mod throttle;

pub use access::{AccessGate, AccessSettings, AccessStatus, UnlockError};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult};
pub use identifier::IdentifierKind;
pub use login::{CredentialVerifier, LoginForm, LoginOutcome, TransportError, VerifyOutcome};
pub use model::{Candidate, Category, LeadershipWinner, NewUser, Role, User, Vote};
pub use store::{BallotStore, MemoryStore, StoredUser};
pub use tally::{format_percentage, tally, CandidateResult, CategoryResult, Results};
pub use throttle::{
    format_remaining, AttemptNotice, LockoutCause, LockoutPolicy, LoginAttemptState, Throttle,
};

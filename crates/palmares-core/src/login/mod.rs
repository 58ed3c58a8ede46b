//! Login form logic: the verifier boundary and the throttled form driver.

pub mod form;
pub mod verifier;

pub use form::{LoginForm, LoginOutcome};
pub use verifier::{CredentialVerifier, TransportError, VerifyOutcome};

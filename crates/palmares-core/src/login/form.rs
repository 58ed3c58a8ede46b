//! Async login form driver.
//!
//! [`LoginForm`] owns a [`Throttle`], calls the verifier at most once per
//! submission, and runs the one-second lockout countdown on the tokio
//! runtime. Submissions are serialised: a second `submit` waits for the
//! pending verification to finish and then re-checks the lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::verifier::{CredentialVerifier, TransportError, VerifyOutcome};
use crate::identifier::IdentifierKind;
use crate::throttle::{AttemptNotice, LoginAttemptState, LockoutPolicy, Strike, Throttle, Tick};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Everything a submission can end in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome<U> {
    Authenticated(U),
    InvalidCredentials,
    CredentialLockout { remaining_secs: u32 },
    TransportError(TransportError),
    TransportLockout { remaining_secs: u32 },
    /// Rejected without contacting the verifier.
    LockedOut { remaining_secs: u32 },
}

pub struct LoginForm<V: CredentialVerifier> {
    verifier: V,
    throttle: Arc<Mutex<Throttle>>,
    pending: tokio::sync::Mutex<()>,
    countdown: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<V: CredentialVerifier> LoginForm<V> {
    pub fn new(verifier: V, policy: LockoutPolicy) -> Self {
        Self {
            verifier,
            throttle: Arc::new(Mutex::new(Throttle::new(policy))),
            pending: tokio::sync::Mutex::new(()),
            countdown: Mutex::new(None),
        }
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// A copy of the current throttle state.
    pub fn snapshot(&self) -> LoginAttemptState {
        lock(&self.throttle).state().clone()
    }

    pub fn notice(&self) -> Option<AttemptNotice> {
        AttemptNotice::for_attempts(lock(&self.throttle).state().attempts)
    }

    pub fn is_locked(&self) -> bool {
        lock(&self.throttle).is_locked()
    }

    /// Submits one login attempt.
    ///
    /// Must be called from within a tokio runtime: a lockout spawns the
    /// countdown task.
    pub async fn submit(&self, identifier: &str, password: &str) -> LoginOutcome<V::User> {
        let _pending = self.pending.lock().await;

        if let Err(remaining_secs) = lock(&self.throttle).check() {
            tracing::debug!(remaining_secs, "login submission rejected while locked");
            return LoginOutcome::LockedOut { remaining_secs };
        }

        let raw = identifier.trim();
        let kind = IdentifierKind::detect(raw);
        let value = kind.normalize(raw);
        let result = self.verifier.verify(kind, &value, password).await;

        let (outcome, strike) = {
            let mut throttle = lock(&self.throttle);
            match result {
                Ok(VerifyOutcome::Valid(user)) => {
                    throttle.on_authenticated();
                    tracing::info!(%kind, "login succeeded");
                    return LoginOutcome::Authenticated(user);
                }
                Ok(VerifyOutcome::Invalid) => {
                    let strike = throttle.on_rejected();
                    tracing::warn!(%kind, ?strike, "credentials rejected");
                    let outcome = match strike {
                        Strike::Warned => LoginOutcome::InvalidCredentials,
                        Strike::Locked { remaining_secs } => {
                            LoginOutcome::CredentialLockout { remaining_secs }
                        }
                    };
                    (outcome, strike)
                }
                Err(e) => {
                    let strike = throttle.on_transport_error();
                    tracing::warn!(%kind, ?strike, "verification call failed: {e}");
                    let outcome = match strike {
                        Strike::Warned => LoginOutcome::TransportError(e),
                        Strike::Locked { remaining_secs } => {
                            LoginOutcome::TransportLockout { remaining_secs }
                        }
                    };
                    (outcome, strike)
                }
            }
        };

        if matches!(strike, Strike::Locked { .. }) {
            self.start_countdown();
        }
        outcome
    }

    fn start_countdown(&self) {
        let throttle = Arc::clone(&self.throttle);
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + TICK_PERIOD;
            let mut interval = tokio::time::interval_at(start, TICK_PERIOD);
            loop {
                interval.tick().await;
                match lock(&throttle).tick() {
                    Tick::Counting { .. } => {}
                    Tick::Released(_) | Tick::Idle => break,
                }
            }
        });

        if let Some(previous) = lock(&self.countdown).replace(handle) {
            previous.abort();
        }
    }
}

impl<V: CredentialVerifier> Drop for LoginForm<V> {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.countdown).take() {
            handle.abort();
        }
    }
}

//! The login throttle state machine.
//!
//! [`Throttle`] is synchronous and clock-free: it changes state only when
//! told about a verification result or a one-second [`Throttle::tick`].
//! The async driver in [`crate::login`] feeds it both.

use serde::Serialize;

use super::policy::{LockoutCause, LockoutPolicy};

/// Per-form failure counters and lockout status.
///
/// Lives only as long as the login form that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginAttemptState {
    /// Consecutive rejected credentials since the last success or credential lockout.
    pub credential_failures: u32,
    /// Consecutive failed verification calls since the last transport lockout.
    pub transport_failures: u32,
    pub locked: bool,
    pub lockout_remaining_secs: u32,
    /// The counter that triggered the active lockout, if any.
    pub lockout_cause: Option<LockoutCause>,
    /// Display-only attempt counter. Never gates submission.
    pub attempts: u32,
}

/// Result of recording a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    /// Below the threshold; the form stays open.
    Warned,
    /// Threshold reached; a lockout of the given length has begun.
    Locked { remaining_secs: u32 },
}

/// Result of a one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No lockout was active.
    Idle,
    /// Still locked with this many seconds left.
    Counting { remaining_secs: u32 },
    /// The lockout ended on this tick and its counter was reset.
    Released(LockoutCause),
}

/// Two-counter login throttle.
#[derive(Debug, Clone, Default)]
pub struct Throttle {
    policy: LockoutPolicy,
    state: LoginAttemptState,
}

impl Throttle {
    pub fn new(policy: LockoutPolicy) -> Self {
        Self {
            policy,
            state: LoginAttemptState::default(),
        }
    }

    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    pub fn state(&self) -> &LoginAttemptState {
        &self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked
    }

    /// Returns `Err(remaining_secs)` while a lockout is active.
    pub fn check(&self) -> Result<(), u32> {
        if self.state.locked {
            Err(self.state.lockout_remaining_secs)
        } else {
            Ok(())
        }
    }

    /// Records accepted credentials.
    ///
    /// Clears the credential counter and the display counter; an active
    /// lockout and the transport counter are left alone.
    pub fn on_authenticated(&mut self) {
        self.state.credential_failures = 0;
        self.state.attempts = 0;
    }

    /// Records a structured credential rejection.
    pub fn on_rejected(&mut self) -> Strike {
        self.state.credential_failures += 1;
        self.state.attempts += 1;
        let count = self.state.credential_failures;
        self.strike(LockoutCause::Credential, count)
    }

    /// Records a verification call that failed to complete.
    pub fn on_transport_error(&mut self) -> Strike {
        self.state.transport_failures += 1;
        self.state.attempts += 1;
        let count = self.state.transport_failures;
        self.strike(LockoutCause::Transport, count)
    }

    fn strike(&mut self, cause: LockoutCause, count: u32) -> Strike {
        if count < self.policy.threshold(cause) {
            return Strike::Warned;
        }
        let secs = self.policy.lockout_secs(cause);
        self.state.locked = true;
        self.state.lockout_remaining_secs = secs;
        self.state.lockout_cause = Some(cause);
        tracing::debug!(?cause, secs, "login lockout started");
        Strike::Locked {
            remaining_secs: secs,
        }
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Tick {
        if !self.state.locked {
            return Tick::Idle;
        }
        self.state.lockout_remaining_secs = self.state.lockout_remaining_secs.saturating_sub(1);
        if self.state.lockout_remaining_secs > 0 {
            return Tick::Counting {
                remaining_secs: self.state.lockout_remaining_secs,
            };
        }

        self.state.locked = false;
        let cause = self
            .state
            .lockout_cause
            .take()
            .unwrap_or(LockoutCause::Credential);
        match cause {
            LockoutCause::Credential => self.state.credential_failures = 0,
            LockoutCause::Transport => self.state.transport_failures = 0,
        }
        tracing::debug!(?cause, "login lockout released");
        Tick::Released(cause)
    }
}

//! Lockout thresholds and durations.

use serde::{Deserialize, Serialize};

/// Which failure class triggered a lockout episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockoutCause {
    /// The verifier affirmatively rejected the identifier/password pair.
    Credential,
    /// The verification call itself could not complete.
    Transport,
}

/// Strike thresholds and lockout lengths for both failure classes.
///
/// Transport failures lock for much longer than credential rejections:
/// repeated technical failures are treated as possible abuse, repeated
/// rejections as typos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutPolicy {
    #[serde(default = "default_threshold")]
    pub credential_threshold: u32,
    #[serde(default = "default_credential_lockout_secs")]
    pub credential_lockout_secs: u32,
    #[serde(default = "default_threshold")]
    pub transport_threshold: u32,
    #[serde(default = "default_transport_lockout_secs")]
    pub transport_lockout_secs: u32,
}

fn default_threshold() -> u32 {
    2
}

fn default_credential_lockout_secs() -> u32 {
    30
}

fn default_transport_lockout_secs() -> u32 {
    300
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            credential_threshold: default_threshold(),
            credential_lockout_secs: default_credential_lockout_secs(),
            transport_threshold: default_threshold(),
            transport_lockout_secs: default_transport_lockout_secs(),
        }
    }
}

impl LockoutPolicy {
    /// Number of consecutive failures of `cause` that starts a lockout.
    ///
    /// A threshold of zero is treated as one.
    pub fn threshold(&self, cause: LockoutCause) -> u32 {
        let raw = match cause {
            LockoutCause::Credential => self.credential_threshold,
            LockoutCause::Transport => self.transport_threshold,
        };
        raw.max(1)
    }

    /// Lockout length in seconds for an episode triggered by `cause`.
    ///
    /// Never zero, so a lockout always blocks at least one tick.
    pub fn lockout_secs(&self, cause: LockoutCause) -> u32 {
        let raw = match cause {
            LockoutCause::Credential => self.credential_lockout_secs,
            LockoutCause::Transport => self.transport_lockout_secs,
        };
        raw.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_two_strikes_each() {
        let policy = LockoutPolicy::default();
        assert_eq!(policy.threshold(LockoutCause::Credential), 2);
        assert_eq!(policy.threshold(LockoutCause::Transport), 2);
    }

    #[test]
    fn transport_lockout_is_longer_than_credential_lockout() {
        let policy = LockoutPolicy::default();
        assert_eq!(policy.lockout_secs(LockoutCause::Credential), 30);
        assert_eq!(policy.lockout_secs(LockoutCause::Transport), 300);
    }

    #[test]
    fn zero_values_are_clamped() {
        let policy = LockoutPolicy {
            credential_threshold: 0,
            credential_lockout_secs: 0,
            transport_threshold: 0,
            transport_lockout_secs: 0,
        };
        assert_eq!(policy.threshold(LockoutCause::Credential), 1);
        assert_eq!(policy.lockout_secs(LockoutCause::Transport), 1);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let policy: LockoutPolicy = toml::from_str("credential_lockout_secs = 45").unwrap();
        assert_eq!(policy.credential_lockout_secs, 45);
        assert_eq!(policy.credential_threshold, 2);
        assert_eq!(policy.transport_lockout_secs, 300);
    }
}

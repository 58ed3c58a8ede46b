//! Platform access gate.
//!
//! The gate is held by the server. Clients read its status; only a
//! server-side check of the activation code can open it, and opening it
//! opens it for everyone.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Static gate settings, usually the `[access]` config section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessSettings {
    #[serde(default)]
    pub blocked: bool,
    /// After this instant the gate no longer blocks.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Hash of the activation code. Without one the gate cannot be unlocked.
    #[serde(default)]
    pub activation_code_hash: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub contact: String,
}

/// What clients see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessStatus {
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnlockError {
    #[error("activation code rejected")]
    WrongCode,
    #[error("no activation code configured")]
    NotConfigured,
}

pub struct AccessGate {
    settings: AccessSettings,
    unlocked: AtomicBool,
}

impl AccessGate {
    pub fn new(settings: AccessSettings) -> Self {
        Self {
            settings,
            unlocked: AtomicBool::new(false),
        }
    }

    pub fn is_blocked(&self, now: DateTime<Utc>) -> bool {
        if self.unlocked.load(Ordering::Acquire) {
            return false;
        }
        if self.settings.deadline.is_some_and(|deadline| now > deadline) {
            return false;
        }
        self.settings.blocked
    }

    pub fn status(&self, now: DateTime<Utc>) -> AccessStatus {
        let blocked = self.is_blocked(now);
        AccessStatus {
            blocked,
            deadline: self.settings.deadline,
            message: if blocked {
                self.settings.message.clone()
            } else {
                String::new()
            },
            contact: if blocked {
                self.settings.contact.clone()
            } else {
                String::new()
            },
        }
    }

    /// Opens the gate when `check` accepts the code against the configured hash.
    ///
    /// The hash scheme belongs to the caller (the server verifies argon2
    /// hashes), which keeps this module free of crypto dependencies.
    pub fn unlock<F>(&self, code: &str, check: F) -> Result<(), UnlockError>
    where
        F: FnOnce(&str, &str) -> bool,
    {
        let hash = self
            .settings
            .activation_code_hash
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or(UnlockError::NotConfigured)?;

        if !check(hash, code) {
            tracing::warn!("access gate unlock attempt with wrong code");
            return Err(UnlockError::WrongCode);
        }
        self.unlocked.store(true, Ordering::Release);
        tracing::info!("access gate unlocked");
        Ok(())
    }
}

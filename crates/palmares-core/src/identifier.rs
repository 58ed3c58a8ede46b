//! Login identifiers: an email address or a phone number.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of identifier a user typed into the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Email,
    Phone,
}

impl IdentifierKind {
    /// Classifies `raw` as an email when it looks like `local@domain.tld`
    /// with no whitespace anywhere; everything else is treated as a phone
    /// number.
    pub fn detect(raw: &str) -> Self {
        if looks_like_email(raw) {
            Self::Email
        } else {
            Self::Phone
        }
    }

    /// Canonical lookup form: emails are trimmed and lower-cased, phone
    /// numbers only trimmed.
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            Self::Email => raw.trim().to_lowercase(),
            Self::Phone => raw.trim().to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn looks_like_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // needs a dot with at least one character on each side
    let bytes = domain.as_bytes();
    bytes
        .iter()
        .enumerate()
        .any(|(i, &b)| b == b'.' && i > 0 && i + 1 < bytes.len())
}

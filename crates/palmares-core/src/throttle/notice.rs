//! Display helpers for the login form: warning tiers and countdown text.

use serde::Serialize;

/// Warning shown above the login form, driven by the cosmetic attempt counter.
///
/// The counter also grows on transport errors, so `Locked` can be shown
/// after three mixed failures while no lockout is active. The tier is
/// never used to decide whether a submission is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptNotice {
    CheckCredentials,
    LastAttempt,
    Locked,
}

impl AttemptNotice {
    pub fn for_attempts(attempts: u32) -> Option<Self> {
        match attempts {
            0 => None,
            1 => Some(Self::CheckCredentials),
            2 => Some(Self::LastAttempt),
            _ => Some(Self::Locked),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::CheckCredentials => "Check your credentials carefully",
            Self::LastAttempt => "Last attempt before lockout",
            Self::Locked => "Login temporarily locked",
        }
    }
}

/// Formats a remaining lockout as `m:ss`.
pub fn format_remaining(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_remaining(0), "0:00");
    }

    #[test]
    fn formats_under_a_minute() {
        assert_eq!(format_remaining(59), "0:59");
        assert_eq!(format_remaining(30), "0:30");
    }

    #[test]
    fn pads_seconds() {
        assert_eq!(format_remaining(125), "2:05");
    }

    #[test]
    fn formats_whole_minutes() {
        assert_eq!(format_remaining(300), "5:00");
    }

    #[test]
    fn notice_tiers() {
        assert_eq!(AttemptNotice::for_attempts(0), None);
        assert_eq!(
            AttemptNotice::for_attempts(1),
            Some(AttemptNotice::CheckCredentials)
        );
        assert_eq!(
            AttemptNotice::for_attempts(2),
            Some(AttemptNotice::LastAttempt)
        );
        assert_eq!(AttemptNotice::for_attempts(3), Some(AttemptNotice::Locked));
        assert_eq!(AttemptNotice::for_attempts(40), Some(AttemptNotice::Locked));
    }
}

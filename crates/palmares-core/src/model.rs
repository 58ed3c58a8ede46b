//! Ballot records: users, categories, candidates, and votes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::identifier::IdentifierKind;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Voter,
    SuperAdmin,
}

/// A registered user as exposed to clients. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Role {
    pub fn is_super_admin(self) -> bool {
        self == Role::SuperAdmin
    }
}

impl User {
    /// Returns the identifier of the given kind, if the user has one.
    pub fn identifier(&self, kind: IdentifierKind) -> Option<&str> {
        match kind {
            IdentifierKind::Email => self.email.as_deref(),
            IdentifierKind::Phone => self.phone.as_deref(),
        }
    }
}

/// Registration input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl NewUser {
    /// Trims fields, lower-cases the email, drops empty optionals, and
    /// checks the required ones.
    pub fn normalized(self) -> CoreResult<Self> {
        let name = self.name.trim().to_string();
        let email = non_empty(self.email).map(|e| IdentifierKind::Email.normalize(&e));
        let phone = non_empty(self.phone).map(|p| IdentifierKind::Phone.normalize(&p));

        if name.is_empty() {
            return Err(CoreError::Invalid("name is required".to_string()));
        }
        if email.is_none() && phone.is_none() {
            return Err(CoreError::Invalid(
                "an email or a phone number is required".to_string(),
            ));
        }
        if let Some(email) = &email {
            if IdentifierKind::detect(email) != IdentifierKind::Email {
                return Err(CoreError::Invalid(format!("not an email address: {email}")));
            }
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::Invalid(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        Ok(Self {
            name,
            email,
            phone,
            password: self.password,
            domain: non_empty(self.domain),
            city: non_empty(self.city),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub category_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// The pre-assigned winner of the leadership prize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadershipWinner {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub tribute: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub special: bool,
    #[serde(default)]
    pub is_leadership_prize: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<LeadershipWinner>,
}

impl Category {
    pub fn is_votable(&self) -> bool {
        !self.is_leadership_prize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub user_id: String,
    pub category_id: String,
    pub candidate_id: String,
    pub cast_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            name: "  Awa Traoré ".to_string(),
            email: Some(" Awa@Example.ML ".to_string()),
            phone: Some("   ".to_string()),
            password: "s3cret!".to_string(),
            domain: None,
            city: Some("Bankass".to_string()),
        }
    }

    #[test]
    fn normalized_trims_and_lowercases() {
        let user = new_user().normalized().unwrap();
        assert_eq!(user.name, "Awa Traoré");
        assert_eq!(user.email.as_deref(), Some("awa@example.ml"));
        assert_eq!(user.phone, None);
        assert_eq!(user.city.as_deref(), Some("Bankass"));
    }

    #[test]
    fn phone_only_is_accepted() {
        let user = NewUser {
            email: None,
            phone: Some("+22370000000".to_string()),
            ..new_user()
        }
        .normalized()
        .unwrap();
        assert_eq!(user.phone.as_deref(), Some("+22370000000"));
    }

    #[test]
    fn missing_identifier_is_rejected() {
        let err = NewUser {
            email: None,
            phone: None,
            ..new_user()
        }
        .normalized()
        .unwrap_err();
        assert!(matches!(err, CoreError::Invalid(_)));
    }

    #[test]
    fn short_password_is_rejected() {
        let err = NewUser {
            password: "12345".to_string(),
            ..new_user()
        }
        .normalized()
        .unwrap_err();
        assert!(err.to_string().contains("at least 6"));
    }

    #[test]
    fn bad_email_is_rejected() {
        let err = NewUser {
            email: Some("awa@localhost".to_string()),
            ..new_user()
        }
        .normalized()
        .unwrap_err();
        assert!(matches!(err, CoreError::Invalid(_)));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = NewUser {
            name: "   ".to_string(),
            ..new_user()
        }
        .normalized()
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid input: name is required");
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
    }

    #[test]
    fn only_super_admin_role_is_super_admin() {
        assert!(Role::SuperAdmin.is_super_admin());
        assert!(!Role::Voter.is_super_admin());
        assert!(!Role::default().is_super_admin());
    }

    #[test]
    fn leadership_category_is_not_votable() {
        let category = Category {
            id: "trophee-leadership".to_string(),
            name: "Trophée Leadership".to_string(),
            subtitle: String::new(),
            special: true,
            is_leadership_prize: true,
            winner: None,
        };
        assert!(!category.is_votable());
    }
}

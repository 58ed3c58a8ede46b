//! In-memory [`BallotStore`].

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BallotStore, StoredUser};
use crate::error::{CoreError, CoreResult};
use crate::identifier::IdentifierKind;
use crate::model::{Candidate, Category, NewUser, Role, User, Vote};

#[derive(Default)]
struct Inner {
    users: Vec<StoredUser>,
    categories: Vec<Category>,
    candidates: Vec<Candidate>,
    votes: Vec<Vote>,
    leadership_revealed: bool,
}

impl Inner {
    fn user_by(&self, kind: IdentifierKind, value: &str) -> Option<&StoredUser> {
        self.users
            .iter()
            .find(|u| u.user.identifier(kind) == Some(value))
    }
}

/// Process-local store. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BallotStore for MemoryStore {
    async fn create_user(
        &self,
        new_user: NewUser,
        password_hash: String,
        role: Role,
    ) -> CoreResult<User> {
        let mut inner = self.inner.write().await;

        if let Some(email) = &new_user.email {
            if inner.user_by(IdentifierKind::Email, email).is_some() {
                return Err(CoreError::Conflict(format!("email already registered: {email}")));
            }
        }
        if let Some(phone) = &new_user.phone {
            if inner.user_by(IdentifierKind::Phone, phone).is_some() {
                return Err(CoreError::Conflict(format!("phone already registered: {phone}")));
            }
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: new_user.name,
            email: new_user.email,
            phone: new_user.phone,
            role,
            domain: new_user.domain,
            city: new_user.city,
            created_at: Utc::now(),
        };
        inner.users.push(StoredUser {
            user: user.clone(),
            password_hash,
        });
        tracing::debug!(user_id = %user.id, ?role, "user created");
        Ok(user)
    }

    async fn find_by_identifier(
        &self,
        kind: IdentifierKind,
        value: &str,
    ) -> CoreResult<Option<StoredUser>> {
        let inner = self.inner.read().await;
        Ok(inner.user_by(kind, value).cloned())
    }

    async fn get_user(&self, id: &str) -> CoreResult<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone())
            .ok_or_else(|| CoreError::NotFound(format!("user {id}")))
    }

    async fn upsert_category(&self, category: Category) -> CoreResult<Category> {
        let mut inner = self.inner.write().await;
        match inner.categories.iter().position(|c| c.id == category.id) {
            Some(pos) => inner.categories[pos] = category.clone(),
            None => inner.categories.push(category.clone()),
        }
        Ok(category)
    }

    async fn upsert_candidate(&self, candidate: Candidate) -> CoreResult<Candidate> {
        let mut inner = self.inner.write().await;
        if !inner.categories.iter().any(|c| c.id == candidate.category_id) {
            return Err(CoreError::NotFound(format!(
                "category {}",
                candidate.category_id
            )));
        }
        match inner.candidates.iter().position(|c| c.id == candidate.id) {
            Some(pos) => inner.candidates[pos] = candidate.clone(),
            None => inner.candidates.push(candidate.clone()),
        }
        Ok(candidate)
    }

    async fn list_categories(&self) -> CoreResult<Vec<Category>> {
        Ok(self.inner.read().await.categories.clone())
    }

    async fn list_candidates(&self, category_id: Option<&str>) -> CoreResult<Vec<Candidate>> {
        let inner = self.inner.read().await;
        Ok(inner
            .candidates
            .iter()
            .filter(|c| category_id.map_or(true, |id| c.category_id == id))
            .cloned()
            .collect())
    }

    async fn cast_vote(
        &self,
        user_id: &str,
        category_id: &str,
        candidate_id: &str,
    ) -> CoreResult<Vote> {
        let mut inner = self.inner.write().await;

        let category = inner
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| CoreError::NotFound(format!("category {category_id}")))?;
        if !category.is_votable() {
            return Err(CoreError::NotVotable(category_id.to_string()));
        }
        if !inner
            .candidates
            .iter()
            .any(|c| c.id == candidate_id && c.category_id == category_id)
        {
            return Err(CoreError::NotFound(format!(
                "candidate {candidate_id} in category {category_id}"
            )));
        }
        if inner
            .votes
            .iter()
            .any(|v| v.user_id == user_id && v.category_id == category_id)
        {
            return Err(CoreError::AlreadyVoted(category_id.to_string()));
        }

        let vote = Vote {
            user_id: user_id.to_string(),
            category_id: category_id.to_string(),
            candidate_id: candidate_id.to_string(),
            cast_at: Utc::now(),
        };
        inner.votes.push(vote.clone());
        Ok(vote)
    }

    async fn list_votes(&self) -> CoreResult<Vec<Vote>> {
        Ok(self.inner.read().await.votes.clone())
    }

    async fn votes_by_user(&self, user_id: &str) -> CoreResult<Vec<Vote>> {
        let inner = self.inner.read().await;
        Ok(inner
            .votes
            .iter()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn leadership_revealed(&self) -> CoreResult<bool> {
        Ok(self.inner.read().await.leadership_revealed)
    }

    async fn set_leadership_revealed(&self, revealed: bool) -> CoreResult<()> {
        self.inner.write().await.leadership_revealed = revealed;
        Ok(())
    }
}

//! Ballot persistence boundary.
//!
//! [`BallotStore`] is the only way the server reaches users, categories,
//! candidates, votes, and the leadership-reveal flag. [`MemoryStore`] keeps
//! everything in process memory.

mod memory;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::identifier::IdentifierKind;
use crate::model::{Candidate, Category, NewUser, Role, User, Vote};

pub use memory::MemoryStore;

/// A user together with their password hash. Stays on the server.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait BallotStore: Send + Sync {
    // -- Users ---

    /// Inserts a user. `new_user` must already be normalised.
    async fn create_user(
        &self,
        new_user: NewUser,
        password_hash: String,
        role: Role,
    ) -> CoreResult<User>;

    async fn find_by_identifier(
        &self,
        kind: IdentifierKind,
        value: &str,
    ) -> CoreResult<Option<StoredUser>>;

    async fn get_user(&self, id: &str) -> CoreResult<User>;

    // -- Catalog ---

    /// Inserts or replaces a category, keeping its original position.
    async fn upsert_category(&self, category: Category) -> CoreResult<Category>;

    /// Inserts or replaces a candidate. The category must exist.
    async fn upsert_candidate(&self, candidate: Candidate) -> CoreResult<Candidate>;

    /// Categories in insertion order.
    async fn list_categories(&self) -> CoreResult<Vec<Category>>;

    async fn list_candidates(&self, category_id: Option<&str>) -> CoreResult<Vec<Candidate>>;

    // -- Votes ---

    /// Records a vote after checking that the category accepts votes, the
    /// candidate belongs to it, and the user has not voted there yet.
    async fn cast_vote(&self, user_id: &str, category_id: &str, candidate_id: &str)
        -> CoreResult<Vote>;

    async fn list_votes(&self) -> CoreResult<Vec<Vote>>;

    async fn votes_by_user(&self, user_id: &str) -> CoreResult<Vec<Vote>>;

    // -- Leadership prize ---

    async fn leadership_revealed(&self) -> CoreResult<bool>;

    async fn set_leadership_revealed(&self, revealed: bool) -> CoreResult<()>;
}

use palmares_core::{Candidate, Category, User};
use serde::{Deserialize, Serialize};

/// Login body. Exactly one of `email` / `phone` is expected; `email` wins
/// when both are sent.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
    pub expires_at: u64,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub category_id: String,
    pub candidate_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryDto {
    #[serde(flatten)]
    pub category: Category,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub leadership_revealed: bool,
    pub categories: Vec<CategoryDto>,
}

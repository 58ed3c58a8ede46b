use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use palmares_core::{tally, Results, Vote};

use crate::auth::middleware::{AdminUser, AuthUser, MaybeUser};
use crate::dto::*;
use crate::error::AppError;
use crate::state::AppState;

/// Categories with their candidates. The leadership winner is hidden until
/// revealed, except from super admins.
pub async fn categories(
    viewer: MaybeUser,
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let revealed = state.store.leadership_revealed().await?;
    let is_admin = viewer
        .0
        .as_ref()
        .is_some_and(|u| u.role.is_super_admin());
    let mut candidates = state.store.list_candidates(None).await?;

    let categories = state
        .store
        .list_categories()
        .await?
        .into_iter()
        .map(|mut category| {
            if category.is_leadership_prize && !(revealed || is_admin) {
                category.winner = None;
            }
            let (own, rest): (Vec<_>, Vec<_>) = candidates
                .drain(..)
                .partition(|c| c.category_id == category.id);
            candidates = rest;
            CategoryDto {
                category,
                candidates: own,
            }
        })
        .collect();

    Ok(Json(CategoriesResponse {
        leadership_revealed: revealed,
        categories,
    }))
}

pub async fn cast_vote(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<VoteRequest>,
) -> Result<(StatusCode, Json<Vote>), AppError> {
    if state.access.is_blocked(chrono::Utc::now()) {
        return Err(AppError::Forbidden("Platform access is blocked".to_string()));
    }

    let vote = state
        .store
        .cast_vote(&user.user_id, &body.category_id, &body.candidate_id)
        .await?;
    tracing::info!(
        user_id = %user.user_id,
        category_id = %vote.category_id,
        "Vote cast"
    );
    Ok((StatusCode::CREATED, Json(vote)))
}

pub async fn my_votes(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Vote>>, AppError> {
    Ok(Json(state.store.votes_by_user(&user.user_id).await?))
}

pub async fn results(State(state): State<AppState>) -> Result<Json<Results>, AppError> {
    let categories = state.store.list_categories().await?;
    let candidates = state.store.list_candidates(None).await?;
    let votes = state.store.list_votes().await?;
    Ok(Json(tally(&categories, &candidates, &votes)))
}

pub async fn reveal_leadership(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.set_leadership_revealed(true).await?;
    tracing::info!(user_id = %admin.user_id, "Leadership prize revealed");
    Ok(Json(serde_json::json!({ "success": true, "leadership_revealed": true })))
}

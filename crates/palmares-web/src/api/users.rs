use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use palmares_core::{NewUser, Role, User};

use crate::auth::middleware::AuthUser;
use crate::auth::password;
use crate::error::AppError;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let mut new_user = body.normalized()?;
    let plain = std::mem::take(&mut new_user.password);
    let hash = password::hash_password_blocking(plain).await?;

    let user = state.store.create_user(new_user, hash, Role::Voter).await?;
    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn me(user: AuthUser, State(state): State<AppState>) -> Result<Json<User>, AppError> {
    Ok(Json(state.store.get_user(&user.user_id).await?))
}

use axum::extract::State;
use axum::Json;
use palmares_core::{AccessStatus, UnlockError};

use crate::auth::password;
use crate::dto::UnlockRequest;
use crate::error::AppError;
use crate::state::AppState;

pub async fn status(State(state): State<AppState>) -> Json<AccessStatus> {
    Json(state.access.status(chrono::Utc::now()))
}

pub async fn unlock(
    State(state): State<AppState>,
    Json(body): Json<UnlockRequest>,
) -> Result<Json<AccessStatus>, AppError> {
    let code = body.code.trim().to_string();
    if code.is_empty() {
        return Err(AppError::BadRequest("Activation code is required".to_string()));
    }

    let gate = state.access.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        gate.unlock(&code, |hash, code| {
            password::verify_password(hash, code).unwrap_or_else(|e| {
                tracing::error!("Activation code hash is unusable: {e:#}");
                false
            })
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    match outcome {
        Ok(()) => Ok(Json(state.access.status(chrono::Utc::now()))),
        Err(UnlockError::WrongCode) => Err(AppError::Auth("Invalid activation code".to_string())),
        Err(UnlockError::NotConfigured) => Err(AppError::Forbidden(
            "Access cannot be unlocked with a code".to_string(),
        )),
    }
}

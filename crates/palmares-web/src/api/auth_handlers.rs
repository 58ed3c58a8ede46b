use std::time::Instant;

use axum::extract::State;
use axum::Json;
use palmares_core::IdentifierKind;

use crate::auth::middleware::AuthUser;
use crate::auth::{jwt, password};
use crate::dto::*;
use crate::error::AppError;
use crate::state::AppState;

/// Picks the identifier the caller sent; blank fields count as absent.
fn identifier(body: &LoginRequest) -> Option<(IdentifierKind, String)> {
    let present = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    present(&body.email)
        .map(|e| (IdentifierKind::Email, IdentifierKind::Email.normalize(&e)))
        .or_else(|| {
            present(&body.phone)
                .map(|p| (IdentifierKind::Phone, IdentifierKind::Phone.normalize(&p)))
        })
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (kind, value) = identifier(&body)
        .ok_or_else(|| AppError::BadRequest("Email or phone is required".to_string()))?;
    if body.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    let Some(stored) = state.store.find_by_identifier(kind, &value).await? else {
        tracing::warn!(%kind, "Failed login attempt: unknown identifier");
        return Err(AppError::Auth("Invalid credentials".to_string()));
    };

    let valid =
        password::verify_password_blocking(stored.password_hash.clone(), body.password).await?;
    if !valid {
        tracing::warn!(user_id = %stored.user.id, "Failed login attempt: invalid password");
        return Err(AppError::Auth("Invalid credentials".to_string()));
    }

    let (token, expires_at) = jwt::create_token(
        &state.config.auth.jwt_secret,
        state.config.auth.jwt_ttl_hours,
        &stored.user.id,
        stored.user.role,
    )?;

    tracing::info!(user_id = %stored.user.id, %kind, "Login successful");
    Ok(Json(LoginResponse {
        user: stored.user,
        token,
        expires_at,
    }))
}

pub async fn logout(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.revoked_tokens.insert(user.jti, Instant::now());
    tracing::info!(user_id = %user.user_id, "Logged out, token revoked");
    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: Option<&str>, phone: Option<&str>) -> LoginRequest {
        LoginRequest {
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            password: "x".to_string(),
        }
    }

    #[test]
    fn email_is_normalized() {
        let (kind, value) = identifier(&request(Some(" Awa@Example.ML "), None)).unwrap();
        assert_eq!(kind, IdentifierKind::Email);
        assert_eq!(value, "awa@example.ml");
    }

    #[test]
    fn blank_email_falls_back_to_phone() {
        let (kind, value) = identifier(&request(Some("  "), Some(" +22370000000 "))).unwrap();
        assert_eq!(kind, IdentifierKind::Phone);
        assert_eq!(value, "+22370000000");
    }

    #[test]
    fn nothing_sent_is_none() {
        assert!(identifier(&request(None, Some(""))).is_none());
    }
}

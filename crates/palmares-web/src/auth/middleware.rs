use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use palmares_core::Role;

use crate::error::AppError;
use crate::state::AppState;

/// A caller holding a valid, unrevoked bearer token.
pub struct AuthUser {
    pub user_id: String,
    pub role: Role,
    pub jti: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))?;

        let claims = super::jwt::verify_token(&state.config.auth.jwt_secret, token)
            .map_err(|_| AppError::Auth("Invalid or expired token".to_string()))?;

        if state.revoked_tokens.contains_key(&claims.jti) {
            return Err(AppError::Auth("Token has been revoked".to_string()));
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            jti: claims.jti,
        })
    }
}

/// Like [`AuthUser`], but only for super admins.
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_super_admin() {
            tracing::warn!(user_id = %user.user_id, "admin route refused");
            return Err(AppError::Forbidden("Super admin role required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

/// Resolves an optional bearer token. Anonymous callers and callers with
/// a revoked, expired or malformed token get `None`.
pub struct MaybeUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key("authorization") {
            return Ok(MaybeUser(None));
        }
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(e) => {
                tracing::debug!(?e, "ignoring unusable bearer token on public route");
                Ok(MaybeUser(None))
            }
        }
    }
}

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use usermanager_auth::{Claims, verify_token};
use usermanager_core::AppError;

use crate::modules::roles::model::ADMIN_ROLE;
use crate::state::AppState;

/// Extractor that validates the bearer token and yields its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }

    /// Roles are read from the token, so they reflect the state at login.
    pub fn is_admin(&self) -> bool {
        self.0.has_role(ADMIN_ROLE)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token.trim(), &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Like [`AuthUser`], but rejects callers without the admin role with 403.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_admin() {
            return Err(AppError::forbidden(format!(
                "Access denied. Required role: {}",
                ADMIN_ROLE
            )));
        }

        Ok(RequireAdmin(auth_user))
    }
}

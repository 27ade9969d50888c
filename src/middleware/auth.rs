//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{constants::roles, error::AppError, services::AuthService, state::AppState};

/// Authenticated user extracted from the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub session_id: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }

    /// Fail with 403 unless the user holds one of `allowed` roles
    pub fn require_role(&self, allowed: &[&str]) -> Result<(), AppError> {
        if allowed.contains(&self.role.as_str()) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        self.require_role(&[roles::ADMIN])
    }

    /// Admin or contributor
    pub fn require_editor(&self) -> Result<(), AppError> {
        self.require_role(roles::EDITORS)
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Session token from an `Authorization: Bearer` header or the session cookie
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        return Some(token.trim().to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(token) = session_token(request.headers(), &state.config().session.cookie_name) else {
        debug!(path = %path, "Auth failed: no session token");
        return Err(AppError::Unauthorized);
    };

    let claims = AuthService::verify_token(&token, &state.config().session.secret).map_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: token verification failed");
        e
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        debug!(path = %path, sub = %claims.sub, error = ?e, "Auth failed: invalid user ID in token");
        AppError::InvalidToken
    })?;

    if !AuthService::session_is_active(state.redis(), &claims.jti).await? {
        debug!(path = %path, user_id = %user_id, "Auth failed: session revoked or expired");
        return Err(AppError::InvalidToken);
    }

    let user = AuthenticatedUser {
        id: user_id,
        email: claims.email,
        role: claims.role,
        session_id: claims.jti,
    };

    debug!(path = %path, user_id = %user.id, role = %user.role, "User authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "user@school.test".to_string(),
            role: role.to_string(),
            session_id: "s".to_string(),
        }
    }

    #[test]
    fn test_bearer_token_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(COOKIE, HeaderValue::from_static("session=xyz"));
        assert_eq!(session_token(&headers, "session").as_deref(), Some("abc"));
    }

    #[test]
    fn test_cookie_token() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; session=xyz; lang=hu"));
        assert_eq!(session_token(&headers, "session").as_deref(), Some("xyz"));
        assert_eq!(session_token(&headers, "other"), None);
    }

    #[test]
    fn test_empty_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session="));
        assert_eq!(session_token(&headers, "session"), None);
        assert_eq!(session_token(&HeaderMap::new(), "session"), None);
    }

    #[test]
    fn test_role_requirements() {
        assert!(user(roles::ADMIN).require_admin().is_ok());
        assert!(user(roles::CONTRIBUTOR).require_admin().is_err());
        assert!(user(roles::CONTRIBUTOR).require_editor().is_ok());
        assert!(matches!(
            user(roles::VIEWER).require_editor(),
            Err(AppError::Forbidden(_))
        ));
    }
}

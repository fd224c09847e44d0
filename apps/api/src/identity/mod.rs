//! Resolves the calling user from the identity provider's session.
//!
//! Sessions are issued elsewhere; this module only looks them up.

#[cfg(test)]
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;
use sqlx::PgPool;
use tracing::warn;

use crate::errors::AppError;
use crate::models::user::CurrentUser;
use crate::state::AppState;

#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// The user owning a live session, or `None` for unknown or expired tokens.
    async fn resolve_session(&self, token: &str) -> Result<Option<CurrentUser>>;
}

pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        PgIdentityStore { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn resolve_session(&self, token: &str) -> Result<Option<CurrentUser>> {
        Ok(sqlx::query_as::<_, CurrentUser>(
            r#"
            SELECT u.id, u.email
            FROM user_sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?)
    }
}

/// Bearer token first, then the session cookie.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers, &state.config.session_cookie) else {
            warn!("Session token missing, authentication denied");
            return Err(AppError::Unauthorized);
        };

        match state.identity.resolve_session(&token).await? {
            Some(user) => Ok(user),
            None => {
                warn!("Session token unknown or expired, authentication denied");
                Err(AppError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_bearer_token() {
        let h = headers(&[(AUTHORIZATION, "Bearer abc123")]);
        assert_eq!(session_token(&h, "sid").as_deref(), Some("abc123"));
    }

    #[test]
    fn test_cookie_token() {
        let h = headers(&[(COOKIE, "theme=dark; sid=cookie-token")]);
        assert_eq!(session_token(&h, "sid").as_deref(), Some("cookie-token"));
    }

    #[test]
    fn test_bearer_wins_over_cookie() {
        let h = headers(&[(AUTHORIZATION, "Bearer header"), (COOKIE, "sid=cookie")]);
        assert_eq!(session_token(&h, "sid").as_deref(), Some("header"));
    }

    #[test]
    fn test_non_bearer_scheme_falls_back_to_cookie() {
        let h = headers(&[(AUTHORIZATION, "Basic dXNlcjpwYXNz"), (COOKIE, "sid=cookie")]);
        assert_eq!(session_token(&h, "sid").as_deref(), Some("cookie"));
    }

    #[test]
    fn test_missing_or_empty() {
        assert_eq!(session_token(&HeaderMap::new(), "sid"), None);
        let h = headers(&[(AUTHORIZATION, "Bearer "), (COOKIE, "sid=")]);
        assert_eq!(session_token(&h, "sid"), None);
    }
}

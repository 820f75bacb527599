//! Bearer-token guard for the equipment routes.
//!
//! Only checks that the `Authorization` header carries the configured
//! token. Issuing and rotating tokens happens outside this service.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Expected bearer token, if any.
#[derive(Clone, Default)]
pub struct BearerAuth {
    token: Option<Arc<str>>,
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl BearerAuth {
    /// Creates a guard. `None` admits every request.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.map(Arc::from),
        }
    }

    /// Returns `true` if a token is required.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }

    /// Checks the `Authorization` header against the expected token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] if a token is required and the
    /// header is missing, malformed, or carries a different token.
    pub fn verify(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let Some(expected) = self.token.as_deref() else {
            return Ok(());
        };
        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim);
        match presented {
            Some(token) if constant_time_eq(token.as_bytes(), expected.as_bytes()) => Ok(()),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Middleware rejecting requests without the configured bearer token.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when [`BearerAuth::verify`] fails.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(err) = state.auth.verify(request.headers()) {
        tracing::debug!(path = %request.uri().path(), "rejected unauthenticated request");
        return Err(err);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn disabled_guard_admits_everything() {
        let auth = BearerAuth::new(None);
        assert!(!auth.is_enabled());
        assert!(auth.verify(&HeaderMap::new()).is_ok());
    }

    #[test]
    fn matching_token_is_accepted() {
        let auth = BearerAuth::new(Some("abc123".to_string()));
        assert!(auth.verify(&headers_with("Bearer abc123")).is_ok());
    }

    #[test]
    fn missing_or_wrong_token_is_rejected() {
        let auth = BearerAuth::new(Some("abc123".to_string()));
        assert!(matches!(
            auth.verify(&HeaderMap::new()),
            Err(ApiError::Unauthorized)
        ));
        assert!(auth.verify(&headers_with("Bearer abc124")).is_err());
        assert!(auth.verify(&headers_with("Basic abc123")).is_err());
        assert!(auth.verify(&headers_with("Bearer abc1234")).is_err());
    }
}

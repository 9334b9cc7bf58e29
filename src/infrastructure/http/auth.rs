//! Bearer token extractor
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn handler(AuthUser(user): AuthUser) -> impl IntoResponse {
//!     format!("User ID: {user}")
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::error::ApiError;
use crate::application::error::ServiceError;
use crate::application::services::AuthService;
use crate::domain::value_objects::UserId;
use crate::infrastructure::state::AppState;

/// The user a request's bearer token was issued to
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError(ServiceError::Unauthenticated))?;
        let user = state.auth_service.authenticate(token)?;
        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::TokenPort;
    use crate::infrastructure::auth::JwtTokenService;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn whoami(AuthUser(user): AuthUser) -> String {
        user.to_string()
    }

    async fn app() -> Router {
        let state = Arc::new(AppState::for_tests().await.unwrap());
        Router::new().route("/", get(whoami)).with_state(state)
    }

    fn request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn valid_token_yields_its_user() {
        let user = UserId::new();
        let issued = JwtTokenService::new("test-secret", 1).issue(user).unwrap();

        let response = app()
            .await
            .oneshot(request(Some(&format!("Bearer {}", issued.token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], user.to_string().as_bytes());
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let response = app().await.oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_signed_elsewhere_is_unauthorized() {
        let issued = JwtTokenService::new("other-secret", 1)
            .issue(UserId::new())
            .unwrap();
        let response = app()
            .await
            .oneshot(request(Some(&format!("Bearer {}", issued.token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn other_schemes_are_unauthorized() {
        let response = app()
            .await
            .oneshot(request(Some("Basic dXNlcjpwYXNz")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

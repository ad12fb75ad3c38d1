//! Authentication Middleware
//! Mission: Protect review writes with bearer token validation

use crate::auth::jwt::JwtHandler;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Auth middleware that validates JWT tokens.
///
/// On success the verified [`Claims`](crate::auth::Claims) are inserted into
/// the request extensions. The token is trusted as-is; the user store is not
/// consulted again.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AuthError::MissingToken)?;

    let claims = jwt_handler.verify_token(bearer.token()).map_err(|e| {
        debug!("Rejected bearer token: {:#}", e);
        AuthError::InvalidOrExpired
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Auth error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidOrExpired,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Access token required"),
            AuthError::InvalidOrExpired => (StatusCode::FORBIDDEN, "Invalid or expired token"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;
    use axum::{
        body::Body, http::header, http::Request as HttpRequest, middleware, routing::get,
        Extension, Router,
    };
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    fn protected_app(jwt: Arc<JwtHandler>) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|Extension(claims): Extension<Claims>| async move { claims.username }),
            )
            .route_layer(middleware::from_fn_with_state(jwt, auth_middleware))
    }

    fn request(auth: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_auth_error_responses() {
        let missing = AuthError::MissingToken.into_response();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let invalid = AuthError::InvalidOrExpired.into_response();
        assert_eq!(invalid.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let jwt = Arc::new(JwtHandler::new("secret".to_string()));

        let response = protected_app(jwt).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let jwt = Arc::new(JwtHandler::new("secret".to_string()));

        let response = protected_app(jwt)
            .oneshot(request(Some("Basic cmVhZGVyOnBhc3M=")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_token_is_forbidden() {
        let jwt = Arc::new(JwtHandler::new("secret".to_string()));

        let response = protected_app(jwt)
            .oneshot(request(Some("Bearer not.a.token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_expired_token_is_forbidden() {
        let jwt = Arc::new(JwtHandler::new("secret".to_string()));
        let token = jwt
            .issue_token_at("reader", Utc::now() - Duration::hours(3))
            .unwrap();

        let response = protected_app(jwt)
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_valid_token_attaches_identity() {
        let jwt = Arc::new(JwtHandler::new("secret".to_string()));
        let token = jwt.issue_token("reader").unwrap();

        let response = protected_app(jwt)
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], b"reader");
    }
}

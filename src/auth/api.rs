//! Authentication API Endpoints
//! Mission: Provide registration and login endpoints

use crate::{
    api::json_or_default,
    auth::{
        jwt::JwtHandler,
        models::{CredentialsRequest, LoginResponse},
        user_store::UserStore,
    },
    error::ApiError,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Register endpoint - POST /register
pub async fn register(
    State(state): State<AuthState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = json_or_default(payload);

    state.user_store.register(
        payload.username.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// Login endpoint - POST /login
pub async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let payload = json_or_default(payload);
    let username = payload.username.as_deref().unwrap_or_default();
    let password = payload.password.as_deref().unwrap_or_default();

    info!("🔐 Login attempt: {}", username);

    let user = state
        .user_store
        .authenticate(username, password)
        .map_err(|e| {
            warn!("❌ Failed login attempt: {} ({})", username, e);
            e
        })?;

    let token = state.jwt_handler.issue_token(&user.username)?;

    info!("✅ Login successful: {}", user.username);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        username: user.username,
    }))
}

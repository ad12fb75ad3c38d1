//! HTTP API
//! Mission: Route catalogue, review, and account requests to their handlers

pub mod books;
pub mod reviews;
pub mod routes;

use crate::{
    auth::{api::AuthState, JwtHandler, UserStore},
    catalog::CatalogStore,
};
use axum::{
    extract::{rejection::JsonRejection, FromRef},
    Json,
};
use std::sync::Arc;
use tracing::debug;

pub use routes::create_router;

/// Application state shared by every handler.
///
/// Built once at process start and handed to the router; there is no other
/// global state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(
        catalog: Arc<CatalogStore>,
        user_store: Arc<UserStore>,
        jwt: Arc<JwtHandler>,
    ) -> Self {
        Self {
            catalog,
            auth: AuthState::new(user_store, jwt),
        }
    }

    /// Seeded catalogue, no users, tokens signed with `jwt_secret`
    pub fn seeded(jwt_secret: &str) -> Self {
        Self::new(
            Arc::new(CatalogStore::seeded()),
            Arc::new(UserStore::new()),
            Arc::new(JwtHandler::new(jwt_secret.to_string())),
        )
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<CatalogStore> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

/// Treat an absent or malformed JSON body as an empty object, so that field
/// validation decides the outcome instead of the extractor.
pub(crate) fn json_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!("Request body ignored: {}", rejection);
            T::default()
        }
    }
}

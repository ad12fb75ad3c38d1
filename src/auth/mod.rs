//! Authentication Module
//! Mission: Register users, issue bearer tokens, and gate review writes

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod user_store;

pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use models::Claims;
pub use user_store::UserStore;

//! User Storage
//! Mission: Keep registered accounts in memory and check credentials

use crate::auth::models::User;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

/// Registration and login errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserStoreError {
    #[error("Username and password required")]
    MissingCredentials,
    #[error("User already exists")]
    UserExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// User storage keyed by username
#[derive(Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    /// Get user by username
    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.read().get(username).cloned()
    }

    /// Create a new user; an existing account is never overwritten
    pub fn register(&self, username: &str, password: &str) -> Result<User, UserStoreError> {
        if username.is_empty() || password.is_empty() {
            return Err(UserStoreError::MissingCredentials);
        }

        let mut users = self.users.write();
        if users.contains_key(username) {
            warn!("Registration rejected, username taken: {}", username);
            return Err(UserStoreError::UserExists);
        }

        let user = User {
            username: username.to_string(),
            password: password.to_string(),
        };
        users.insert(user.username.clone(), user.clone());

        info!("✅ Registered user: {}", user.username);
        Ok(user)
    }

    /// Verify username and password
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, UserStoreError> {
        if username.is_empty() || password.is_empty() {
            return Err(UserStoreError::MissingCredentials);
        }

        match self.users.read().get(username) {
            Some(user) if user.password == password => Ok(user.clone()),
            _ => Err(UserStoreError::InvalidCredentials),
        }
    }
}

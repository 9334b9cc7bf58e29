//! Authentication ports - Credential hashing and bearer tokens

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::value_objects::UserId;

/// One-way password hashing
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasherPort: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;

    /// Whether `password` matches a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// A signed bearer token and its expiry
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and checks bearer tokens carrying a user id
#[cfg_attr(test, mockall::automock)]
pub trait TokenPort: Send + Sync {
    fn issue(&self, user: UserId) -> Result<IssuedToken>;

    /// The user a token was issued to; `None` for bad or expired tokens
    fn verify(&self, token: &str) -> Option<UserId>;
}

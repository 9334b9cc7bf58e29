//! User entity - An account that owns projects and asset libraries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Theme, UserId, UserRole};

/// A registered account
///
/// The password is only ever held as an argon2 PHC string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Lower-cased, unique across all users
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            password_hash: password_hash.into(),
            name: name.into(),
            role: UserRole::User,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn update_preferences(&mut self, preferences: UserPreferences, now: DateTime<Utc>) {
        self.preferences = preferences;
        self.updated_at = now;
    }
}

/// Per-user editor preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub notifications: bool,
    pub vr_controls: VrControls,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            notifications: true,
            vr_controls: VrControls::default(),
        }
    }
}

/// Movement tuning for the VR viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VrControls {
    pub movement_speed: f64,
    pub rotation_speed: f64,
    pub snap_to_grid: bool,
    pub grid_size: f64,
}

impl Default for VrControls {
    fn default() -> Self {
        Self {
            movement_speed: 1.0,
            rotation_speed: 1.0,
            snap_to_grid: true,
            grid_size: 0.5,
        }
    }
}

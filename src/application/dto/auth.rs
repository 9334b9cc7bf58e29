use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{User, UserPreferences};
use crate::domain::value_objects::{UserId, UserRole};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequestDto {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequestDto {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePreferencesRequestDto {
    pub theme: Option<String>,
    pub notifications: Option<bool>,
    pub vr_controls: Option<VrControlsDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VrControlsDto {
    pub movement_speed: Option<f64>,
    pub rotation_speed: Option<f64>,
    pub snap_to_grid: Option<bool>,
    pub grid_size: Option<f64>,
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            preferences: user.preferences,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponseDto {
    pub token: String,
    pub user: UserResponseDto,
}

use once_cell::sync::Lazy;
use regex::Regex;

use super::{choice, positive, reject_empty_patch, text, Violations};
use crate::application::dto::{LoginRequestDto, RegisterRequestDto, UpdatePreferencesRequestDto};
use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::entities::UserPreferences;
use crate::domain::value_objects::Theme;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;
const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const EMAIL_MAX: usize = 254;

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// Lower-cased
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesPatch {
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
    pub movement_speed: Option<f64>,
    pub rotation_speed: Option<f64>,
    pub snap_to_grid: Option<bool>,
    pub grid_size: Option<f64>,
}

impl PreferencesPatch {
    pub fn apply(&self, prefs: &mut UserPreferences) {
        if let Some(theme) = self.theme {
            prefs.theme = theme;
        }
        if let Some(notifications) = self.notifications {
            prefs.notifications = notifications;
        }
        if let Some(speed) = self.movement_speed {
            prefs.vr_controls.movement_speed = speed;
        }
        if let Some(speed) = self.rotation_speed {
            prefs.vr_controls.rotation_speed = speed;
        }
        if let Some(snap) = self.snap_to_grid {
            prefs.vr_controls.snap_to_grid = snap;
        }
        if let Some(size) = self.grid_size {
            prefs.vr_controls.grid_size = size;
        }
    }
}

fn email(v: &mut Violations, value: Option<&str>) -> Option<String> {
    let raw = text(v, "email", value, true, 3, EMAIL_MAX)?;
    if EMAIL.is_match(&raw) {
        Some(raw.to_lowercase())
    } else {
        v.push("email", "must be a valid email address");
        None
    }
}

pub fn validate_registration(dto: &RegisterRequestDto) -> ServiceResult<Registration> {
    let mut v = Violations::new();

    let email = email(&mut v, dto.email.as_deref());
    let password = match dto.password.as_deref() {
        None => {
            v.push("password", "is required");
            None
        }
        Some(p) if p.chars().count() < PASSWORD_MIN => {
            v.push("password", format!("must be at least {PASSWORD_MIN} characters"));
            None
        }
        Some(p) if p.chars().count() > PASSWORD_MAX => {
            v.push("password", format!("must be at most {PASSWORD_MAX} characters"));
            None
        }
        Some(p) => Some(p.to_string()),
    };
    let name = text(&mut v, "name", dto.name.as_deref(), true, NAME_MIN, NAME_MAX);

    v.finish(())?;
    let (Some(email), Some(password), Some(name)) = (email, password, name) else {
        return Err(ServiceError::invalid("body", "incomplete registration"));
    };
    Ok(Registration {
        email,
        password,
        name,
    })
}

pub fn validate_login(dto: &LoginRequestDto) -> ServiceResult<LoginInput> {
    let mut v = Violations::new();

    let email = email(&mut v, dto.email.as_deref());
    let password = match dto.password.as_deref() {
        Some(p) if !p.is_empty() => Some(p.to_string()),
        _ => {
            v.push("password", "is required");
            None
        }
    };

    v.finish(())?;
    let (Some(email), Some(password)) = (email, password) else {
        return Err(ServiceError::invalid("body", "incomplete credentials"));
    };
    Ok(LoginInput { email, password })
}

pub fn validate_preferences_patch(
    dto: &UpdatePreferencesRequestDto,
) -> ServiceResult<PreferencesPatch> {
    let mut v = Violations::new();
    reject_empty_patch(
        &mut v,
        dto.theme.is_none() && dto.notifications.is_none() && dto.vr_controls.is_none(),
    );

    let theme = choice(
        &mut v,
        "theme",
        dto.theme.as_deref(),
        false,
        Theme::parse,
        Theme::VALUES,
    );
    let controls = dto.vr_controls.clone().unwrap_or_default();
    let patch = PreferencesPatch {
        theme,
        notifications: dto.notifications,
        movement_speed: positive(
            &mut v,
            "vrControls.movementSpeed",
            controls.movement_speed,
            false,
        ),
        rotation_speed: positive(
            &mut v,
            "vrControls.rotationSpeed",
            controls.rotation_speed,
            false,
        ),
        snap_to_grid: controls.snap_to_grid,
        grid_size: positive(&mut v, "vrControls.gridSize", controls.grid_size, false),
    };

    v.finish(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::VrControlsDto;

    #[test]
    fn registration_lowercases_email() {
        let reg = validate_registration(&RegisterRequestDto {
            email: Some("Ada@Example.COM".to_string()),
            password: Some("correct horse".to_string()),
            name: Some("Ada".to_string()),
        })
        .expect("valid");
        assert_eq!(reg.email, "ada@example.com");
    }

    #[test]
    fn short_password_and_bad_email_are_reported() {
        let err = validate_registration(&RegisterRequestDto {
            email: Some("not-an-email".to_string()),
            password: Some("short".to_string()),
            name: Some("Ada".to_string()),
        })
        .unwrap_err();
        let ServiceError::InvalidInput(violations) = err else {
            panic!("expected InvalidInput");
        };
        let fields: Vec<_> = violations.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn preferences_patch_touches_only_given_controls() {
        let patch = validate_preferences_patch(&UpdatePreferencesRequestDto {
            vr_controls: Some(VrControlsDto {
                grid_size: Some(0.25),
                ..Default::default()
            }),
            ..Default::default()
        })
        .expect("valid");

        let mut prefs = UserPreferences::default();
        patch.apply(&mut prefs);
        assert_eq!(prefs.vr_controls.grid_size, 0.25);
        assert_eq!(prefs.vr_controls.movement_speed, 1.0);
        assert_eq!(prefs.theme, Theme::System);
    }

    #[test]
    fn non_positive_speeds_are_rejected() {
        let err = validate_preferences_patch(&UpdatePreferencesRequestDto {
            vr_controls: Some(VrControlsDto {
                movement_speed: Some(0.0),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert!(matches!(err, Err(ServiceError::InvalidInput(_))));
    }
}

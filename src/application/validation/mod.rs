//! Validation layer - Pure checks turning request DTOs into typed inputs
//!
//! Every validator walks the whole payload and reports all violations at
//! once through [`ServiceError::InvalidInput`]. Nothing here touches storage.

mod asset_library;
mod furniture;
mod project;
mod query;
mod room;
mod user;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::dto::{DimensionsDto, Vector3Dto};
use crate::application::error::{FieldViolation, ServiceError, ServiceResult};
use crate::domain::value_objects::{Dimensions, Vector3};

pub use asset_library::{validate_new_asset, validate_new_asset_library};
pub use furniture::{
    check_furniture_type, validate_furniture_patch, validate_new_furniture, FurniturePatch,
    NewFurniture,
};
pub use project::{
    validate_new_project, validate_project_patch, DimensionsPatch, NewProject, ProjectPatch,
    SettingsPatch,
};
pub use query::{validate_list_query, ProjectListQuery, ProjectSortKey, SortOrder};
pub use room::{check_room_type, validate_new_room, validate_room_patch};
pub use user::{validate_login, validate_preferences_patch, validate_registration};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("valid regex"));

static OBJECT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("valid regex"));

/// Accumulates field violations for one payload
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when nothing was rejected
    pub fn finish<T>(self, value: T) -> ServiceResult<T> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ServiceError::InvalidInput(self.0))
        }
    }
}

/// Join a parent path and a child field with a dot
pub(crate) fn path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Rejects an update that carries nothing to change
pub(crate) fn reject_empty_patch(v: &mut Violations, is_empty: bool) {
    if is_empty {
        v.push("body", "at least one field must be provided");
    }
}

/// A trimmed string whose length in characters lies in `min..=max`
pub(crate) fn text(
    v: &mut Violations,
    field: &str,
    value: Option<&str>,
    required: bool,
    min: usize,
    max: usize,
) -> Option<String> {
    let Some(raw) = value else {
        if required {
            v.push(field, "is required");
        }
        return None;
    };
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len < min {
        v.push(field, format!("must be at least {min} characters"));
        None
    } else if len > max {
        v.push(field, format!("must be at most {max} characters"));
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A finite number strictly greater than zero
pub(crate) fn positive(
    v: &mut Violations,
    field: &str,
    value: Option<f64>,
    required: bool,
) -> Option<f64> {
    match value {
        None => {
            if required {
                v.push(field, "is required");
            }
            None
        }
        Some(n) if n.is_finite() && n > 0.0 => Some(n),
        Some(_) => {
            v.push(field, "must be a positive number");
            None
        }
    }
}

/// A finite number in `min..=max`
pub(crate) fn in_range(
    v: &mut Violations,
    field: &str,
    value: Option<f64>,
    required: bool,
    min: f64,
    max: f64,
) -> Option<f64> {
    match value {
        None => {
            if required {
                v.push(field, "is required");
            }
            None
        }
        Some(n) if n.is_finite() && (min..=max).contains(&n) => Some(n),
        Some(_) => {
            v.push(field, format!("must be between {min} and {max}"));
            None
        }
    }
}

/// A finite number of any sign
pub(crate) fn finite(
    v: &mut Violations,
    field: &str,
    value: Option<f64>,
    required: bool,
) -> Option<f64> {
    match value {
        None => {
            if required {
                v.push(field, "is required");
            }
            None
        }
        Some(n) if n.is_finite() => Some(n),
        Some(_) => {
            v.push(field, "must be a finite number");
            None
        }
    }
}

/// A member of a closed value set
pub(crate) fn choice<T>(
    v: &mut Violations,
    field: &str,
    value: Option<&str>,
    required: bool,
    parse: fn(&str) -> Option<T>,
    allowed: &[&str],
) -> Option<T> {
    let Some(raw) = value else {
        if required {
            v.push(field, "is required");
        }
        return None;
    };
    match parse(raw) {
        Some(parsed) => Some(parsed),
        None => {
            v.push(field, format!("must be one of: {}", allowed.join(", ")));
            None
        }
    }
}

pub(crate) fn hex_color(v: &mut Violations, field: &str, value: Option<&str>) -> Option<String> {
    let raw = value?;
    if HEX_COLOR.is_match(raw) {
        Some(raw.to_string())
    } else {
        v.push(field, "must be a hex color like #RGB or #RRGGBB");
        None
    }
}

/// An http(s) URL; the empty string clears the field
pub(crate) fn web_url(v: &mut Violations, field: &str, value: Option<&str>) -> Option<String> {
    let raw = value?.trim();
    if raw.is_empty() {
        return Some(String::new());
    }
    match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(raw.to_string()),
        _ => {
            v.push(field, "must be an http or https URL");
            None
        }
    }
}

/// A 3D asset identifier: a UUID or a 24-hex object id
pub(crate) fn asset_reference(
    v: &mut Violations,
    field: &str,
    value: Option<&str>,
    required: bool,
) -> Option<String> {
    let Some(raw) = value else {
        if required {
            v.push(field, "is required");
        }
        return None;
    };
    if OBJECT_ID.is_match(raw) || uuid::Uuid::parse_str(raw).is_ok() {
        Some(raw.to_string())
    } else {
        v.push(field, "must be a valid asset identifier");
        None
    }
}

/// Short labels such as tags or styles
pub(crate) fn labels(
    v: &mut Violations,
    field: &str,
    value: Option<&[String]>,
    max: usize,
) -> Option<Vec<String>> {
    let items = value?;
    let mut out = Vec::with_capacity(items.len());
    let before = v.0.len();
    for (i, item) in items.iter().enumerate() {
        if let Some(label) = text(v, &format!("{field}.{i}"), Some(item), true, 1, max) {
            out.push(label);
        }
    }
    (v.0.len() == before).then_some(out)
}

/// Width, length and height, all required and positive
pub(crate) fn full_dimensions(
    v: &mut Violations,
    field: &str,
    value: Option<&DimensionsDto>,
) -> Option<Dimensions> {
    let Some(dims) = value else {
        v.push(field, "is required");
        return None;
    };
    let width = positive(v, &path(field, "width"), dims.width, true);
    let length = positive(v, &path(field, "length"), dims.length, true);
    let height = positive(v, &path(field, "height"), dims.height, true);
    Some(Dimensions::new(width?, length?, height?))
}

/// A vector whose components may take any finite value
pub(crate) fn point(
    v: &mut Violations,
    field: &str,
    value: Option<&Vector3Dto>,
    required: bool,
) -> Option<Vector3> {
    let Some(vec) = value else {
        if required {
            v.push(field, "is required");
        }
        return None;
    };
    let x = finite(v, &path(field, "x"), vec.x, true);
    let y = finite(v, &path(field, "y"), vec.y, true);
    let z = finite(v, &path(field, "z"), vec.z, true);
    Some(Vector3::new(x?, y?, z?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_accept_short_and_long_forms() {
        let mut v = Violations::new();
        assert_eq!(hex_color(&mut v, "c", Some("#fff")), Some("#fff".to_string()));
        assert_eq!(hex_color(&mut v, "c", Some("#A0B1C2")), Some("#A0B1C2".to_string()));
        assert!(v.is_empty());
        assert_eq!(hex_color(&mut v, "c", Some("red")), None);
        assert_eq!(hex_color(&mut v, "c", Some("#abcd")), None);
        assert_eq!(v.0.len(), 2);
    }

    #[test]
    fn asset_references_accept_uuid_and_object_id() {
        let mut v = Violations::new();
        assert!(asset_reference(&mut v, "model", Some("64b7f0c2a1b2c3d4e5f60718"), true).is_some());
        assert!(
            asset_reference(&mut v, "model", Some("2f1a3c0e-8d6b-4b5e-9a77-3f1d2c4b5a69"), true)
                .is_some()
        );
        assert!(v.is_empty());
        assert!(asset_reference(&mut v, "model", Some("chair.glb"), true).is_none());
        assert!(!v.is_empty());
    }

    #[test]
    fn urls_must_be_web_urls() {
        let mut v = Violations::new();
        assert_eq!(web_url(&mut v, "t", Some("")), Some(String::new()));
        assert!(web_url(&mut v, "t", Some("https://cdn.example.com/a.png")).is_some());
        assert!(v.is_empty());
        assert!(web_url(&mut v, "t", Some("ftp://example.com/a.png")).is_none());
        assert!(web_url(&mut v, "t", Some("not a url")).is_none());
        assert_eq!(v.0.len(), 2);
    }

    #[test]
    fn dimensions_report_every_bad_side() {
        let mut v = Violations::new();
        let dims = DimensionsDto {
            width: Some(0.0),
            length: None,
            height: Some(-1.0),
        };
        assert!(full_dimensions(&mut v, "dimensions", Some(&dims)).is_none());
        let fields: Vec<_> = v.0.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["dimensions.width", "dimensions.length", "dimensions.height"]
        );
    }

    #[test]
    fn text_length_counts_trimmed_characters() {
        let mut v = Violations::new();
        assert_eq!(text(&mut v, "n", Some("  ab "), true, 2, 5), Some("ab".to_string()));
        assert!(text(&mut v, "n", Some(" a "), true, 2, 5).is_none());
        assert!(text(&mut v, "n", None, true, 2, 5).is_none());
        assert!(text(&mut v, "n", None, false, 2, 5).is_none());
        assert_eq!(v.0.len(), 2);
    }
}

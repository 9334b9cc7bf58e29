use serde::Deserialize;

/// A 3-component vector as sent by clients; components may be missing
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vector3Dto {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

/// Width / length / height triple as sent by clients
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionsDto {
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub height: Option<f64>,
}

/// Pagination and ordering for list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryDto {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Flag for `POST /projects/{id}/duplicate`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DuplicateQueryDto {
    #[serde(default)]
    pub deep: bool,
}

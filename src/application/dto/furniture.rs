use serde::Deserialize;

use super::common::{DimensionsDto, Vector3Dto};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateFurnitureRequestDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub furniture_type: Option<String>,
    pub custom_type: Option<String>,
    pub model: Option<String>,
    pub dimensions: Option<DimensionsDto>,
    pub position: Option<Vector3Dto>,
    pub rotation: Option<Vector3Dto>,
    pub scale: Option<Vector3Dto>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub price: Option<f64>,
    pub manufacturer: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateFurnitureRequestDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub furniture_type: Option<String>,
    pub custom_type: Option<String>,
    pub model: Option<String>,
    pub dimensions: Option<DimensionsDto>,
    pub position: Option<Vector3Dto>,
    pub rotation: Option<Vector3Dto>,
    pub scale: Option<Vector3Dto>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub price: Option<f64>,
    pub manufacturer: Option<String>,
    pub notes: Option<String>,
    pub version: Option<u32>,
}

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAssetLibraryRequestDto {
    pub name: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAssetRequestDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<String>,
    pub category: Option<String>,
    pub model_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub dimensions: Option<AssetDimensionsDto>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetDimensionsDto {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
}

use super::{choice, labels, path, positive, text, web_url, Violations};
use crate::application::dto::{CreateAssetLibraryRequestDto, CreateAssetRequestDto};
use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::value_objects::{AssetDimensions, AssetType};

const NAME_MAX: usize = 100;
const CATEGORY_MAX: usize = 50;
const TAG_MAX: usize = 30;
const DEFAULT_CATEGORY: &str = "other";

#[derive(Debug, Clone, PartialEq)]
pub struct NewAssetLibrary {
    pub name: String,
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub name: String,
    pub asset_type: AssetType,
    pub category: String,
    pub model_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub dimensions: Option<AssetDimensions>,
    pub tags: Vec<String>,
}

pub fn validate_new_asset_library(
    dto: &CreateAssetLibraryRequestDto,
) -> ServiceResult<NewAssetLibrary> {
    let mut v = Violations::new();
    let name = text(&mut v, "name", dto.name.as_deref(), true, 2, NAME_MAX);
    v.finish(())?;
    let Some(name) = name else {
        return Err(ServiceError::invalid("name", "is required"));
    };
    Ok(NewAssetLibrary {
        name,
        is_public: dto.is_public.unwrap_or(false),
    })
}

pub fn validate_new_asset(dto: &CreateAssetRequestDto) -> ServiceResult<NewAsset> {
    let mut v = Violations::new();

    let name = text(&mut v, "name", dto.name.as_deref(), true, 1, NAME_MAX);
    let asset_type = choice(
        &mut v,
        "type",
        dto.asset_type.as_deref(),
        true,
        AssetType::parse,
        AssetType::VALUES,
    );
    let category = text(&mut v, "category", dto.category.as_deref(), false, 1, CATEGORY_MAX);
    let model_url = web_url(&mut v, "modelUrl", dto.model_url.as_deref());
    let thumbnail_url = web_url(&mut v, "thumbnailUrl", dto.thumbnail_url.as_deref());
    let dimensions = dto.dimensions.as_ref().and_then(|d| {
        let width = positive(&mut v, &path("dimensions", "width"), d.width, true);
        let height = positive(&mut v, &path("dimensions", "height"), d.height, true);
        let depth = positive(&mut v, &path("dimensions", "depth"), d.depth, true);
        Some(AssetDimensions {
            width: width?,
            height: height?,
            depth: depth?,
        })
    });
    let tags = labels(&mut v, "tags", dto.tags.as_deref(), TAG_MAX);

    v.finish(())?;
    let (Some(name), Some(asset_type)) = (name, asset_type) else {
        return Err(ServiceError::invalid("body", "incomplete asset"));
    };

    Ok(NewAsset {
        name,
        asset_type,
        category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        model_url: model_url.filter(|u| !u.is_empty()),
        thumbnail_url: thumbnail_url.filter(|u| !u.is_empty()),
        dimensions,
        tags: tags.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::AssetDimensionsDto;

    #[test]
    fn asset_category_defaults_to_other() {
        let asset = validate_new_asset(&CreateAssetRequestDto {
            name: Some("Oak floor".to_string()),
            asset_type: Some("texture".to_string()),
            ..Default::default()
        })
        .expect("valid");
        assert_eq!(asset.category, "other");
        assert_eq!(asset.asset_type, AssetType::Texture);
    }

    #[test]
    fn asset_dimensions_must_be_positive() {
        let err = validate_new_asset(&CreateAssetRequestDto {
            name: Some("Lamp".to_string()),
            asset_type: Some("lighting".to_string()),
            dimensions: Some(AssetDimensionsDto {
                width: Some(0.3),
                height: Some(-1.0),
                depth: Some(0.3),
            }),
            ..Default::default()
        })
        .unwrap_err();
        let ServiceError::InvalidInput(violations) = err else {
            panic!("expected InvalidInput");
        };
        assert_eq!(violations[0].field, "dimensions.height");
    }

    #[test]
    fn library_name_is_required() {
        assert!(validate_new_asset_library(&CreateAssetLibraryRequestDto::default()).is_err());
    }
}

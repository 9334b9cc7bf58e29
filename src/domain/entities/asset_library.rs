//! Asset library entity - A user's catalogue of reusable 3D assets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AssetDimensions, AssetId, AssetLibraryId, AssetType, UserId};

/// A named collection of asset descriptors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLibrary {
    pub id: AssetLibraryId,
    pub name: String,
    pub owner: UserId,
    pub is_public: bool,
    pub assets: Vec<Asset>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssetLibrary {
    pub fn new(owner: UserId, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: AssetLibraryId::new(),
            name: name.into(),
            owner,
            is_public: false,
            assets: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn is_visible_to(&self, user: UserId) -> bool {
        self.is_public || self.owner == user
    }

    pub fn add_asset(&mut self, asset: Asset, now: DateTime<Utc>) {
        self.assets.push(asset);
        self.updated_at = now;
    }

    /// Remove an asset; returns whether anything was removed
    pub fn remove_asset(&mut self, asset_id: AssetId, now: DateTime<Utc>) -> bool {
        let before = self.assets.len();
        self.assets.retain(|a| a.id != asset_id);
        let removed = self.assets.len() != before;
        if removed {
            self.updated_at = now;
        }
        removed
    }
}

/// Descriptor of one asset in a library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<AssetDimensions>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chair_asset() -> Asset {
        Asset {
            id: AssetId::new(),
            name: "Eames chair".to_string(),
            asset_type: AssetType::Furniture,
            category: "seating".to_string(),
            model_url: None,
            thumbnail_url: None,
            dimensions: None,
            tags: vec!["mid-century".to_string()],
        }
    }

    #[test]
    fn visibility_covers_owner_and_public() {
        let owner = UserId::new();
        let stranger = UserId::new();
        let library = AssetLibrary::new(owner, "Mine", Utc::now());
        assert!(library.is_visible_to(owner));
        assert!(!library.is_visible_to(stranger));
        assert!(library.with_visibility(true).is_visible_to(stranger));
    }

    #[test]
    fn remove_asset_reports_whether_it_removed() {
        let mut library = AssetLibrary::new(UserId::new(), "Mine", Utc::now());
        let asset = chair_asset();
        let asset_id = asset.id;
        library.add_asset(asset, Utc::now());

        assert!(library.remove_asset(asset_id, Utc::now()));
        assert!(!library.remove_asset(asset_id, Utc::now()));
        assert!(library.assets.is_empty());
    }
}

//! Project entity - The root of a room-design aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    AuditInfo, CollaboratorRole, Currency, Dimensions, ProjectId, ProjectStatus, Units, UserId,
};

/// Ceiling height used when a project is created without one, in meters
pub const DEFAULT_PROJECT_HEIGHT: f64 = 3.0;

/// A design project
///
/// A project is exclusively owned by one user. Its rooms are not stored on
/// the project: they are found by querying rooms whose `project` reference
/// points here, so the two sides cannot drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub owner: UserId,
    pub collaborators: Vec<Collaborator>,
    pub dimensions: Dimensions,
    pub settings: ProjectSettings,
    pub status: ProjectStatus,
    pub styles: Vec<String>,
    pub tags: Vec<String>,
    pub thumbnail: String,
    pub is_public: bool,
    pub budget: Option<Budget>,
    pub audit: AuditInfo,
}

impl Project {
    pub fn new(
        owner: UserId,
        name: impl Into<String>,
        dimensions: Dimensions,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            description: String::new(),
            owner,
            collaborators: Vec::new(),
            dimensions,
            settings: ProjectSettings::default(),
            status: ProjectStatus::Draft,
            styles: Vec::new(),
            tags: Vec::new(),
            thumbnail: String::new(),
            is_public: false,
            budget: None,
            audit: AuditInfo::new(owner, now),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_styles(mut self, styles: Vec<String>) -> Self {
        self.styles = styles;
        self
    }

    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// A fresh draft carrying over this project's design parameters
    ///
    /// Collaborators, status, thumbnail and visibility are not copied.
    pub fn duplicate(&self, owner: UserId, now: DateTime<Utc>) -> Project {
        let mut copy = Project::new(owner, format!("{} (Copy)", self.name), self.dimensions, now);
        copy.description = self.description.clone();
        copy.settings = self.settings.clone();
        copy.styles = self.styles.clone();
        copy.tags = self.tags.clone();
        copy.budget = self.budget.clone();
        copy
    }
}

/// Another user listed on a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub user: UserId,
    pub role: CollaboratorRole,
}

/// Editor settings for a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub units: Units,
    pub grid_snap: bool,
    pub grid_size: f64,
    pub wall_thickness: f64,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            units: Units::Metric,
            grid_snap: true,
            grid_size: 0.1,
            wall_thickness: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub amount: f64,
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_is_a_draft_stamped_by_its_owner() {
        let owner = UserId::new();
        let now = Utc::now();
        let project = Project::new(owner, "Loft", Dimensions::new(10.0, 8.0, 3.0), now);

        assert_eq!(project.status, ProjectStatus::Draft);
        assert_eq!(project.audit.created_at, project.audit.last_modified_at);
        assert_eq!(project.audit.created_by, owner);
        assert!(project.is_owned_by(owner));
        assert!(!project.is_owned_by(UserId::new()));
    }

    #[test]
    fn duplicate_copies_design_fields_only() {
        let owner = UserId::new();
        let mut original = Project::new(owner, "Loft", Dimensions::new(10.0, 8.0, 3.0), Utc::now())
            .with_description("Top floor")
            .with_styles(vec!["industrial".to_string()]);
        original.status = ProjectStatus::Completed;
        original.is_public = true;
        original.collaborators.push(Collaborator {
            user: UserId::new(),
            role: CollaboratorRole::Editor,
        });

        let copy = original.duplicate(owner, Utc::now());

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.name, "Loft (Copy)");
        assert_eq!(copy.description, "Top floor");
        assert_eq!(copy.styles, original.styles);
        assert_eq!(copy.dimensions, original.dimensions);
        assert_eq!(copy.status, ProjectStatus::Draft);
        assert!(!copy.is_public);
        assert!(copy.collaborators.is_empty());
        assert_eq!(copy.audit.version, 1);
    }
}

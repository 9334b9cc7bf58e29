use std::str::FromStr;

use super::{
    choice, full_dimensions, labels, path, positive, reject_empty_patch, text, web_url,
    Violations,
};
use crate::application::dto::{
    BudgetDto, CollaboratorDto, CreateProjectRequestDto, DimensionsDto, ProjectSettingsDto,
    UpdateProjectRequestDto,
};
use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::entities::{
    Budget, Collaborator, Project, ProjectSettings, DEFAULT_PROJECT_HEIGHT,
};
use crate::domain::value_objects::{
    CollaboratorRole, Currency, Dimensions, ProjectStatus, Units, UserId,
};

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 1000;
const LABEL_MAX: usize = 30;
const STYLE_MAX: usize = 50;

/// A validated project creation payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub dimensions: Dimensions,
    pub settings: ProjectSettings,
    pub status: ProjectStatus,
    pub styles: Vec<String>,
    pub tags: Vec<String>,
    pub thumbnail: String,
    pub is_public: bool,
    pub budget: Option<Budget>,
    pub collaborators: Vec<Collaborator>,
}

/// Partial settings; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub units: Option<Units>,
    pub grid_snap: Option<bool>,
    pub grid_size: Option<f64>,
    pub wall_thickness: Option<f64>,
}

impl SettingsPatch {
    pub fn apply(&self, settings: &mut ProjectSettings) {
        if let Some(units) = self.units {
            settings.units = units;
        }
        if let Some(grid_snap) = self.grid_snap {
            settings.grid_snap = grid_snap;
        }
        if let Some(grid_size) = self.grid_size {
            settings.grid_size = grid_size;
        }
        if let Some(wall_thickness) = self.wall_thickness {
            settings.wall_thickness = wall_thickness;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionsPatch {
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub height: Option<f64>,
}

impl DimensionsPatch {
    pub fn apply(&self, dims: &mut Dimensions) {
        if let Some(width) = self.width {
            dims.width = width;
        }
        if let Some(length) = self.length {
            dims.length = length;
        }
        if let Some(height) = self.height {
            dims.height = height;
        }
    }
}

/// A validated partial project update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub dimensions: Option<DimensionsPatch>,
    pub settings: Option<SettingsPatch>,
    pub status: Option<ProjectStatus>,
    pub styles: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub thumbnail: Option<String>,
    pub is_public: Option<bool>,
    pub budget: Option<Budget>,
    pub collaborators: Option<Vec<Collaborator>>,
    /// Version the client last saw
    pub expected_version: Option<u32>,
}

impl ProjectPatch {
    /// Merge into `project`; does not re-stamp the audit fields
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(dims) = self.dimensions {
            dims.apply(&mut project.dimensions);
        }
        if let Some(settings) = self.settings {
            settings.apply(&mut project.settings);
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(styles) = self.styles {
            project.styles = styles;
        }
        if let Some(tags) = self.tags {
            project.tags = tags;
        }
        if let Some(thumbnail) = self.thumbnail {
            project.thumbnail = thumbnail;
        }
        if let Some(is_public) = self.is_public {
            project.is_public = is_public;
        }
        if let Some(budget) = self.budget {
            project.budget = Some(budget);
        }
        if let Some(collaborators) = self.collaborators {
            project.collaborators = collaborators;
        }
    }
}

pub fn validate_new_project(dto: &CreateProjectRequestDto) -> ServiceResult<NewProject> {
    let mut v = Violations::new();

    let name = text(&mut v, "name", dto.name.as_deref(), true, NAME_MIN, NAME_MAX);
    let description = text(
        &mut v,
        "description",
        dto.description.as_deref(),
        false,
        0,
        DESCRIPTION_MAX,
    );
    let dimensions = dto.dimensions.as_ref().map(|d| DimensionsDto {
        height: d.height.or(Some(DEFAULT_PROJECT_HEIGHT)),
        ..*d
    });
    let dimensions = full_dimensions(&mut v, "dimensions", dimensions.as_ref());
    let settings = dto.settings.as_ref().map(|s| settings_patch(&mut v, s));
    let status = choice(
        &mut v,
        "status",
        dto.status.as_deref(),
        false,
        ProjectStatus::parse,
        ProjectStatus::VALUES,
    );
    let styles = labels(&mut v, "styles", dto.styles.as_deref(), STYLE_MAX);
    let tags = labels(&mut v, "tags", dto.tags.as_deref(), LABEL_MAX);
    let thumbnail = web_url(&mut v, "thumbnail", dto.thumbnail.as_deref());
    let budget = dto.budget.as_ref().and_then(|b| budget(&mut v, b));
    let collaborators = dto
        .collaborators
        .as_deref()
        .and_then(|c| collaborators(&mut v, c));

    v.finish(())?;
    let (Some(name), Some(dimensions)) = (name, dimensions) else {
        return Err(ServiceError::invalid("body", "incomplete project"));
    };

    let mut project_settings = ProjectSettings::default();
    if let Some(patch) = settings {
        patch.apply(&mut project_settings);
    }

    Ok(NewProject {
        name,
        description: description.unwrap_or_default(),
        dimensions,
        settings: project_settings,
        status: status.unwrap_or_default(),
        styles: styles.unwrap_or_default(),
        tags: tags.unwrap_or_default(),
        thumbnail: thumbnail.unwrap_or_default(),
        is_public: dto.is_public.unwrap_or(false),
        budget,
        collaborators: collaborators.unwrap_or_default(),
    })
}

pub fn validate_project_patch(dto: &UpdateProjectRequestDto) -> ServiceResult<ProjectPatch> {
    let mut v = Violations::new();
    let settings = dto.settings.as_ref().filter(|s| !is_blank(s));

    let is_empty = dto.name.is_none()
        && dto.description.is_none()
        && dto.dimensions.is_none()
        && settings.is_none()
        && dto.status.is_none()
        && dto.styles.is_none()
        && dto.tags.is_none()
        && dto.thumbnail.is_none()
        && dto.is_public.is_none()
        && dto.budget.is_none()
        && dto.collaborators.is_none();
    reject_empty_patch(&mut v, is_empty);

    let dimensions = dto.dimensions.as_ref().map(|d| {
        let patch = DimensionsPatch {
            width: positive(&mut v, "dimensions.width", d.width, false),
            length: positive(&mut v, "dimensions.length", d.length, false),
            height: positive(&mut v, "dimensions.height", d.height, false),
        };
        if d.width.is_none() && d.length.is_none() && d.height.is_none() {
            v.push("dimensions", "at least one dimension must be provided");
        }
        patch
    });

    let patch = ProjectPatch {
        name: text(&mut v, "name", dto.name.as_deref(), false, NAME_MIN, NAME_MAX),
        description: text(
            &mut v,
            "description",
            dto.description.as_deref(),
            false,
            0,
            DESCRIPTION_MAX,
        ),
        dimensions,
        settings: settings.map(|s| settings_patch(&mut v, s)),
        status: choice(
            &mut v,
            "status",
            dto.status.as_deref(),
            false,
            ProjectStatus::parse,
            ProjectStatus::VALUES,
        ),
        styles: labels(&mut v, "styles", dto.styles.as_deref(), STYLE_MAX),
        tags: labels(&mut v, "tags", dto.tags.as_deref(), LABEL_MAX),
        thumbnail: web_url(&mut v, "thumbnail", dto.thumbnail.as_deref()),
        is_public: dto.is_public,
        budget: dto.budget.as_ref().and_then(|b| budget(&mut v, b)),
        collaborators: dto
            .collaborators
            .as_deref()
            .and_then(|c| collaborators(&mut v, c)),
        expected_version: dto.version,
    };

    v.finish(patch)
}

fn is_blank(dto: &ProjectSettingsDto) -> bool {
    dto.units.is_none()
        && dto.grid_snap.is_none()
        && dto.grid_size.is_none()
        && dto.wall_thickness.is_none()
}

fn settings_patch(v: &mut Violations, dto: &ProjectSettingsDto) -> SettingsPatch {
    SettingsPatch {
        units: choice(
            v,
            "settings.units",
            dto.units.as_deref(),
            false,
            Units::parse,
            Units::VALUES,
        ),
        grid_snap: dto.grid_snap,
        grid_size: positive(v, "settings.gridSize", dto.grid_size, false),
        wall_thickness: positive(v, "settings.wallThickness", dto.wall_thickness, false),
    }
}

fn budget(v: &mut Violations, dto: &BudgetDto) -> Option<Budget> {
    let amount = match dto.amount {
        None => {
            v.push("budget.amount", "is required");
            None
        }
        Some(n) if n.is_finite() && n >= 0.0 => Some(n),
        Some(_) => {
            v.push("budget.amount", "must be zero or greater");
            None
        }
    };
    let currency = match dto.currency.as_deref() {
        None => Some(Currency::Usd),
        raw => choice(
            v,
            "budget.currency",
            raw,
            false,
            Currency::parse,
            Currency::VALUES,
        ),
    };
    Some(Budget {
        amount: amount?,
        currency: currency?,
    })
}

fn collaborators(v: &mut Violations, items: &[CollaboratorDto]) -> Option<Vec<Collaborator>> {
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let base = format!("collaborators.{i}");
        let user = match item.user.as_deref() {
            None => {
                v.push(path(&base, "user"), "is required");
                None
            }
            Some(raw) => match UserId::from_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    v.push(path(&base, "user"), "must be a valid user id");
                    None
                }
            },
        };
        let role = match item.role.as_deref() {
            None => Some(CollaboratorRole::Viewer),
            raw => choice(
                v,
                &path(&base, "role"),
                raw,
                false,
                CollaboratorRole::parse,
                CollaboratorRole::VALUES,
            ),
        };
        if let (Some(user), Some(role)) = (user, role) {
            out.push(Collaborator { user, role });
        }
    }
    (out.len() == items.len()).then_some(out)
}

//! Project Aggregate - A project together with its rooms and their furniture
//!
//! The aggregate is a read model: it is hydrated from one storage snapshot
//! and handed to the export renderers. Mutations go through the services.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Furniture, Project, Room};
use crate::domain::value_objects::{round_area, ProjectId};

/// A room and the furniture placed in it
#[derive(Debug, Clone)]
pub struct RoomContents {
    pub room: Room,
    pub furniture: Vec<Furniture>,
}

/// The Project Aggregate Root
#[derive(Debug, Clone)]
pub struct ProjectAggregate {
    project: Project,
    rooms: Vec<RoomContents>,
}

impl ProjectAggregate {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            rooms: Vec::new(),
        }
    }

    /// Load rooms into the aggregate (for hydration from persistence)
    pub fn with_rooms(mut self, rooms: Vec<RoomContents>) -> Self {
        self.rooms = rooms;
        self
    }

    pub fn id(&self) -> &ProjectId {
        &self.project.id
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn rooms(&self) -> &[RoomContents] {
        &self.rooms
    }

    pub fn furniture_count(&self) -> usize {
        self.rooms.iter().map(|r| r.furniture.len()).sum()
    }

    /// Sum of room floor areas, rounded to two decimals
    pub fn total_area(&self) -> f64 {
        round_area(
            self.rooms
                .iter()
                .map(|r| r.room.dimensions.floor_area())
                .sum(),
        )
    }

    /// Furniture counts keyed by type
    pub fn furniture_by_type(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for item in self.rooms.iter().flat_map(|r| r.furniture.iter()) {
            *counts
                .entry(item.furniture_type.as_str().to_string())
                .or_insert(0) += 1;
        }
        counts
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            project_name: self.project.name.clone(),
            project_description: self.project.description.clone(),
            total_rooms: self.rooms.len(),
            total_furniture: self.furniture_count(),
            furniture_by_type: self.furniture_by_type(),
            total_area: self.total_area(),
            created_at: self.project.audit.created_at,
            last_modified_at: self.project.audit.last_modified_at,
        }
    }
}

/// Derived statistics over a project aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_name: String,
    pub project_description: String,
    pub total_rooms: usize,
    pub total_furniture: usize,
    pub furniture_by_type: BTreeMap<String, usize>,
    pub total_area: f64,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: User, Project, Room, Furniture, AssetLibrary
//! - Value Objects: identifiers, closed categories, geometry, audit stamps
//! - Aggregates: Project aggregate read model and its summary

pub mod aggregates;
pub mod entities;
pub mod value_objects;

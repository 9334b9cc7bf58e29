//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite document store for users, projects, rooms and furniture
//! - HTTP: REST API routes and error mapping
//! - Auth: password hashing and bearer tokens
//! - Export: CSV archive and PDF report renderers
//! - Config: Application configuration
//! - State: Shared application state

pub mod auth;
pub mod clock;
pub mod config;
pub mod export;
pub mod http;
pub mod persistence;
pub mod state;

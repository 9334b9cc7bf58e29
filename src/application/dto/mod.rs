//! Data Transfer Objects - For API boundaries
//!
//! Request DTOs keep every field optional and enums as raw strings, so the
//! validation layer can report all problems at once with field paths.

mod asset_library;
mod auth;
mod common;
mod export;
mod furniture;
mod project;
mod room;

pub use asset_library::*;
pub use auth::*;
pub use common::*;
pub use export::*;
pub use furniture::*;
pub use project::*;
pub use room::*;

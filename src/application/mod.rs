//! Application layer - Use cases orchestrating the domain
//!
//! This layer contains:
//! - DTOs: request and response shapes at the API boundary
//! - Validation: pure checks turning DTOs into typed inputs
//! - Ports: traits implemented by infrastructure adapters
//! - Services: ownership, cascade and export use cases

pub mod dto;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

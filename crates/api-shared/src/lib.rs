//! # API Shared
//!
//! Shared definitions for the symptom checker front ends.
//!
//! Contains:
//! - Wire DTOs with OpenAPI schemas (`dto` module)
//! - Request validation, the only place user input is checked
//! - `HealthService`
//!
//! Used by `api-rest` and `symcheck-cli`.

pub mod dto;
pub mod health;
pub mod validation;

pub use dto::*;
pub use health::HealthService;
pub use validation::ValidationError;

//! # API Shared
//!
//! Shared utilities and definitions for the Sketchdeck API surface.
//!
//! Contains:
//! - Request/response DTOs (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the root runner for common functionality. No
//! transport concerns live here; status mapping and routing belong to the
//! delivery crates.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;

//! # API Shared
//!
//! Shared definitions for the brandgen APIs.
//!
//! Contains:
//! - Wire types (`dto` module) used by the core services and every API surface
//! - Shared services like `HealthService`
//!
//! Used by `brandgen-core`, `api-rest` and the CLI.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;

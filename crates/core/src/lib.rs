//! # Brandgen Core
//!
//! Core business logic for the pharmaceutical brand generator.
//!
//! This crate contains:
//! - Project creation: insight generation, brand package generation and storage as tagged
//!   brand elements
//! - Project reconstruction from stored elements
//! - Targeted edits, the compliance check and the leaflet export stub
//! - The SQLite project store and the OpenAI-compatible AI client
//!
//! **No API concerns**: HTTP servers and request parsing belong in `api-rest`; wire types live
//! in `api-shared`.

pub mod ai;
pub mod config;
pub mod constants;
pub mod elements;
pub mod error;
pub mod generators;
pub mod identity;
pub mod repositories;
pub mod store;
pub mod uuid;
pub mod validation;
pub mod views;

pub use ai::{AiClients, OpenAiClient};
pub use config::{core_config_from_env, AiConfig, CoreConfig};
pub use error::{BrandError, BrandResult};
pub use identity::CallerIdentity;
pub use repositories::compliance::ComplianceService;
pub use repositories::projects::ProjectService;
pub use store::{ProjectStore, SqliteProjectStore};
pub use uuid::RecordId;

pub use brandgen_types::NonEmptyText;

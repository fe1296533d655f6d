//! Configuration management module.
//!
//! Handles schema declaration, resolution of INI sources into typed
//! snapshots, validation, and default template generation.

mod fields;
mod loader;
mod schema;
mod service;
mod types;
mod validation;

pub use fields::{tars_schema, LLM_BACKENDS, TTS_OPTIONS};
pub use loader::ConfigLoader;
pub use schema::{ConfigField, Requirement, Schema};
pub use service::ConfigService;
pub use types::{ConfigSnapshot, ResolvedField};
pub use validation::Validator;

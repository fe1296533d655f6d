//! Typed configuration layer for the TARS-AI voice assistant.
//!
//! Reads the INI settings that drive speech recognition, the language model
//! client, speech synthesis, the servo controller and the Discord bridge, and
//! turns them into one immutable [`config::ConfigSnapshot`]. Every declared
//! field is coerced and validated; all problems are reported together.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tars_config::config::{tars_schema, ConfigService};
//!
//! let schema = tars_schema()?;
//! let snapshot = Arc::new(ConfigService::load(None, &schema)?);
//! if snapshot.get_bool("STT", "use_server") == Some(true) {
//!     let url = snapshot.get_str("STT", "server_url");
//!     # let _ = url;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod domain;
pub mod service;

// src/lib.rs

//! yarp
//!
//! Resolves pacman-style configuration files into typed settings that can be
//! handed to libalpm.
//!
//! # Architecture
//!
//! - `config`: pacman.conf parsing, `Include` expansion, signature levels
//! - `settings`: command-line overrides applied over the resolved file
//! - Parsing is one-shot and fail-fast: a parse either yields a complete
//!   `PacmanConfig` or an `Error`

pub mod config;
mod error;
pub mod settings;

pub use config::{DbUsage, PacmanConfig, Repository, SigLevel};
pub use error::{Error, Result};
pub use settings::Settings;

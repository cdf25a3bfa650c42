//! Configuration system for the avour creative-coding facade.
//!
//! This crate provides configuration loading, saving, validation and default
//! values for a sketch window. It includes:
//!
//! - `Config`: window, timing and rendering settings
//! - YAML persistence with atomic saves
//! - Typed `ConfigError` values for I/O, parse and validation failures

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{LogLevel, PowerPreference, VsyncMode};

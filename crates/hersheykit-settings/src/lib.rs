//! HersheyKit Settings Crate
//!
//! Handles application configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, ExportSettings, FontSettings, LayoutSettings, UnmappedCharacters};
pub use error::{SettingsError, SettingsResult};

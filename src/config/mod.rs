//! Configuration module for kurek.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Download modes
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, Config, NetworkConfig, OptionsConfig, TargetConfig};
pub use modes::DownloadMode;
pub use validation::{normalize_profiles, validate_config};

//! Settings module for trojan-go-fmt
//!
//! Host settings read from a TOML or YAML file: the runtime values injected
//! into generated engine configs and the table of installed plugin binaries.

pub mod settings_struct;

// Re-export settings struct and functions
pub use settings_struct::{Settings, SettingsError};

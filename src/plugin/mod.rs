//! SIP003 transport plugin selection and options
//!
//! An endpoint carries its plugin as one opaque string token. This module
//! decodes that token into a [`PluginConfiguration`], encodes it back, and
//! defines the [`PluginResolver`] capability used to find plugin binaries.

mod configuration;
mod options;
mod resolver;

use thiserror::Error;

pub use configuration::PluginConfiguration;
pub use options::PluginOptions;
pub use resolver::{NoPluginResolver, PluginResolver, ResolvedPlugin, StaticPluginResolver};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    #[error("Invalid plugin options: {0}")]
    InvalidOptions(String),

    #[error("Plugin not found: {0}")]
    NotFound(String),

    #[error("No plugin selected")]
    EmptySelection,
}

use thiserror::Error;

use crate::plugin::PluginError;

/// Errors raised while transcoding a trojan-go endpoint.
#[derive(Error, Debug)]
pub enum TrojanGoError {
    #[error("Malformed URI: {0}")]
    MalformedUri(String),

    #[error("Malformed config: {0}")]
    MalformedConfig(String),

    #[error("Plugin resolution error: {0}")]
    PluginResolution(#[from] PluginError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrojanGoError>;

impl TrojanGoError {
    pub(crate) fn malformed_uri(msg: impl Into<String>) -> Self {
        TrojanGoError::MalformedUri(msg.into())
    }

    pub(crate) fn malformed_config(msg: impl Into<String>) -> Self {
        TrojanGoError::MalformedConfig(msg.into())
    }
}

use serde::{Deserialize, Serialize};

/// How the host treats IPv6 destinations.
///
/// Ordered from least to most IPv6-leaning; everything up to and including
/// `Enable` still prefers IPv4 when both families resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ipv6Mode {
    #[default]
    Disable,
    Enable,
    Prefer,
    Only,
}

/// Host settings injected into the engine config builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Local SOCKS listen port of the engine
    pub local_port: u16,
    /// Whether to enable connection multiplexing
    pub enable_mux: bool,
    /// Maximum streams per multiplexed connection
    pub mux_concurrency: u32,
    /// Whether the engine logs everything
    pub enable_log: bool,
    /// IPv6 preference of the host
    pub ipv6_mode: Ipv6Mode,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        RuntimeSettings {
            local_port: 1080,
            enable_mux: false,
            mux_concurrency: 8,
            enable_log: false,
            ipv6_mode: Ipv6Mode::Disable,
        }
    }
}

impl RuntimeSettings {
    pub fn prefer_ipv4(&self) -> bool {
        self.ipv6_mode <= Ipv6Mode::Enable
    }
}

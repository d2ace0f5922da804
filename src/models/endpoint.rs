//! Trojan-go endpoint record
//!
//! The shared data model of the URI codec and the engine config builder and
//! parser.

use std::fmt;
use std::str::FromStr;

use crate::error::TrojanGoError;

/// Default remote port when a link carries none.
pub const TROJAN_GO_DEFAULT_PORT: u16 = 443;

/// Transport sub-mode of trojan-go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Transport {
    /// Plain TLS stream.
    #[default]
    Original,
    /// TLS stream wrapped in a websocket.
    Websocket { host: String, path: String },
}

impl Transport {
    /// Name used by the `type` link parameter.
    pub fn type_name(&self) -> &'static str {
        match self {
            Transport::Original => "original",
            Transport::Websocket { .. } => "ws",
        }
    }

    pub fn is_websocket(&self) -> bool {
        matches!(self, Transport::Websocket { .. })
    }
}

/// Optional inner encryption layer.
///
/// Textual form is either `none` or `ss;<method>:<key>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Encryption {
    #[default]
    None,
    Shadowsocks { method: String, key: String },
}

impl Encryption {
    pub fn is_none(&self) -> bool {
        matches!(self, Encryption::None)
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encryption::None => f.write_str("none"),
            Encryption::Shadowsocks { method, key } => write!(f, "ss;{}:{}", method, key),
        }
    }
}

impl FromStr for Encryption {
    type Err = TrojanGoError;

    /// The method ends at the first `:` after `ss;`, the key is everything
    /// after it and may itself contain `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "none" {
            return Ok(Encryption::None);
        }
        let layer = s.strip_prefix("ss;").ok_or_else(|| {
            TrojanGoError::malformed_uri(format!("unsupported encryption: {}", s))
        })?;
        match layer.split_once(':') {
            Some((method, key)) if !method.is_empty() && !key.is_empty() => {
                Ok(Encryption::Shadowsocks {
                    method: method.to_string(),
                    key: key.to_string(),
                })
            }
            _ => Err(TrojanGoError::malformed_uri(format!(
                "encryption must be ss;<method>:<key>, got {}",
                s
            ))),
        }
    }
}

/// Address the engine actually dials.
///
/// Differs from the server address when a local relay (for example a
/// transport plugin) sits in front of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub address: String,
    pub port: u16,
}

/// A trojan-go server endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrojanGoEndpoint {
    pub server_address: String,
    pub server_port: u16,
    pub password: String,
    /// TLS server name, empty to derive it from the address.
    pub sni: String,
    pub transport: Transport,
    pub encryption: Encryption,
    /// Encoded [`crate::plugin::PluginConfiguration`], empty for no plugin.
    pub plugin: String,
    pub allow_insecure: bool,
    pub fingerprint: String,
    pub name: String,
    pub resolved: Option<ResolvedAddress>,
}

impl Default for TrojanGoEndpoint {
    fn default() -> Self {
        TrojanGoEndpoint {
            server_address: "127.0.0.1".to_string(),
            server_port: TROJAN_GO_DEFAULT_PORT,
            password: String::new(),
            sni: String::new(),
            transport: Transport::Original,
            encryption: Encryption::None,
            plugin: String::new(),
            allow_insecure: false,
            fingerprint: String::new(),
            name: String::new(),
            resolved: None,
        }
    }
}

impl TrojanGoEndpoint {
    pub fn new(server_address: &str, server_port: u16, password: &str) -> Self {
        TrojanGoEndpoint {
            server_address: server_address.to_string(),
            server_port,
            password: password.to_string(),
            ..Default::default()
        }
    }

    /// Attach the address the engine should dial instead of the server.
    pub fn with_resolved(mut self, address: &str, port: u16) -> Self {
        self.resolved = Some(ResolvedAddress {
            address: address.to_string(),
            port,
        });
        self
    }

    pub fn final_address(&self) -> &str {
        self.resolved
            .as_ref()
            .map(|r| r.address.as_str())
            .unwrap_or(&self.server_address)
    }

    pub fn final_port(&self) -> u16 {
        self.resolved
            .as_ref()
            .map(|r| r.port)
            .unwrap_or(self.server_port)
    }

    /// Display label, falling back to `address:port`.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("{}:{}", self.server_address, self.server_port)
        } else {
            self.name.clone()
        }
    }
}

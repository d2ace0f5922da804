use std::collections::HashMap;

use log::{debug, warn};
use url::{Host, Url};

use crate::error::{Result, TrojanGoError};
use crate::models::{Encryption, Transport, TrojanGoEndpoint, TROJAN_GO_DEFAULT_PORT};
use crate::utils::url::url_decode;

pub const TROJAN_GO_SCHEME: &str = "trojan-go";

/// Parse a Trojan-Go link into an endpoint record
///
/// Only `sni`, `type`, `encryption` and `plugin` are read, plus `host` and
/// `path` when `type=ws`. Other query parameters are ignored.
pub fn explode_trojan_go(trojan_go: &str) -> Result<TrojanGoEndpoint> {
    let url =
        Url::parse(trojan_go.trim()).map_err(|e| TrojanGoError::malformed_uri(e.to_string()))?;

    if url.scheme() != TROJAN_GO_SCHEME {
        return Err(TrojanGoError::malformed_uri(format!(
            "expected {}:// link, got {}://",
            TROJAN_GO_SCHEME,
            url.scheme()
        )));
    }

    // Extract host and port
    let server_address = match url.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => url_decode(domain),
        Some(Host::Ipv4(ip)) => ip.to_string(),
        Some(Host::Ipv6(ip)) => ip.to_string(),
        _ => return Err(TrojanGoError::malformed_uri("missing host")),
    };
    let server_port = url.port().unwrap_or(TROJAN_GO_DEFAULT_PORT);
    if server_port == 0 {
        return Err(TrojanGoError::malformed_uri("port out of range: 0"));
    }

    let password = url_decode(url.username());
    if password.is_empty() {
        return Err(TrojanGoError::malformed_uri("missing password"));
    }

    // First occurrence of each parameter wins
    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }

    let mut endpoint = TrojanGoEndpoint::new(&server_address, server_port, &password);

    if let Some(sni) = params.get("sni") {
        endpoint.sni = sni.clone();
    }

    endpoint.transport = match params.get("type").map(String::as_str) {
        Some("ws") => Transport::Websocket {
            host: params.get("host").cloned().unwrap_or_default(),
            path: params.get("path").cloned().unwrap_or_default(),
        },
        None | Some("") | Some("original") => Transport::Original,
        Some(other) => {
            warn!("Unsupported trojan-go transport '{}', using original", other);
            Transport::Original
        }
    };

    if let Some(encryption) = params.get("encryption") {
        endpoint.encryption = encryption.parse::<Encryption>()?;
    }

    if let Some(plugin) = params.get("plugin") {
        endpoint.plugin = plugin.clone();
    }

    if let Some(fragment) = url.fragment() {
        let name = url_decode(fragment);
        if !name.trim().is_empty() {
            endpoint.name = name;
        }
    }

    debug!("Parsed trojan-go link for {}", endpoint.display_name());
    Ok(endpoint)
}

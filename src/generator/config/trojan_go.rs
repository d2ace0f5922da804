use log::{debug, warn};
use serde_json::{json, Map, Value};

use crate::constants::log_level::{LOG_LEVEL_ALL, LOG_LEVEL_WARNING};
use crate::error::{Result, TrojanGoError};
use crate::models::{Encryption, RuntimeSettings, Transport, TrojanGoEndpoint};
use crate::plugin::{PluginConfiguration, PluginError, PluginResolver};
use crate::utils::network::{is_ip_address, LOCALHOST};

/// Convert an endpoint into a trojan-go client config
///
/// The engine dials the resolved address of the endpoint, which lets a local
/// relay stand in for the server. A plugin that cannot be decoded or resolved
/// is left out of the config instead of failing the build.
///
/// # Arguments
/// * `endpoint` - Endpoint to convert
/// * `settings` - Host settings (listen port, mux, logging, IPv6 mode)
/// * `resolver` - Lookup of transport plugin binaries
pub fn build_trojan_go_config<R>(
    endpoint: &TrojanGoEndpoint,
    settings: &RuntimeSettings,
    resolver: &R,
) -> Value
where
    R: PluginResolver + ?Sized,
{
    let log_level = if settings.enable_log {
        LOG_LEVEL_ALL
    } else {
        LOG_LEVEL_WARNING
    };

    let mut conf = json!({
        "run_type": "client",
        "local_addr": LOCALHOST,
        "local_port": settings.local_port,
        "remote_addr": endpoint.final_address(),
        "remote_port": endpoint.final_port(),
        "password": [endpoint.password],
        "log_level": log_level
    });

    if settings.enable_mux {
        conf["mux"] = json!({
            "enabled": true,
            "concurrency": settings.mux_concurrency
        });
    }

    conf["tcp"] = json!({ "prefer_ipv4": settings.prefer_ipv4() });

    if let Transport::Websocket { host, path } = &endpoint.transport {
        conf["websocket"] = json!({
            "enabled": true,
            "host": host,
            "path": path
        });
    }

    let mut ssl = Map::new();
    let sni = effective_sni(endpoint);
    if !sni.is_empty() {
        ssl.insert("sni".to_string(), json!(sni));
    }
    if endpoint.allow_insecure {
        ssl.insert("verify".to_string(), json!(false));
    }
    if !endpoint.fingerprint.is_empty() {
        ssl.insert("fingerprint".to_string(), json!(endpoint.fingerprint));
    }
    conf["ssl"] = Value::Object(ssl);

    if let Encryption::Shadowsocks { method, key } = &endpoint.encryption {
        conf["shadowsocks"] = json!({
            "enabled": true,
            "method": method,
            "password": key
        });
    }

    if !endpoint.plugin.is_empty() {
        match transport_plugin(&endpoint.plugin, resolver) {
            Ok(plugin) => conf["transport_plugin"] = plugin,
            Err(e) => warn!(
                "Skipping transport plugin of {}: {}",
                endpoint.display_name(),
                e
            ),
        }
    }

    debug!(
        "Built trojan-go config for {} on local port {}",
        endpoint.display_name(),
        settings.local_port
    );
    conf
}

/// Same as [`build_trojan_go_config`], rendered as pretty JSON
pub fn build_trojan_go_config_string<R>(
    endpoint: &TrojanGoEndpoint,
    settings: &RuntimeSettings,
    resolver: &R,
) -> Result<String>
where
    R: PluginResolver + ?Sized,
{
    let conf = build_trojan_go_config(endpoint, settings, resolver);
    Ok(serde_json::to_string_pretty(&conf)?)
}

/// Move a user supplied config onto another local port
///
/// Only `local_port` is touched; everything else is passed through.
pub fn build_custom_trojan_go_config(config: &str, local_port: u16) -> Result<String> {
    let mut conf: Value = serde_json::from_str(config)?;
    conf.as_object_mut()
        .ok_or_else(|| TrojanGoError::malformed_config("config must be a JSON object"))?
        .insert("local_port".to_string(), json!(local_port));
    Ok(serde_json::to_string_pretty(&conf)?)
}

/// TLS server name to send.
///
/// When the engine dials a loopback relay, the certificate can only be checked
/// against the original host name, so a non-IP server address is used as SNI.
fn effective_sni(endpoint: &TrojanGoEndpoint) -> &str {
    if endpoint.sni.is_empty()
        && endpoint.final_address() == LOCALHOST
        && !is_ip_address(&endpoint.server_address)
    {
        endpoint.server_address.as_str()
    } else {
        endpoint.sni.as_str()
    }
}

fn transport_plugin<R>(plugin: &str, resolver: &R) -> std::result::Result<Value, PluginError>
where
    R: PluginResolver + ?Sized,
{
    let configuration = PluginConfiguration::parse(plugin)?;
    let resolved = resolver.resolve(&configuration)?;
    Ok(json!({
        "enabled": true,
        "type": "shadowsocks",
        "command": resolved.path,
        "option": resolved.options.to_string()
    }))
}

//! Import of trojan-go engine configs
//!
//! Reads a client JSON config back into a [`TrojanGoEndpoint`]. Fields the
//! config leaves out keep the record defaults.

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::error::{Result, TrojanGoError};
use crate::models::{Encryption, Transport, TrojanGoEndpoint};
use crate::plugin::{PluginConfiguration, PluginOptions};

/// Parse a trojan-go JSON config document into an endpoint record
pub fn parse_trojan_go_config(config: &str) -> Result<TrojanGoEndpoint> {
    let value: Value = serde_json::from_str(config)?;
    parse_trojan_go_json(&value)
}

/// Parse an already decoded trojan-go JSON config into an endpoint record
pub fn parse_trojan_go_json(config: &Value) -> Result<TrojanGoEndpoint> {
    let conf = config
        .as_object()
        .ok_or_else(|| TrojanGoError::malformed_config("config must be a JSON object"))?;

    let mut endpoint = TrojanGoEndpoint::default();

    if let Some(addr) = get_str(conf, "remote_addr") {
        endpoint.server_address = addr.to_string();
    }
    if let Some(port) = conf.get("remote_port") {
        // integral floats such as 443.0 are accepted as ports
        endpoint.server_port = port
            .as_u64()
            .or_else(|| {
                port.as_f64()
                    .filter(|p| p.fract() == 0.0 && *p >= 0.0)
                    .map(|p| p as u64)
            })
            .filter(|p| (1..=u16::MAX as u64).contains(p))
            .map(|p| p as u16)
            .ok_or_else(|| {
                TrojanGoError::malformed_config(format!("remote_port out of range: {}", port))
            })?;
    }

    match conf.get("password") {
        Some(Value::String(pass)) => endpoint.password = pass.clone(),
        Some(Value::Array(passwords)) => match passwords.first() {
            Some(Value::String(pass)) => endpoint.password = pass.clone(),
            _ => {
                return Err(TrojanGoError::malformed_config(
                    "password array must start with a string",
                ))
            }
        },
        Some(Value::Null) | None => {}
        Some(other) => {
            return Err(TrojanGoError::malformed_config(format!(
                "password must be a string or an array, got {}",
                other
            )))
        }
    }

    if let Some(ssl) = get_object(conf, "ssl") {
        if let Some(sni) = get_str(ssl, "sni") {
            endpoint.sni = sni.to_string();
        }
        endpoint.allow_insecure = !get_bool(ssl, "verify", true);
        if let Some(fingerprint) = get_str(ssl, "fingerprint") {
            endpoint.fingerprint = fingerprint.to_string();
        }
    }

    if let Some(ws) = get_object(conf, "websocket") {
        if get_bool(ws, "enabled", false) {
            endpoint.transport = Transport::Websocket {
                host: get_str(ws, "host").unwrap_or_default().to_string(),
                path: get_str(ws, "path").unwrap_or_default().to_string(),
            };
        }
    }

    if let Some(ss) = get_object(conf, "shadowsocks") {
        if get_bool(ss, "enabled", false) {
            let method = get_str(ss, "method").unwrap_or_default();
            let key = get_str(ss, "password").unwrap_or_default();
            if method.is_empty() || key.is_empty() {
                return Err(TrojanGoError::malformed_config(
                    "shadowsocks layer needs both method and password",
                ));
            }
            endpoint.encryption = Encryption::Shadowsocks {
                method: method.to_string(),
                key: key.to_string(),
            };
        }
    }

    if let Some(plugin) = get_object(conf, "transport_plugin") {
        if get_bool(plugin, "enabled", false) {
            endpoint.plugin = parse_transport_plugin(plugin)?;
        }
    }

    debug!(
        "Imported trojan-go config for {}:{}",
        endpoint.server_address, endpoint.server_port
    );
    Ok(endpoint)
}

/// Rebuild the plugin token of a `transport_plugin` block.
///
/// The `arg` array is read first and a plain `option` string, when present,
/// replaces whatever the array produced.
fn parse_transport_plugin(plugin: &Map<String, Value>) -> Result<String> {
    match get_str(plugin, "type") {
        Some("shadowsocks") => {}
        other => {
            warn!(
                "Ignoring transport plugin of type {}",
                other.unwrap_or("<none>")
            );
            return Ok(String::new());
        }
    }

    let command = get_str(plugin, "command").unwrap_or_default();
    let mut conf = PluginConfiguration::new(command);

    if let Some(Value::Array(args)) = plugin.get("arg") {
        let args: Vec<String> = args.iter().map(json_to_string).collect();
        conf.set_options(PluginOptions::from_arg_pairs(command, &args));
    }
    if let Some(option) = get_str(plugin, "option") {
        let options = PluginOptions::parse_with_id(command, option)
            .map_err(|e| TrojanGoError::malformed_config(e.to_string()))?;
        conf.set_options(options);
    }

    conf.fix_invalid_params();
    Ok(conf.to_string())
}

fn json_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn get_object<'a>(conf: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    conf.get(key).and_then(Value::as_object)
}

fn get_str<'a>(conf: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    conf.get(key).and_then(Value::as_str)
}

fn get_bool(conf: &Map<String, Value>, key: &str, default: bool) -> bool {
    conf.get(key).and_then(Value::as_bool).unwrap_or(default)
}

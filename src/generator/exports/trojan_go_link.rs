use crate::models::{Transport, TrojanGoEndpoint};
use crate::parser::explodes::trojan_go::TROJAN_GO_SCHEME;
use crate::utils::network::uri_host;
use crate::utils::url::{encode_query, url_encode};

/// Convert an endpoint record into a `trojan-go://` share link
///
/// Parameters holding their default value are left out, so an explicit
/// `type=original` in the parsed link does not come back. The `encryption`
/// parameter is gated on the transport type name, not on the layer itself,
/// so records without one still carry `encryption=none`.
pub fn trojan_go_to_link(endpoint: &TrojanGoEndpoint) -> String {
    let encryption = endpoint.encryption.to_string();
    let mut params: Vec<(&str, &str)> = Vec::new();

    if !endpoint.sni.is_empty() {
        params.push(("sni", endpoint.sni.as_str()));
    }

    let type_name = endpoint.transport.type_name();
    if !type_name.is_empty() && type_name != "original" {
        params.push(("type", type_name));
        if let Transport::Websocket { host, path } = &endpoint.transport {
            if !host.is_empty() {
                params.push(("host", host.as_str()));
            }
            if !path.is_empty() {
                params.push(("path", path.as_str()));
            }
        }
    }

    if !type_name.is_empty() && type_name != "none" {
        params.push(("encryption", encryption.as_str()));
    }

    if !endpoint.plugin.is_empty() {
        params.push(("plugin", endpoint.plugin.as_str()));
    }

    let mut link = format!(
        "{}://{}@{}:{}",
        TROJAN_GO_SCHEME,
        url_encode(&endpoint.password),
        uri_host(&endpoint.server_address),
        endpoint.server_port
    );

    let query = encode_query(params);
    if !query.is_empty() {
        link.push('?');
        link.push_str(&query);
    }

    if !endpoint.name.is_empty() {
        link.push('#');
        link.push_str(&url_encode(&endpoint.name));
    }

    link
}

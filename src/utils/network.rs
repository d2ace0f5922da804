//! Address classification helpers

use std::net::{IpAddr, Ipv6Addr};

/// Loopback literal the engine binds to and plugins relay through
pub const LOCALHOST: &str = "127.0.0.1";

/// Check whether `address` is an IPv4 or IPv6 literal (brackets allowed)
pub fn is_ip_address(address: &str) -> bool {
    let trimmed = address
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(address);
    trimmed.parse::<IpAddr>().is_ok()
}

/// Format a host for the authority part of a URI, bracketing IPv6 literals
pub fn uri_host(address: &str) -> String {
    if address.parse::<Ipv6Addr>().is_ok() {
        format!("[{}]", address)
    } else {
        address.to_string()
    }
}

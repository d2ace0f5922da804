//! Core data models for the application
//!
//! This module contains the data structures shared by the link codec and the
//! engine config builder and parser, separated from the logic that operates
//! on them.
//!
//! # Usage
//!
//! ```rust
//! use trojan_go_fmt::models::{Transport, TrojanGoEndpoint};
//!
//! let mut endpoint = TrojanGoEndpoint::new("example.com", 443, "secret");
//! endpoint.transport = Transport::Websocket {
//!     host: "cdn.example.com".to_string(),
//!     path: "/ws".to_string(),
//! };
//! assert_eq!(endpoint.transport.type_name(), "ws");
//! ```

mod endpoint;
mod runtime_settings;

pub use endpoint::*;
pub use runtime_settings::{Ipv6Mode, RuntimeSettings};

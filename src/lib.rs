pub mod constants;
pub mod error;
pub mod generator;
pub mod models;
pub mod parser;
pub mod plugin;
pub mod settings;
pub mod utils;

// Re-export the endpoint model and error types for easier access
pub use error::{Result, TrojanGoError};
pub use models::{Encryption, Ipv6Mode, RuntimeSettings, Transport, TrojanGoEndpoint};

// Re-export the conversions
pub use generator::{
    build_custom_trojan_go_config, build_trojan_go_config, build_trojan_go_config_string,
    trojan_go_to_link,
};
pub use parser::{explode_trojan_go, parse_trojan_go_config, parse_trojan_go_json};

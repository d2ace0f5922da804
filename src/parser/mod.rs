pub mod config;
pub mod explodes;

// Re-export the trojan-go readers
pub use config::{parse_trojan_go_config, parse_trojan_go_json};
pub use explodes::trojan_go::explode_trojan_go;

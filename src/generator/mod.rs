pub mod config;
pub mod exports;

// Re-export format converters
pub use config::trojan_go::{
    build_custom_trojan_go_config, build_trojan_go_config, build_trojan_go_config_string,
};
pub use exports::trojan_go_link::trojan_go_to_link;

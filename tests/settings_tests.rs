use std::io::Write;

use tempfile::NamedTempFile;
use trojan_go_fmt::models::Ipv6Mode;
use trojan_go_fmt::plugin::{PluginConfiguration, PluginResolver};
use trojan_go_fmt::settings::{Settings, SettingsError};

#[cfg(test)]
mod settings_tests {
    use super::*;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_settings_toml_file() {
        let file = write_temp(
            r#"
[runtime]
local_port = 2080
enable_mux = true
mux_concurrency = 4
enable_log = true
ipv6_mode = "only"

[plugins]
obfs-local = "/usr/lib/obfs-local"
"#,
        );
        let settings = Settings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.runtime.local_port, 2080);
        assert!(settings.runtime.enable_mux);
        assert_eq!(settings.runtime.mux_concurrency, 4);
        assert!(settings.runtime.enable_log);
        assert_eq!(settings.runtime.ipv6_mode, Ipv6Mode::Only);
        assert!(!settings.runtime.prefer_ipv4());

        let resolver = settings.plugin_resolver();
        let resolved = resolver
            .resolve(&PluginConfiguration::new("obfs-local"))
            .unwrap();
        assert_eq!(resolved.path, "/usr/lib/obfs-local");
    }

    #[test]
    fn test_settings_yaml_file() {
        let file = write_temp(
            r#"
runtime:
  local_port: 3080
  ipv6_mode: enable
plugins:
  v2ray-plugin: /opt/v2ray-plugin
"#,
        );
        let settings = Settings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.runtime.local_port, 3080);
        assert_eq!(settings.runtime.ipv6_mode, Ipv6Mode::Enable);
        assert!(!settings.runtime.enable_mux);
        assert_eq!(
            settings.plugins.get("v2ray-plugin").map(String::as_str),
            Some("/opt/v2ray-plugin")
        );
    }

    #[test]
    fn test_settings_errors() {
        assert!(matches!(
            Settings::load_from_file("/nonexistent/trojan-go-fmt.toml"),
            Err(SettingsError::Io(_))
        ));

        let file = write_temp("[runtime]\nlocal_port = \"not a port\"\n");
        assert!(matches!(
            Settings::load_from_file(file.path()),
            Err(SettingsError::Toml(_))
        ));
    }
}

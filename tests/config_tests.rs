use serde_json::json;
use trojan_go_fmt::plugin::{NoPluginResolver, PluginConfiguration, ResolvedPlugin, PluginError};
use trojan_go_fmt::{
    build_trojan_go_config, explode_trojan_go, parse_trojan_go_json, Encryption, RuntimeSettings,
    Transport, TrojanGoEndpoint,
};

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_link_to_config() {
        let endpoint = explode_trojan_go(
            "trojan-go://pw123@example.com:443?type=ws&host=cdn.example.com&path=%2Fws#MyServer",
        )
        .unwrap();
        let settings = RuntimeSettings {
            local_port: 1080,
            enable_mux: false,
            ..Default::default()
        };
        let conf = build_trojan_go_config(&endpoint, &settings, &NoPluginResolver);

        assert_eq!(conf["remote_addr"], "example.com");
        assert_eq!(conf["remote_port"], 443);
        assert_eq!(conf["local_port"], 1080);
        assert_eq!(
            conf["websocket"],
            json!({ "enabled": true, "host": "cdn.example.com", "path": "/ws" })
        );
        assert!(conf.get("mux").is_none());
    }

    #[test]
    fn test_config_round_trip() {
        let mut endpoint = TrojanGoEndpoint::new("example.com", 8443, "secret");
        endpoint.sni = "sni.example.com".to_string();
        endpoint.transport = Transport::Websocket {
            host: "cdn.example.com".to_string(),
            path: "/ws".to_string(),
        };
        endpoint.encryption = Encryption::Shadowsocks {
            method: "aes-256-gcm".to_string(),
            key: "secret".to_string(),
        };
        endpoint.allow_insecure = true;
        endpoint.fingerprint = "chrome".to_string();

        let conf = build_trojan_go_config(&endpoint, &RuntimeSettings::default(), &NoPluginResolver);
        assert_eq!(conf["shadowsocks"]["method"], "aes-256-gcm");
        assert_eq!(conf["shadowsocks"]["password"], "secret");

        let parsed = parse_trojan_go_json(&conf).unwrap();
        assert_eq!(parsed, endpoint);
        assert_eq!(parsed.encryption.to_string(), "ss;aes-256-gcm:secret");
    }

    #[test]
    fn test_plain_config_round_trip() {
        let endpoint = TrojanGoEndpoint::new("1.2.3.4", 443, "pw");
        let conf = build_trojan_go_config(&endpoint, &RuntimeSettings::default(), &NoPluginResolver);
        assert_eq!(parse_trojan_go_json(&conf).unwrap(), endpoint);
    }

    #[test]
    fn test_plugin_config_round_trip() {
        // a resolver that hands back the plugin id as the command keeps the token intact
        let resolver = |conf: &PluginConfiguration| -> Result<ResolvedPlugin, PluginError> {
            Ok(ResolvedPlugin {
                path: conf.selected.clone(),
                options: conf.selected_options(),
            })
        };
        let mut endpoint = TrojanGoEndpoint::new("example.com", 443, "pw");
        endpoint.plugin = "obfs-local;obfs=http;obfs-host=a.com".to_string();

        let conf = build_trojan_go_config(&endpoint, &RuntimeSettings::default(), &resolver);
        assert_eq!(conf["transport_plugin"]["command"], "obfs-local");
        assert_eq!(conf["transport_plugin"]["option"], "obfs=http;obfs-host=a.com");

        let parsed = parse_trojan_go_json(&conf).unwrap();
        assert_eq!(parsed.plugin, endpoint.plugin);
    }

    #[test]
    fn test_relay_config_keeps_server_name() {
        let endpoint = explode_trojan_go("trojan-go://pw@example.com:443")
            .unwrap()
            .with_resolved("127.0.0.1", 20000);
        let conf = build_trojan_go_config(&endpoint, &RuntimeSettings::default(), &NoPluginResolver);
        assert_eq!(conf["ssl"]["sni"], "example.com");

        // importing the relay config points at the relay, with the recovered sni
        let parsed = parse_trojan_go_json(&conf).unwrap();
        assert_eq!(parsed.server_address, "127.0.0.1");
        assert_eq!(parsed.server_port, 20000);
        assert_eq!(parsed.sni, "example.com");
    }
}

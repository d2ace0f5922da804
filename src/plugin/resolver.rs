use std::collections::HashMap;

use super::{PluginConfiguration, PluginError, PluginOptions};

/// Binary path and options of a plugin that is ready to be launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlugin {
    pub path: String,
    pub options: PluginOptions,
}

/// Locates the executable behind a plugin selection.
///
/// Lookup belongs to the host (an installed-plugin registry, a package
/// manager), so the config builder only sees this capability.
pub trait PluginResolver {
    fn resolve(&self, configuration: &PluginConfiguration) -> Result<ResolvedPlugin, PluginError>;
}

impl<F> PluginResolver for F
where
    F: Fn(&PluginConfiguration) -> Result<ResolvedPlugin, PluginError>,
{
    fn resolve(&self, configuration: &PluginConfiguration) -> Result<ResolvedPlugin, PluginError> {
        self(configuration)
    }
}

/// Resolver for hosts without any plugin installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPluginResolver;

impl PluginResolver for NoPluginResolver {
    fn resolve(&self, configuration: &PluginConfiguration) -> Result<ResolvedPlugin, PluginError> {
        if configuration.selected.is_empty() {
            return Err(PluginError::EmptySelection);
        }
        Err(PluginError::NotFound(configuration.selected.clone()))
    }
}

/// Resolver backed by a fixed plugin id to binary path table.
#[derive(Debug, Clone, Default)]
pub struct StaticPluginResolver {
    binaries: HashMap<String, String>,
}

impl StaticPluginResolver {
    pub fn new(binaries: HashMap<String, String>) -> Self {
        StaticPluginResolver { binaries }
    }

    pub fn with_binary(mut self, id: &str, path: &str) -> Self {
        self.binaries.insert(id.to_string(), path.to_string());
        self
    }
}

impl PluginResolver for StaticPluginResolver {
    fn resolve(&self, configuration: &PluginConfiguration) -> Result<ResolvedPlugin, PluginError> {
        if configuration.selected.is_empty() {
            return Err(PluginError::EmptySelection);
        }
        let path = self
            .binaries
            .get(&configuration.selected)
            .ok_or_else(|| PluginError::NotFound(configuration.selected.clone()))?;

        Ok(ResolvedPlugin {
            path: path.clone(),
            options: configuration.selected_options(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_resolver() {
        let resolver = StaticPluginResolver::default().with_binary("obfs-local", "/usr/bin/obfs-local");
        let conf = PluginConfiguration::parse("obfs-local;obfs=http").unwrap();
        let resolved = resolver.resolve(&conf).unwrap();
        assert_eq!(resolved.path, "/usr/bin/obfs-local");
        assert_eq!(resolved.options.to_string(), "obfs=http");

        let missing = PluginConfiguration::parse("v2ray-plugin").unwrap();
        assert_eq!(
            resolver.resolve(&missing),
            Err(PluginError::NotFound("v2ray-plugin".to_string()))
        );
        assert_eq!(
            resolver.resolve(&PluginConfiguration::default()),
            Err(PluginError::EmptySelection)
        );
    }

    #[test]
    fn test_no_plugin_resolver() {
        let conf = PluginConfiguration::new("obfs-local");
        assert!(matches!(
            NoPluginResolver.resolve(&conf),
            Err(PluginError::NotFound(_))
        ));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |conf: &PluginConfiguration| -> Result<ResolvedPlugin, PluginError> {
            Ok(ResolvedPlugin {
                path: format!("/opt/{}", conf.selected),
                options: conf.selected_options(),
            })
        };
        let resolved = resolver.resolve(&PluginConfiguration::new("kcptun")).unwrap();
        assert_eq!(resolved.path, "/opt/kcptun");
    }
}

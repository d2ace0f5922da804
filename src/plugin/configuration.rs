use std::collections::VecDeque;
use std::fmt;

use linked_hash_map::LinkedHashMap;

use super::{PluginError, PluginOptions};

/// A plugin selection together with the stored options of every known plugin.
///
/// Encoded as one option string per line; the id of the first line is the
/// selected plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginConfiguration {
    pub plugins_options: LinkedHashMap<String, PluginOptions>,
    pub selected: String,
}

impl PluginConfiguration {
    pub fn new(selected: &str) -> Self {
        PluginConfiguration {
            plugins_options: LinkedHashMap::new(),
            selected: selected.to_string(),
        }
    }

    /// Decode the opaque `plugin` token of an endpoint.
    pub fn parse(plugin: &str) -> Result<Self, PluginError> {
        let plugins = plugin
            .split('\n')
            .map(PluginOptions::parse)
            .collect::<Result<Vec<_>, _>>()?;

        let selected = plugins.first().map(|o| o.id.clone()).unwrap_or_default();
        let mut plugins_options = LinkedHashMap::new();
        for options in plugins.into_iter().filter(|o| !o.id.is_empty()) {
            plugins_options.insert(options.id.clone(), options);
        }

        Ok(PluginConfiguration {
            plugins_options,
            selected,
        })
    }

    /// Stored options of `id`, or an empty set carrying that id.
    pub fn options(&self, id: &str) -> PluginOptions {
        if id.is_empty() {
            return PluginOptions::default();
        }
        self.plugins_options
            .get(id)
            .cloned()
            .unwrap_or_else(|| PluginOptions::new(id))
    }

    pub fn selected_options(&self) -> PluginOptions {
        self.options(&self.selected)
    }

    /// Store `options` under its own id, replacing what was there.
    pub fn set_options(&mut self, options: PluginOptions) {
        self.plugins_options.insert(options.id.clone(), options);
    }

    /// Map legacy or path-like plugin ids onto the canonical plugin names.
    pub fn fix_invalid_params(&mut self) {
        let normalized = normalize_plugin_id(&self.selected);
        if normalized == self.selected {
            return;
        }

        let mut options = self.selected_options();
        options.id = normalized.clone();
        self.plugins_options.remove(&self.selected);
        self.plugins_options.insert(normalized.clone(), options);
        self.selected = normalized;
    }
}

fn normalize_plugin_id(id: &str) -> String {
    match id {
        "obfs" | "simple-obfs" => "obfs-local".to_string(),
        "v2ray-plugin" => id.to_string(),
        _ if id.contains("v2ray") => "v2ray-plugin".to_string(),
        _ => id.to_string(),
    }
}

impl fmt::Display for PluginConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = VecDeque::new();
        for (id, options) in self.plugins_options.iter() {
            if *id == self.selected {
                result.push_front(options.clone());
            } else {
                result.push_back(options.clone());
            }
        }
        if !self.plugins_options.contains_key(&self.selected) {
            result.push_front(self.selected_options());
        }

        let lines: Vec<String> = result.iter().map(|o| o.encode(false)).collect();
        f.write_str(&lines.join("\n"))
    }
}

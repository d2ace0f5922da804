//! Option set of a single transport plugin
//!
//! The textual form is the SIP003 `plugin_opts` grammar: entries separated by
//! `;`, key and value separated by the first unescaped `=`, and `\` escaping
//! the character that follows it. The first entry may carry the plugin id.

use std::fmt;

use linked_hash_map::LinkedHashMap;
use serde_json::{Map, Value};

use super::PluginError;

/// Plugin id plus its `key[=value]` options.
///
/// A key mapped to `None` is a bare flag such as `tls` in `v2ray-plugin;tls`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOptions {
    pub id: String,
    options: LinkedHashMap<String, Option<String>>,
}

impl PluginOptions {
    pub fn new(id: &str) -> Self {
        PluginOptions {
            id: id.to_string(),
            options: LinkedHashMap::new(),
        }
    }

    /// Parse an encoded option string whose first bare entry is the plugin id.
    ///
    /// # Examples
    /// ```
    /// use trojan_go_fmt::plugin::PluginOptions;
    ///
    /// let opts = PluginOptions::parse("obfs-local;obfs=http;obfs-host=a.com").unwrap();
    /// assert_eq!(opts.id, "obfs-local");
    /// assert_eq!(opts.value("obfs"), Some("http"));
    /// ```
    pub fn parse(options: &str) -> Result<Self, PluginError> {
        Self::parse_inner(options, true)
    }

    /// Parse an encoded option string that holds options only, attaching `id`.
    pub fn parse_with_id(id: &str, options: &str) -> Result<Self, PluginError> {
        let mut result = Self::parse_inner(options, false)?;
        result.id = id.to_string();
        Ok(result)
    }

    fn parse_inner(options: &str, parse_id: bool) -> Result<Self, PluginError> {
        let mut result = PluginOptions::default();
        if options.is_empty() {
            return Ok(result);
        }
        if options.chars().any(char::is_control) {
            return Err(PluginError::InvalidOptions(
                "control characters are not allowed".to_string(),
            ));
        }

        let mut current = String::new();
        let mut key: Option<String> = None;
        let mut first_entry = parse_id;
        let mut chars = options.chars();

        while let Some(c) = chars.next() {
            match c {
                // a dangling escape at the end stays a literal backslash
                '\\' => current.push(chars.next().unwrap_or('\\')),
                '=' if key.is_none() => key = Some(std::mem::take(&mut current)),
                ';' => result.finish_entry(&mut key, &mut current, &mut first_entry),
                _ => current.push(c),
            }
        }
        result.finish_entry(&mut key, &mut current, &mut first_entry);

        Ok(result)
    }

    fn finish_entry(
        &mut self,
        key: &mut Option<String>,
        current: &mut String,
        first_entry: &mut bool,
    ) {
        if let Some(k) = key.take() {
            self.options.insert(k, Some(std::mem::take(current)));
        } else if !current.is_empty() {
            let entry = std::mem::take(current);
            if *first_entry {
                self.id = entry;
            } else {
                self.options.insert(entry, None);
            }
        }
        current.clear();
        *first_entry = false;
    }

    /// Rebuild options from a flat `arg` array of a trojan-go
    /// `transport_plugin` block.
    ///
    /// Odd indices set the current key and even indices store a value under
    /// it, so the element at index 0 lands under the empty key. Existing
    /// engine configs rely on this pairing.
    pub fn from_arg_pairs(id: &str, args: &[String]) -> Self {
        let mut result = PluginOptions::new(id);
        let mut key = String::new();
        for (index, param) in args.iter().enumerate() {
            if index % 2 != 0 {
                key = param.clone();
            } else {
                result.options.insert(key.clone(), Some(param.clone()));
            }
        }
        result
    }

    /// Build options from a JSON object. `null` values become bare flags.
    pub fn from_json(id: &str, object: &Map<String, Value>) -> Self {
        let mut result = PluginOptions::new(id);
        for (key, value) in object {
            let value = match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            };
            result.options.insert(key.clone(), value);
        }
        result
    }

    pub fn to_json(&self) -> Map<String, Value> {
        self.options
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Some(v) => Value::String(v.clone()),
                    None => Value::Null,
                };
                (key.clone(), value)
            })
            .collect()
    }

    pub fn insert(&mut self, key: &str, value: Option<&str>) -> Option<Option<String>> {
        self.options
            .insert(key.to_string(), value.map(str::to_string))
    }

    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.options.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Value of `key`, `None` when absent or a bare flag.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.options
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Encode back to the option string.
    ///
    /// With `trim_id` the id is left out, which is the form handed to the
    /// plugin binary. Without it, an option set that has no id encodes to "".
    pub fn encode(&self, trim_id: bool) -> String {
        let mut result = String::new();
        if !trim_id {
            if self.id.is_empty() {
                return result;
            }
            escape_into(&mut result, &self.id);
        }
        for (key, value) in self.options.iter() {
            if !result.is_empty() {
                result.push(';');
            }
            escape_into(&mut result, key);
            if let Some(value) = value {
                result.push('=');
                escape_into(&mut result, value);
            }
        }
        result
    }
}

impl fmt::Display for PluginOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode(true))
    }
}

fn escape_into(result: &mut String, s: &str) {
    for c in s.chars() {
        if matches!(c, '\\' | '=' | ';') {
            result.push('\\');
        }
        result.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_with_id() {
        let opts = PluginOptions::parse("v2ray-plugin;tls;host=example.com;path=/ws").unwrap();
        assert_eq!(opts.id, "v2ray-plugin");
        assert_eq!(opts.len(), 3);
        assert!(opts.contains_key("tls"));
        assert_eq!(opts.value("tls"), None);
        assert_eq!(opts.value("host"), Some("example.com"));
        assert_eq!(opts.value("path"), Some("/ws"));
    }

    #[test]
    fn test_parse_without_id() {
        let opts = PluginOptions::parse_with_id("obfs-local", "obfs=http;obfs-host=a.com").unwrap();
        assert_eq!(opts.id, "obfs-local");
        assert_eq!(opts.value("obfs"), Some("http"));
        assert_eq!(opts.value("obfs-host"), Some("a.com"));

        // leading entry with a value is an option even when parsing ids
        let opts = PluginOptions::parse("obfs=tls").unwrap();
        assert_eq!(opts.id, "");
        assert_eq!(opts.value("obfs"), Some("tls"));
    }

    #[test]
    fn test_escapes() {
        let opts = PluginOptions::parse(r"p;key\=1=a\;b;path=x=y;back=\\").unwrap();
        assert_eq!(opts.value("key=1"), Some("a;b"));
        assert_eq!(opts.value("path"), Some("x=y"));
        assert_eq!(opts.value("back"), Some("\\"));

        assert_eq!(opts.encode(false), r"p;key\=1=a\;b;path=x\=y;back=\\");
    }

    #[test]
    fn test_trailing_backslash_kept() {
        let opts = PluginOptions::parse("obfs-local;obfs=http;host=a\\").unwrap();
        assert_eq!(opts.id, "obfs-local");
        assert_eq!(opts.len(), 2);
        assert_eq!(opts.value("obfs"), Some("http"));
        assert_eq!(opts.value("host"), Some("a\\"));

        let opts = PluginOptions::parse_with_id("obfs-local", "fast-open\\").unwrap();
        assert!(opts.contains_key("fast-open\\"));
    }

    #[test]
    fn test_empty_and_control_chars() {
        assert!(PluginOptions::parse("").unwrap().is_empty());
        assert!(matches!(
            PluginOptions::parse("obfs-local;obfs=http\n"),
            Err(PluginError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_encode() {
        let mut opts = PluginOptions::new("obfs-local");
        opts.insert("obfs", Some("http"));
        opts.insert("fast-open", None);
        assert_eq!(opts.encode(false), "obfs-local;obfs=http;fast-open");
        assert_eq!(opts.encode(true), "obfs=http;fast-open");
        assert_eq!(opts.to_string(), "obfs=http;fast-open");

        let mut anonymous = PluginOptions::default();
        anonymous.insert("a", Some("b"));
        assert_eq!(anonymous.encode(false), "");
        assert_eq!(anonymous.encode(true), "a=b");
    }

    #[test]
    fn test_arg_pairs_parity() {
        let args: Vec<String> = ["-obfs", "http", "-host", "a.com"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let opts = PluginOptions::from_arg_pairs("obfs-local", &args);
        assert_eq!(opts.value(""), Some("-obfs"));
        assert_eq!(opts.value("http"), Some("-host"));
        assert!(!opts.contains_key("-obfs"));
        assert!(!opts.contains_key("a.com"));
        assert_eq!(opts.len(), 2);
    }

    #[test]
    fn test_json_object() {
        let object = json!({ "obfs": "http", "mux": 4, "tls": null });
        let opts = PluginOptions::from_json("obfs-local", object.as_object().unwrap());
        assert_eq!(opts.value("obfs"), Some("http"));
        assert_eq!(opts.value("mux"), Some("4"));
        assert!(opts.contains_key("tls"));

        let back = Value::Object(opts.to_json());
        assert_eq!(back, json!({ "obfs": "http", "mux": "4", "tls": null }));
    }
}

//! Option layers with provenance
//!
//! Collects the three option layers (builtin defaults, user options, public
//! overrides) and records where each one came from.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use super::defaults::BuiltinDefaults;
use super::error::ConfigError;
use super::merge::deep_merge;

/// Environment variable holding a JSON public-override layer
pub const PUBLIC_CONFIG_ENV: &str = "IUBENDA_PUBLIC_CONFIG";

/// Origin of an option layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    User,
    Public,
    Env,
}

/// A contributing option source with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Origin of this source
    pub origin: ConfigOrigin,

    /// File path (None for builtin/env)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/env)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// The three merge inputs, lowest precedence first
#[derive(Debug, Clone)]
pub struct OptionLayers {
    /// Builtin defaults
    pub defaults: Value,

    /// Options supplied by the embedding application
    pub user: Value,

    /// Late overrides; win over everything else
    pub public: Value,

    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,
}

impl Default for OptionLayers {
    fn default() -> Self {
        Self::builtin()
    }
}

impl OptionLayers {
    /// Builtin defaults only
    pub fn builtin() -> Self {
        Self {
            defaults: BuiltinDefaults::default().to_value(),
            user: Value::Null,
            public: Value::Null,
            sources: vec![ConfigSource {
                origin: ConfigOrigin::Builtin,
                path: None,
                digest: None,
            }],
        }
    }

    /// Build layers from optional user and public option files.
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as TOML.
    /// A path that is given but cannot be read is an `Io` error.
    pub fn load(user_path: Option<&Path>, public_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut layers = Self::builtin();

        if let Some(path) = user_path {
            let (value, digest) = load_file(path)?;
            layers.user = deep_merge(layers.user, value);
            layers.sources.push(ConfigSource {
                origin: ConfigOrigin::User,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        if let Some(path) = public_path {
            let (value, digest) = load_file(path)?;
            layers.public = deep_merge(layers.public, value);
            layers.sources.push(ConfigSource {
                origin: ConfigOrigin::Public,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        Ok(layers)
    }

    /// Merge an in-memory user layer
    pub fn with_user(mut self, user: Value) -> Self {
        self.user = deep_merge(self.user, user);
        self
    }

    /// Merge a public layer from a JSON string, as found in [`PUBLIC_CONFIG_ENV`]
    pub fn with_public_json(mut self, json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ConfigError::Parse(format!("{} is not valid JSON: {}", PUBLIC_CONFIG_ENV, e)))?;
        self.public = deep_merge(self.public, value);
        self.sources.push(ConfigSource {
            origin: ConfigOrigin::Env,
            path: None,
            digest: None,
        });
        Ok(self)
    }

    /// Apply [`PUBLIC_CONFIG_ENV`] if it is set and non-empty
    pub fn with_public_env(self) -> Result<Self, ConfigError> {
        match std::env::var(PUBLIC_CONFIG_ENV) {
            Ok(json) if !json.trim().is_empty() => self.with_public_json(&json),
            _ => Ok(self),
        }
    }
}

/// Load and parse an option file, returning the value and digest
fn load_file(path: &Path) -> Result<(Value, String), ConfigError> {
    let bytes = fs::read(path).map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

    // Compute digest
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents = String::from_utf8(bytes)
        .map_err(|e| ConfigError::Parse(format!("Invalid UTF-8: {}", e)))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let value = if is_json {
        serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))?
    } else {
        let toml_value: toml::Value = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e)))?;
        toml_to_json(toml_value)
    };

    Ok((value, digest))
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_builtin_only() {
        let layers = OptionLayers::builtin();
        assert_eq!(layers.defaults["config"]["lang"], "en");
        assert!(layers.user.is_null());
        assert!(layers.public.is_null());
        assert_eq!(layers.sources.len(), 1);
        assert_eq!(layers.sources[0].origin, ConfigOrigin::Builtin);
    }

    #[test]
    fn test_load_toml_user_file() {
        let mut temp = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(temp, "dev = false").unwrap();
        writeln!(temp, "[config]").unwrap();
        writeln!(temp, "siteId = 1").unwrap();
        writeln!(temp, "cookiePolicyId = 9").unwrap();
        writeln!(temp, "[i18n.it]").unwrap();
        writeln!(temp, "cookiePolicyId = 42").unwrap();

        let layers = OptionLayers::load(Some(temp.path()), None).unwrap();

        assert_eq!(layers.user["dev"], false);
        assert_eq!(layers.user["config"]["siteId"], 1);
        assert_eq!(layers.user["i18n"]["it"]["cookiePolicyId"], 42);
        assert_eq!(layers.sources.len(), 2);
        assert_eq!(layers.sources[1].origin, ConfigOrigin::User);
        assert_eq!(layers.sources[1].digest.as_ref().map(|d| d.len()), Some(64));
    }

    #[test]
    fn test_load_json_public_file() {
        let mut temp = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp, r#"{{"links": {{"style": "black"}}}}"#).unwrap();

        let layers = OptionLayers::load(None, Some(temp.path())).unwrap();

        assert!(layers.user.is_null());
        assert_eq!(layers.public["links"]["style"], "black");
        assert_eq!(layers.sources[1].origin, ConfigOrigin::Public);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = OptionLayers::load(Some(Path::new("/nonexistent/iubenda.toml")), None);
        assert!(matches!(result, Err(ConfigError::Io(_))));

        let result = OptionLayers::load(None, Some(Path::new("/nonexistent/public.json")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut temp = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(temp, "config = [unclosed").unwrap();

        let result = OptionLayers::load(Some(temp.path()), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_public_json_layer() {
        let layers = OptionLayers::builtin()
            .with_public_json(r#"{"config": {"cookiePolicyId": 7}}"#)
            .unwrap();

        assert_eq!(layers.public["config"]["cookiePolicyId"], 7);
        assert_eq!(layers.sources.last().unwrap().origin, ConfigOrigin::Env);

        let result = OptionLayers::builtin().with_public_json("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_in_memory_layers_merge() {
        let layers = OptionLayers::builtin()
            .with_user(json!({"config": {"siteId": 1}}))
            .with_user(json!({"config": {"cookiePolicyId": 2}}));

        assert_eq!(layers.user["config"]["siteId"], 1);
        assert_eq!(layers.user["config"]["cookiePolicyId"], 2);
    }
}

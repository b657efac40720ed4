//! Typed module options
//!
//! The merged option tree is deserialized into [`ModuleOptions`]. Keys that
//! are not modelled here are kept in `extra` maps so they reach the
//! bootstrap payload unchanged.

use std::collections::BTreeMap;

use iubenda_links::LinksConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::defaults::BuiltinDefaults;
use super::error::ConfigError;
use crate::script::ScriptDescriptor;

/// Deployment environment tag embedded in the bootstrap script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Dev,
    Prod,
}

impl Env {
    pub fn as_str(&self) -> &'static str {
        match self {
            Env::Dev => "dev",
            Env::Prod => "prod",
        }
    }
}

/// Cosmetic banner settings, serialized verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerAppearance {
    pub accept_button_display: bool,
    pub customize_button_display: bool,
    pub reject_button_display: bool,
    pub accept_button_color: String,
    pub accept_button_caption_color: String,
    pub customize_button_color: String,
    pub customize_button_caption_color: String,
    pub reject_button_color: String,
    pub reject_button_caption_color: String,
    pub close_button_display: bool,
    pub position: String,
    pub text_color: String,
    pub background_color: String,

    /// Banner keys not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BannerAppearance {
    fn default() -> Self {
        Self {
            accept_button_display: true,
            customize_button_display: true,
            reject_button_display: false,
            accept_button_color: "black".to_string(),
            accept_button_caption_color: "white".to_string(),
            customize_button_color: "#bbb".to_string(),
            customize_button_caption_color: "black".to_string(),
            reject_button_color: "white".to_string(),
            reject_button_caption_color: "black".to_string(),
            close_button_display: false,
            position: "float-bottom-right".to_string(),
            text_color: "#333".to_string(),
            background_color: "#ddd".to_string(),
            extra: Map::new(),
        }
    }
}

/// The `csConfiguration` payload handed to the consent script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerConfig {
    /// iubenda site id (required)
    #[serde(deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub site_id: Option<u64>,

    /// Global cookie policy id (required)
    #[serde(deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub cookie_policy_id: Option<u64>,

    pub lang: String,
    pub gdpr_applies_globally: bool,
    pub cookie_policy_in_other_window: bool,
    pub consent_on_continued_browsing: bool,
    pub per_purpose_consent: bool,
    pub banner: BannerAppearance,

    /// Configuration keys not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            site_id: None,
            cookie_policy_id: None,
            lang: "en".to_string(),
            gdpr_applies_globally: false,
            cookie_policy_in_other_window: false,
            consent_on_continued_browsing: false,
            per_purpose_consent: true,
            banner: BannerAppearance::default(),
            extra: Map::new(),
        }
    }
}

/// Per-locale overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleOverride {
    #[serde(deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub cookie_policy_id: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Extra head entries supplied by the embedding application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadOptions {
    /// Scripts placed ahead of the consent scripts
    #[serde(deserialize_with = "lenient_list")]
    pub script: Vec<ScriptDescriptor>,
}

/// Fully merged module options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleOptions {
    /// Tag the bootstrap script as `dev` rather than `prod`
    pub dev: bool,

    /// Emit the Google consent-mode defaults ahead of the banner config
    pub consent_mode: bool,

    pub config: BannerConfig,
    pub links: LinksConfig,

    /// Locale code -> overrides
    #[serde(deserialize_with = "lenient_map")]
    pub i18n: BTreeMap<String, LocaleOverride>,

    pub head: HeadOptions,
}

impl Default for ModuleOptions {
    fn default() -> Self {
        BuiltinDefaults::default().into_options()
    }
}

impl ModuleOptions {
    /// Deserialize a merged option tree.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Site id, if set and non-zero
    pub fn site_id(&self) -> Option<u64> {
        self.config.site_id.filter(|id| *id != 0)
    }

    /// Global cookie policy id, if set and non-zero
    pub fn cookie_policy_id(&self) -> Option<u64> {
        self.config.cookie_policy_id.filter(|id| *id != 0)
    }

    /// Both required identifiers, or None if either is missing
    pub fn identifiers(&self) -> Option<(u64, u64)> {
        Some((self.site_id()?, self.cookie_policy_id()?))
    }

    pub fn env(&self) -> Env {
        if self.dev {
            Env::Dev
        } else {
            Env::Prod
        }
    }

    /// Cookie policy id override for a locale, if one is configured and non-zero
    pub fn locale_policy_id(&self, locale: &str) -> Option<u64> {
        self.i18n
            .get(locale)
            .and_then(|o| o.cookie_policy_id)
            .filter(|id| *id != 0)
    }
}

/// Accept an id given as an integer, an integral float or a numeric string.
/// Anything else is dropped with a warning and reads as missing.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

fn id_from_value(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    if id.is_none() {
        warn!(value = %value, "ignoring identifier that is not a non-negative integer");
    }
    id
}

/// Keyed entries; an entry that does not deserialize is skipped with a warning.
fn lenient_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        Value::Null => return Ok(BTreeMap::new()),
        other => {
            warn!(value = %other, "ignoring keyed options that are not a table");
            return Ok(BTreeMap::new());
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|(key, entry)| match serde_json::from_value(entry) {
            Ok(parsed) => Some((key, parsed)),
            Err(e) => {
                warn!(key = %key, error = %e, "skipping malformed option entry");
                None
            }
        })
        .collect())
}

/// List entries; an entry that does not deserialize is skipped with a warning.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!(value = %other, "ignoring list options that are not an array");
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed option entry");
                None
            }
        })
        .collect())
}

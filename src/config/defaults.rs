//! Built-in module defaults (layer 1)
//!
//! Hardcoded defaults for every option except the two required ids.

use iubenda_links::LinksConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::options::{BannerConfig, HeadOptions, ModuleOptions};

/// Built-in default option values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Tag the bootstrap script as dev (default: true)
    pub dev: bool,

    /// Google consent mode prelude (default: true)
    pub consent_mode: bool,

    /// Banner configuration, ids unset (default: lang "en", per-purpose consent)
    pub config: BannerConfig,

    /// Links script and styling (default: enabled, nostyle, white label, embed)
    pub links: LinksConfig,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            dev: true,
            consent_mode: true,
            config: BannerConfig::default(),
            links: LinksConfig::default(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "dev": self.dev,
            "consentMode": self.consent_mode,
            "config": self.config,
            "links": self.links,
            "i18n": {},
            "head": {"script": []}
        })
    }

    pub fn into_options(self) -> ModuleOptions {
        ModuleOptions {
            dev: self.dev,
            consent_mode: self.consent_mode,
            config: self.config,
            links: self.links,
            i18n: BTreeMap::new(),
            head: HeadOptions::default(),
        }
    }
}

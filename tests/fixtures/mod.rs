//! Shared option fixtures for integration tests

#![allow(dead_code)]

use iubenda_consent::{OptionResolver, ResolvedConfig};
use serde_json::{json, Value};

/// Minimal user options with both required ids
pub fn minimal_options(site_id: u64, cookie_policy_id: u64) -> Value {
    json!({
        "config": {
            "siteId": site_id,
            "cookiePolicyId": cookie_policy_id
        }
    })
}

/// Options with an Italian policy override
pub fn localized_options() -> Value {
    json!({
        "config": {"siteId": 1, "cookiePolicyId": 1},
        "i18n": {
            "it": {"cookiePolicyId": 42},
            "es": {"cookiePolicyId": 77}
        }
    })
}

/// Resolve user options against builtin defaults
pub fn resolve_user(user: Value) -> ResolvedConfig {
    OptionResolver::default()
        .resolve(user, Value::Null)
        .expect("fixture options should resolve")
}

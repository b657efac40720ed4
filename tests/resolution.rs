//! Option resolution tests
//!
//! Script counts and order, missing identifiers, merge precedence and the
//! bootstrap payload.

mod fixtures;

use fixtures::{minimal_options, resolve_user};
use iubenda_consent::config::{deep_merge, BuiltinDefaults, OptionLayers};
use iubenda_consent::script::{
    CONSENT_SCRIPT_ID, CONSENT_SCRIPT_SRC, LINKS_SCRIPT_ID, LINKS_SCRIPT_SRC, SETUP_SCRIPT_ID,
};
use iubenda_consent::{merge_options, resolve, ConsentState, OptionResolver};
use serde_json::{json, Value};

// =============================================================================
// Script descriptors
// =============================================================================

#[test]
fn test_active_config_emits_three_scripts_in_order() {
    let resolved = resolve_user(minimal_options(1, 9));

    let scripts = resolved.scripts();
    assert_eq!(scripts.len(), 3);
    assert_eq!(scripts[0].id, SETUP_SCRIPT_ID);
    assert!(scripts[0].inline_body.is_some());
    assert_eq!(scripts[1].id, CONSENT_SCRIPT_ID);
    assert_eq!(scripts[1].src.as_deref(), Some(CONSENT_SCRIPT_SRC));
    assert_eq!(scripts[2].id, LINKS_SCRIPT_ID);
    assert_eq!(scripts[2].src.as_deref(), Some(LINKS_SCRIPT_SRC));
    assert!(scripts[2].async_load);
}

#[test]
fn test_links_disabled_emits_two_scripts() {
    let mut user = minimal_options(1, 9);
    user["links"] = json!({"enable": false});

    let resolved = resolve_user(user);

    let ids: Vec<&str> = resolved.scripts().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![SETUP_SCRIPT_ID, CONSENT_SCRIPT_ID]);
}

#[test]
fn test_script_count_for_many_id_pairs() {
    for (site_id, policy_id) in [(1, 1), (7, 123456), (u64::MAX, 2)] {
        for enable in [true, false] {
            let mut user = minimal_options(site_id, policy_id);
            user["links"] = json!({"enable": enable});

            let resolved = resolve_user(user);
            assert_eq!(resolved.state(), ConsentState::Active);
            assert_eq!(resolved.scripts().len(), if enable { 3 } else { 2 });
        }
    }
}

// =============================================================================
// Missing identifiers
// =============================================================================

#[test]
fn test_missing_identifiers_emit_no_scripts() {
    let cases = [
        json!({}),
        json!({"config": {"siteId": 1}}),
        json!({"config": {"cookiePolicyId": 9}}),
        json!({"config": {"siteId": 0, "cookiePolicyId": 9}}),
        json!({"config": {"siteId": 1, "cookiePolicyId": null}}),
    ];

    for user in cases {
        let resolved = resolve_user(user.clone());
        assert_eq!(resolved.state(), ConsentState::Unconfigured, "case {}", user);
        assert!(resolved.scripts().is_empty(), "case {}", user);
    }
}

#[test]
fn test_unconfigured_still_carries_merged_options() {
    let resolved = resolve_user(json!({"dev": false, "config": {"siteId": 1}}));

    assert!(!resolved.is_active());
    assert!(!resolved.options().dev);
    assert_eq!(resolved.options().site_id(), Some(1));
}

// =============================================================================
// Merge precedence
// =============================================================================

#[test]
fn test_public_overrides_user_overrides_defaults() {
    let defaults = BuiltinDefaults::default().to_value();
    let user = json!({
        "config": {"siteId": 1, "cookiePolicyId": 2, "lang": "it", "banner": {"textColor": "#111"}},
        "links": {"style": "white"}
    });
    let public = json!({
        "config": {"lang": "de"},
        "links": {"embed": false}
    });

    let resolved = resolve(defaults, user, public).unwrap();
    let options = resolved.options();

    // public beats user
    assert_eq!(options.config.lang, "de");
    // user beats defaults
    assert_eq!(options.config.banner.text_color, "#111");
    assert_eq!(options.links.style.as_str(), "white");
    // public beats defaults
    assert!(!options.links.embed);
    // untouched defaults survive
    assert_eq!(options.config.banner.background_color, "#ddd");
    assert!(options.links.white_label);
}

#[test]
fn test_null_in_public_layer_does_not_erase_user_value() {
    let resolved = OptionResolver::default()
        .resolve(
            minimal_options(1, 9),
            json!({"config": {"cookiePolicyId": null, "lang": null}}),
        )
        .unwrap();

    assert!(resolved.is_active());
    assert_eq!(resolved.options().cookie_policy_id(), Some(9));
    assert_eq!(resolved.options().config.lang, "en");
}

#[test]
fn test_arrays_replaced_not_concatenated() {
    let defaults = json!({"config": {"purposes": [1, 2, 3]}});
    let merged = merge_options(defaults, json!({"config": {"purposes": [4]}}), Value::Null);
    assert_eq!(merged["config"]["purposes"], json!([4]));
}

#[test]
fn test_merge_idempotent_over_defaults() {
    let a = BuiltinDefaults::default().to_value();
    let b = json!({
        "dev": false,
        "config": {"siteId": 3, "banner": {"position": "top", "logo": null}},
        "i18n": {"it": {"cookiePolicyId": 42}}
    });

    let once = deep_merge(a, b.clone());
    assert_eq!(deep_merge(once.clone(), b), once);
}

// =============================================================================
// Bootstrap payload
// =============================================================================

#[test]
fn test_bootstrap_embeds_config_and_env() {
    let mut user = minimal_options(1, 9);
    user["dev"] = json!(true);
    user["config"]["countryDetection"] = json!(true);

    let resolved = resolve_user(user);
    let body = resolved.scripts()[0].inline_body.as_deref().unwrap();

    assert!(body.contains("_iub.env = \"dev\";"));
    assert!(body.contains("\"siteId\":1"));
    assert!(body.contains("\"cookiePolicyId\":9"));
    assert!(body.contains("\"countryDetection\":true"));
    assert!(body.contains("\"lang\":\"en\""));
}

#[test]
fn test_bootstrap_prod_env() {
    let mut user = minimal_options(1, 9);
    user["dev"] = json!(false);

    let resolved = resolve_user(user);
    let body = resolved.scripts()[0].inline_body.as_deref().unwrap();
    assert!(body.contains("_iub.env = \"prod\";"));
}

// =============================================================================
// Layers from files
// =============================================================================

#[test]
fn test_resolve_from_layer_files() {
    use std::io::Write;

    let mut user = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(user, "[config]").unwrap();
    writeln!(user, "siteId = 1").unwrap();
    writeln!(user, "cookiePolicyId = 9").unwrap();
    writeln!(user, "[links]").unwrap();
    writeln!(user, "enable = false").unwrap();

    let mut public = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(public, r#"{{"links": {{"enable": true, "style": "black"}}}}"#).unwrap();

    let layers = OptionLayers::load(Some(user.path()), Some(public.path())).unwrap();
    let resolved = OptionResolver::resolve_layers(layers).unwrap();

    assert!(resolved.is_active());
    assert_eq!(resolved.scripts().len(), 3);
    assert_eq!(resolved.options().links.style.as_str(), "black");
    assert_eq!(resolved.sources().len(), 3);
}

#[test]
fn test_head_scripts_from_toml_precede_consent_scripts() {
    use std::io::Write;

    let mut user = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(user, "[config]").unwrap();
    writeln!(user, "siteId = 1").unwrap();
    writeln!(user, "cookiePolicyId = 9.0").unwrap();
    writeln!(user, "[[head.script]]").unwrap();
    writeln!(user, "hid = \"analytics\"").unwrap();
    writeln!(user, "src = \"//x/a.js\"").unwrap();

    let layers = OptionLayers::load(Some(user.path()), None).unwrap();
    let resolved = OptionResolver::resolve_layers(layers).unwrap();

    let ids: Vec<&str> = resolved.scripts().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["analytics", SETUP_SCRIPT_ID, CONSENT_SCRIPT_ID, LINKS_SCRIPT_ID]
    );
}

#[test]
fn test_malformed_option_disables_banner_without_error() {
    let mut user = minimal_options(1, 9);
    user["dev"] = json!("yes");

    let resolved = resolve_user(user);
    assert_eq!(resolved.state(), ConsentState::Unconfigured);
    assert!(resolved.scripts().is_empty());
}

//! Inline bootstrap script
//!
//! The bootstrap body is a fixed template with three placeholders. The
//! banner configuration is substituted last so placeholder-like text inside
//! user values is never expanded.

use crate::config::{Env, ModuleOptions};

const ENV_PLACEHOLDER: &str = "{{env}}";
const CONSENT_MODE_PLACEHOLDER: &str = "{{consent_mode}}";
const CONFIG_PLACEHOLDER: &str = "{{config_json}}";

/// Bootstrap contract understood by the consent script.
const BOOTSTRAP_TEMPLATE: &str = "\
var _iub = _iub || [];
_iub.env = \"{{env}}\";
{{consent_mode}}_iub.csConfiguration = {{config_json}};
";

/// Google consent mode defaults, applied before the banner loads.
const CONSENT_MODE_PRELUDE: &str = "\
window.dataLayer = window.dataLayer || [];
function gtag(){dataLayer.push(arguments);}
gtag(\"consent\", \"default\", {\"ad_storage\": \"denied\", \"analytics_storage\": \"denied\", \"wait_for_update\": 500});
";

/// Render the inline bootstrap body for the given options.
pub fn render_bootstrap(options: &ModuleOptions, env: Env) -> Result<String, serde_json::Error> {
    let config_json = script_safe_json(&serde_json::to_string(&options.config)?);
    let prelude = if options.consent_mode {
        CONSENT_MODE_PRELUDE
    } else {
        ""
    };

    Ok(BOOTSTRAP_TEMPLATE
        .replace(ENV_PLACEHOLDER, env.as_str())
        .replace(CONSENT_MODE_PLACEHOLDER, prelude)
        .replace(CONFIG_PLACEHOLDER, &config_json))
}

/// Escape `</` so a string value cannot close the surrounding script
/// element. `\/` is a valid JSON escape, so the payload is unchanged.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

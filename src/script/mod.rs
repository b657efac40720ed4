//! Head script descriptors
//!
//! The order of descriptors is the order the browser executes them in:
//! scripts supplied under `head.script` first, then the bootstrap, the
//! consent script and the optional links script.

mod bootstrap;

pub use bootstrap::render_bootstrap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ModuleOptions;

/// Id of the inline bootstrap script
pub const SETUP_SCRIPT_ID: &str = "iubenda-setup";

/// Id of the consent solution script
pub const CONSENT_SCRIPT_ID: &str = "iubenda-cs-script";

/// Id of the links script
pub const LINKS_SCRIPT_ID: &str = "iubenda-script";

/// Consent solution script, always loaded
pub const CONSENT_SCRIPT_SRC: &str = "//cdn.iubenda.com/cs/iubenda_cs.js";

/// Links script, loaded only when links are enabled
pub const LINKS_SCRIPT_SRC: &str = "//cdn.iubenda.com/iubenda.js";

/// One `<script>` element to place in the page head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptDescriptor {
    /// Stable id used for de-duplication by the head manager; may be empty
    /// for user scripts
    #[serde(default, alias = "hid")]
    pub id: String,

    /// External source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Inline body
    #[serde(default, alias = "innerHTML", skip_serializing_if = "Option::is_none")]
    pub inline_body: Option<String>,

    /// Load asynchronously
    #[serde(default, rename = "async", skip_serializing_if = "std::ops::Not::not")]
    pub async_load: bool,
}

impl ScriptDescriptor {
    pub fn inline(id: &str, body: String) -> Self {
        Self {
            id: id.to_string(),
            src: None,
            inline_body: Some(body),
            async_load: false,
        }
    }

    pub fn external(id: &str, src: &str) -> Self {
        Self {
            id: id.to_string(),
            src: Some(src.to_string()),
            inline_body: None,
            async_load: false,
        }
    }

    pub fn with_async(mut self) -> Self {
        self.async_load = true;
        self
    }

    pub fn is_inline(&self) -> bool {
        self.inline_body.is_some()
    }
}

/// Build the ordered script list for options whose ids have been validated.
///
/// User scripts from `head.script` keep their order and come first. A user
/// script that reuses one of the consent script ids is dropped.
pub fn build_scripts(options: &ModuleOptions) -> Result<Vec<ScriptDescriptor>, serde_json::Error> {
    let mut scripts = Vec::with_capacity(options.head.script.len() + 3);

    for script in &options.head.script {
        if is_consent_script_id(&script.id) {
            warn!(id = %script.id, "dropping head script that reuses a consent script id");
            continue;
        }
        scripts.push(script.clone());
    }

    scripts.push(ScriptDescriptor::inline(
        SETUP_SCRIPT_ID,
        render_bootstrap(options, options.env())?,
    ));
    scripts.push(ScriptDescriptor::external(CONSENT_SCRIPT_ID, CONSENT_SCRIPT_SRC));

    if options.links.enable {
        scripts.push(ScriptDescriptor::external(LINKS_SCRIPT_ID, LINKS_SCRIPT_SRC).with_async());
    }

    Ok(scripts)
}

fn is_consent_script_id(id: &str) -> bool {
    matches!(id, SETUP_SCRIPT_ID | CONSENT_SCRIPT_ID | LINKS_SCRIPT_ID)
}

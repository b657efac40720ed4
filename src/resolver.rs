//! Option resolution
//!
//! Merges the option layers, checks the required identifiers and builds the
//! head scripts. The result is an immutable [`ResolvedConfig`] that the
//! embedding application shares with every instance activation.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{deep_merge, ConfigError, ConfigSource, ModuleOptions, OptionLayers};
use crate::script::{build_scripts, ScriptDescriptor};

/// Whether the banner can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentState {
    /// A required id is missing; no scripts, inert facade
    Unconfigured,
    /// Ids present; scripts and URLs are live
    Active,
}

/// Output of option resolution
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    state: ConsentState,
    options: ModuleOptions,
    scripts: Vec<ScriptDescriptor>,
    sources: Vec<ConfigSource>,
}

impl ResolvedConfig {
    pub fn state(&self) -> ConsentState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ConsentState::Active
    }

    pub fn options(&self) -> &ModuleOptions {
        &self.options
    }

    /// Head scripts in execution order; empty when unconfigured
    pub fn scripts(&self) -> &[ScriptDescriptor] {
        &self.scripts
    }

    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }
}

/// Resolves option layers against a fixed set of defaults
#[derive(Debug, Clone)]
pub struct OptionResolver {
    defaults: Value,
}

impl Default for OptionResolver {
    fn default() -> Self {
        Self::new(OptionLayers::builtin().defaults)
    }
}

impl OptionResolver {
    pub fn new(defaults: Value) -> Self {
        Self { defaults }
    }

    /// Resolve user options and public overrides against the defaults.
    pub fn resolve(&self, user: Value, public: Value) -> Result<ResolvedConfig, ConfigError> {
        resolve_with_sources(self.defaults.clone(), user, public, Vec::new())
    }

    /// Resolve pre-loaded layers, keeping their provenance. The layers'
    /// own defaults are used, not the resolver's.
    pub fn resolve_layers(layers: OptionLayers) -> Result<ResolvedConfig, ConfigError> {
        resolve_with_sources(layers.defaults, layers.user, layers.public, layers.sources)
    }
}

/// Merge `public` over (`defaults` merged with `user`).
///
/// Objects merge per key, arrays are replaced, nulls never override.
pub fn merge_options(defaults: Value, user: Value, public: Value) -> Value {
    deep_merge(deep_merge(defaults, user), public)
}

/// Resolve three option layers into a [`ResolvedConfig`].
///
/// Missing or zero `siteId`/`cookiePolicyId` is not an error, and neither is
/// a merged tree that does not deserialize into [`ModuleOptions`]: a warning
/// is logged and the result is [`ConsentState::Unconfigured`] with no
/// scripts. Errors are reserved for layers that are not objects.
pub fn resolve(defaults: Value, user: Value, public: Value) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_sources(defaults, user, public, Vec::new())
}

fn resolve_with_sources(
    defaults: Value,
    user: Value,
    public: Value,
    sources: Vec<ConfigSource>,
) -> Result<ResolvedConfig, ConfigError> {
    check_layer("defaults", &defaults)?;
    check_layer("user options", &user)?;
    check_layer("public options", &public)?;

    let options = match ModuleOptions::from_value(merge_options(defaults, user, public)) {
        Ok(options) => options,
        Err(e) => {
            warn!(error = %e, "invalid consent banner options; consent banner disabled");
            return Ok(ResolvedConfig {
                state: ConsentState::Unconfigured,
                options: ModuleOptions::default(),
                scripts: Vec::new(),
                sources,
            });
        }
    };

    if options.identifiers().is_none() {
        warn!(
            site_id = ?options.config.site_id,
            cookie_policy_id = ?options.config.cookie_policy_id,
            "siteId and cookiePolicyId are required options; consent banner disabled"
        );
        return Ok(ResolvedConfig {
            state: ConsentState::Unconfigured,
            options,
            scripts: Vec::new(),
            sources,
        });
    }

    let scripts = build_scripts(&options)?;
    debug!(
        env = options.env().as_str(),
        scripts = scripts.len(),
        "resolved consent banner options"
    );

    Ok(ResolvedConfig {
        state: ConsentState::Active,
        options,
        scripts,
        sources,
    })
}

/// Layers must be objects; null stands for an absent layer.
fn check_layer(name: &str, value: &Value) -> Result<(), ConfigError> {
    if value.is_object() || value.is_null() {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{} must be a table, got {}",
            name,
            kind(value)
        )))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

//! Runtime facade
//!
//! Activated once per application instance. Reads the resolved options,
//! picks the effective cookie policy id for the instance's locale, registers
//! the head scripts and provides a [`ConsentFacade`] under [`FACADE_KEY`].

mod context;
mod handle;

pub use context::{FixedLocale, RenderContext};
pub use handle::ConsentFacade;

use std::sync::Arc;

use tracing::debug;

use crate::config::ModuleOptions;
use crate::resolver::ResolvedConfig;
use crate::script::ScriptDescriptor;

/// Key the facade is provided under
pub const FACADE_KEY: &str = "iubenda";

/// Localization capability of a host application instance.
pub trait Localization {
    /// Locale code currently active, e.g. "it"
    fn active_locale(&self) -> &str;
}

/// The host application instance being activated.
pub trait AppInstance {
    /// Localization capability, if the host has one
    fn localization(&self) -> Option<&dyn Localization>;

    /// Register scripts with the page head, preserving their order
    fn use_head(&mut self, scripts: &[ScriptDescriptor]);

    /// Make the facade available to the rest of the application
    fn provide(&mut self, key: &'static str, facade: Arc<ConsentFacade>);
}

/// Activate the consent facade on an application instance.
///
/// Returns `None` and touches nothing when the configuration is
/// unconfigured. Otherwise registers the head scripts, provides the facade
/// under [`FACADE_KEY`] and returns it.
pub fn activate<A>(config: &ResolvedConfig, app: &mut A) -> Option<Arc<ConsentFacade>>
where
    A: AppInstance + ?Sized,
{
    if !config.is_active() {
        debug!("consent banner unconfigured; facade inactive");
        return None;
    }

    let options = config.options();
    let policy_id = effective_policy_id(options, app.localization())?;
    let facade = Arc::new(ConsentFacade::new(policy_id, &options.links));

    app.use_head(config.scripts());
    app.provide(FACADE_KEY, Arc::clone(&facade));

    debug!(policy_id, "consent facade activated");
    Some(facade)
}

/// Cookie policy id for an instance.
///
/// A locale override wins when the host has a localization capability and
/// the active locale has a non-zero `cookiePolicyId`; otherwise the global
/// id is used.
pub fn effective_policy_id(
    options: &ModuleOptions,
    localization: Option<&dyn Localization>,
) -> Option<u64> {
    let locale_id = match localization {
        Some(l10n) => options.locale_policy_id(l10n.active_locale()),
        None => {
            debug!("i18n not detected");
            None
        }
    };

    locale_id.or_else(|| options.cookie_policy_id())
}

//! A ready-made application instance for server-side rendering
//!
//! One [`RenderContext`] per request: it carries the request locale, the
//! page head being built, and the facades provided during activation.

use std::collections::HashMap;
use std::sync::Arc;

use super::handle::ConsentFacade;
use super::{AppInstance, Localization, FACADE_KEY};
use crate::head::PageHead;
use crate::script::ScriptDescriptor;

/// Localization capability with a fixed active locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub String);

impl Localization for FixedLocale {
    fn active_locale(&self) -> &str {
        &self.0
    }
}

/// Per-request application instance.
#[derive(Debug, Default)]
pub struct RenderContext {
    localization: Option<FixedLocale>,
    head: PageHead,
    provided: HashMap<&'static str, Arc<ConsentFacade>>,
}

impl RenderContext {
    /// Context without a localization capability
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose active locale is `locale`
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            localization: Some(FixedLocale(locale.into())),
            ..Self::default()
        }
    }

    pub fn head(&self) -> &PageHead {
        &self.head
    }

    /// Value provided under `key`, if any
    pub fn injected(&self, key: &str) -> Option<&Arc<ConsentFacade>> {
        self.provided.get(key)
    }

    /// The consent facade, once activated
    pub fn consent(&self) -> Option<&Arc<ConsentFacade>> {
        self.injected(FACADE_KEY)
    }
}

impl AppInstance for RenderContext {
    fn localization(&self) -> Option<&dyn Localization> {
        self.localization.as_ref().map(|l| l as &dyn Localization)
    }

    fn use_head(&mut self, scripts: &[ScriptDescriptor]) {
        self.head.add_scripts(scripts.iter().cloned());
    }

    fn provide(&mut self, key: &'static str, facade: Arc<ConsentFacade>) {
        self.provided.insert(key, facade);
    }
}

//! iubenda consent banner integration
//!
//! This crate resolves layered banner options into an immutable
//! [`ResolvedConfig`] carrying the ordered head scripts. It then activates a
//! [`ConsentFacade`] per application instance, exposing policy URLs and
//! link helpers to the rest of the application.
//!
//! ```
//! use iubenda_consent::{activate, OptionResolver, RenderContext};
//! use serde_json::{json, Value};
//!
//! let resolved = OptionResolver::default()
//!     .resolve(json!({"config": {"siteId": 1, "cookiePolicyId": 9}}), Value::Null)
//!     .unwrap();
//!
//! let mut ctx = RenderContext::with_locale("en");
//! let facade = activate(&resolved, &mut ctx).unwrap();
//! assert_eq!(facade.privacy_policy_url(), "https://www.iubenda.com/privacy-policy/9");
//! assert_eq!(ctx.head().scripts().len(), 3);
//! ```

pub mod config;
pub mod facade;
pub mod head;
pub mod resolver;
pub mod script;

pub use config::{ConfigError, ConfigOrigin, ConfigSource, Env, ModuleOptions, OptionLayers};
pub use facade::{activate, AppInstance, ConsentFacade, Localization, RenderContext, FACADE_KEY};
pub use head::PageHead;
pub use iubenda_links::{LinkAttributes, LinkStyle, LinksConfig, PolicyUrls};
pub use resolver::{merge_options, resolve, ConsentState, OptionResolver, ResolvedConfig};
pub use script::ScriptDescriptor;

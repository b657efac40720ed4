//! Policy URL and link markup builders for iubenda-hosted policies.
//!
//! Everything in this crate is a pure function of a policy id and a links
//! configuration. Nothing here performs I/O, and nothing here escapes HTML:
//! labels and extra classes are embedded exactly as given.

mod config;
mod markup;
mod urls;

pub use config::{LinkStyle, LinksConfig};
pub use markup::{anchor_html, join_classes, links_class, LinkAttributes};
pub use urls::PolicyUrls;

/// Base domain for hosted policy pages.
pub const BASE_URL: &str = "https://www.iubenda.com";

/// Label used when a privacy policy link is requested without one.
pub const DEFAULT_PRIVACY_POLICY_LABEL: &str = "Privacy Policy";

/// Label used when a cookie policy link is requested without one.
pub const DEFAULT_COOKIE_POLICY_LABEL: &str = "Cookie Policy";

/// Class token that is always present on policy links.
const NOIFRAME_CLASS: &str = "iubenda-noiframe";

/// Class token added when links are white-labelled.
const NO_BRAND_CLASS: &str = "no-brand";

/// Class token added when links open in the embedded popup.
const EMBED_CLASS: &str = "iubenda-embed";

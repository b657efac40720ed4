//! Link class computation and anchor markup.
//!
//! Labels and caller-supplied classes are written into the markup verbatim.
//! Callers that render untrusted text must escape it before passing it in.

use serde::{Deserialize, Serialize};

use crate::config::LinksConfig;
use crate::{EMBED_CLASS, NOIFRAME_CLASS, NO_BRAND_CLASS};

/// Extra attributes for a generated policy link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttributes {
    /// Additional CSS classes appended after the computed ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

impl LinkAttributes {
    /// Attributes carrying extra classes.
    pub fn with_classes(classes: impl Into<String>) -> Self {
        Self {
            classes: Some(classes.into()),
        }
    }
}

/// Compute the class list for policy links.
///
/// Token order is style, `no-brand`, `iubenda-noiframe`, `iubenda-embed`;
/// disabled tokens are dropped rather than left as blanks.
pub fn links_class(config: &LinksConfig) -> String {
    let tokens = [
        Some(config.style.class_name()),
        config.white_label.then_some(NO_BRAND_CLASS),
        Some(NOIFRAME_CLASS),
        config.embed.then_some(EMBED_CLASS),
    ];

    tokens.into_iter().flatten().collect::<Vec<_>>().join(" ")
}

/// Join two class lists, collapsing any run of whitespace.
pub fn join_classes(base: &str, extra: Option<&str>) -> String {
    base.split_whitespace()
        .chain(extra.unwrap_or_default().split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render an anchor with the label as both title and text.
pub fn anchor_html(href: &str, class: &str, label: &str, attributes: &LinkAttributes) -> String {
    let class = join_classes(class, attributes.classes.as_deref());
    format!(
        "<a href=\"{}\" class=\"{}\" title=\"{}\">{}</a>",
        href, class, label, label
    )
}

//! The per-instance consent facade

use iubenda_links::{
    anchor_html, links_class, LinkAttributes, LinksConfig, PolicyUrls,
    DEFAULT_COOKIE_POLICY_LABEL, DEFAULT_PRIVACY_POLICY_LABEL,
};
use serde::Serialize;

/// Policy URLs and link generators for one application instance.
///
/// Built once per activation from the effective policy id; it does not
/// follow later locale changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentFacade {
    policy_id: u64,
    #[serde(flatten)]
    urls: PolicyUrls,
    links_class: String,
}

impl ConsentFacade {
    pub fn new(policy_id: u64, links: &LinksConfig) -> Self {
        Self {
            policy_id,
            urls: PolicyUrls::for_policy(policy_id),
            links_class: links_class(links),
        }
    }

    /// Effective cookie policy id
    pub fn policy_id(&self) -> u64 {
        self.policy_id
    }

    pub fn urls(&self) -> &PolicyUrls {
        &self.urls
    }

    pub fn privacy_policy_url(&self) -> &str {
        &self.urls.privacy_policy_url
    }

    pub fn cookie_policy_url(&self) -> &str {
        &self.urls.cookie_policy_url
    }

    pub fn privacy_policy_api_url(&self) -> &str {
        &self.urls.privacy_policy_api_url
    }

    pub fn cookie_policy_api_url(&self) -> &str {
        &self.urls.cookie_policy_api_url
    }

    /// Computed class list for policy links
    pub fn links_class(&self) -> &str {
        &self.links_class
    }

    /// Anchor to the privacy policy. `label` defaults to "Privacy Policy".
    ///
    /// Neither `label` nor `attributes.classes` is escaped; pass trusted text.
    pub fn privacy_policy_link_html(&self, label: Option<&str>, attributes: &LinkAttributes) -> String {
        anchor_html(
            &self.urls.privacy_policy_url,
            &self.links_class,
            label.unwrap_or(DEFAULT_PRIVACY_POLICY_LABEL),
            attributes,
        )
    }

    /// Anchor to the cookie policy. `label` defaults to "Cookie Policy".
    ///
    /// Neither `label` nor `attributes.classes` is escaped; pass trusted text.
    pub fn cookie_policy_link_html(&self, label: Option<&str>, attributes: &LinkAttributes) -> String {
        anchor_html(
            &self.urls.cookie_policy_url,
            &self.links_class,
            label.unwrap_or(DEFAULT_COOKIE_POLICY_LABEL),
            attributes,
        )
    }
}

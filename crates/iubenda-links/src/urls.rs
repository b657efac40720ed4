//! Canonical policy URLs.

use serde::{Deserialize, Serialize};

use crate::BASE_URL;

/// The four canonical URLs for one policy id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyUrls {
    /// `{base}/privacy-policy/{id}`
    pub privacy_policy_url: String,

    /// `{base}/privacy-policy/{id}/cookie-policy`
    pub cookie_policy_url: String,

    /// `{base}/api/privacy-policy/{id}`
    pub privacy_policy_api_url: String,

    /// `{base}/api/privacy-policy/{id}/cookie-policy`
    pub cookie_policy_api_url: String,
}

impl PolicyUrls {
    /// URLs on the public iubenda domain.
    pub fn for_policy(policy_id: u64) -> Self {
        let api_url = format!("{}/api", BASE_URL);
        let privacy_policy_url = format!("{}/privacy-policy/{}", BASE_URL, policy_id);
        let cookie_policy_url = format!("{}/cookie-policy", privacy_policy_url);
        let privacy_policy_api_url = format!("{}/privacy-policy/{}", api_url, policy_id);
        let cookie_policy_api_url = format!("{}/cookie-policy", privacy_policy_api_url);

        Self {
            privacy_policy_url,
            cookie_policy_url,
            privacy_policy_api_url,
            cookie_policy_api_url,
        }
    }
}

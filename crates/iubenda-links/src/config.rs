//! Links configuration types.

use serde::{Deserialize, Serialize};

/// Visual style applied to policy links by the hosted links script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// Plain links, no iubenda styling.
    #[default]
    Nostyle,
    /// White button style.
    White,
    /// Black button style.
    Black,
}

impl LinkStyle {
    /// Style name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStyle::Nostyle => "nostyle",
            LinkStyle::White => "white",
            LinkStyle::Black => "black",
        }
    }

    /// CSS class token understood by the links script.
    pub fn class_name(&self) -> &'static str {
        match self {
            LinkStyle::Nostyle => "iubenda-nostyle",
            LinkStyle::White => "iubenda-white",
            LinkStyle::Black => "iubenda-black",
        }
    }
}

/// Controls whether the links script is loaded and how links are styled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinksConfig {
    /// Load the links script (default: true)
    pub enable: bool,

    /// Link style (default: nostyle)
    pub style: LinkStyle,

    /// Hide the iubenda brand on links (default: true)
    pub white_label: bool,

    /// Open policies in the embedded popup (default: true)
    pub embed: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            enable: true,
            style: LinkStyle::Nostyle,
            white_label: true,
            embed: true,
        }
    }
}

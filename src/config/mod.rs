//! Option merge system
//!
//! Implements the 3-layer option merge:
//! 1. Built-in module defaults
//! 2. User options supplied by the embedding application
//! 3. Public overrides (file or `IUBENDA_PUBLIC_CONFIG`)

mod defaults;
mod error;
mod layers;
mod merge;
mod options;

pub use defaults::BuiltinDefaults;
pub use error::ConfigError;
pub use layers::{ConfigOrigin, ConfigSource, OptionLayers, PUBLIC_CONFIG_ENV};
pub use merge::{deep_merge, merge_layers};
pub use options::{
    BannerAppearance, BannerConfig, Env, HeadOptions, LocaleOverride, ModuleOptions,
};

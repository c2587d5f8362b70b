//! Settings of the resource model and how they are loaded.
mod loader;
mod manager;
mod matcher;
mod types;

pub use manager::ConfigManager;
pub use matcher::{
    MatcherError,
    ResourceFileMatcher,
};
pub use types::{
    ConfigError,
    DEFAULT_NEW_KEY_TEMPLATE,
    ModelSettings,
    ValidationError,
};

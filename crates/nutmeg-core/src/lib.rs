pub mod app_config;
pub mod category;
pub mod config;
pub mod restaurant;
pub mod towns;

pub use app_config::{AppConfig, Environment};
pub use category::{format_categories, normalize_categories};
pub use config::{load_app_config, load_app_config_from_env};
pub use restaurant::{Coordinates, FeaturedEntry, Restaurant, TownCategories};
pub use towns::{load_towns, TownSource, TownsFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read towns file {path}: {source}")]
    TownsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse towns file: {0}")]
    TownsFileParse(#[from] serde_yaml::Error),

    #[error("towns validation failed: {0}")]
    Validation(String),
}

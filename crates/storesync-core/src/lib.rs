mod app_config;
mod clean;
mod config;
mod model;

pub use app_config::{AppSettings, Config, DbConfig, EsbConfig, TelegramConfig};
pub use clean::clean_string;
pub use config::{load_config, load_config_from_env};
pub use model::{Mode, Store, StoreStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

//! Configuration model loaded from external sources.
use std::env;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Where images are stored and how their public URLs are formed.
#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    pub root: PathBuf,
    pub bucket: String,
    pub public_base_url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load `config/default`, the `config/{APP_ENV}` overlay (defaults to
    /// `local`) and `APP_`-prefixed environment variables, e.g.
    /// `APP_STORAGE__BUCKET`. A `.env` file is read first when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
        Self::load_from(Path::new("config"), &app_env)
    }

    pub fn load_from(dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        let default = dir.join("default");
        let overlay = dir.join(app_env);

        Config::builder()
            .add_source(File::with_name(&default.to_string_lossy()))
            .add_source(File::with_name(&overlay.to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

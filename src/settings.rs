use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Process settings, read from an optional `settings` file in the working
/// directory and then from the environment (`PORT`, `BIND_ADDRESS`,
/// `MONGODB_URI`). Variables in an optional `.env` file are added to the
/// environment first, without replacing ones that are already set.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind_address: String,
    pub port: u16,
    pub mongodb_uri: String,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            mongodb_uri: "mongodb://localhost:27017/fundraisingnew".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Settings, ConfigError> {
        load_env_file(".env")?;

        let builder = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::default().try_parsing(true));

        Settings::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

/// Exports the variables of a dotenv file. A missing file is not an error.
fn load_env_file(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Foreign(Box::new(err))),
    }
}

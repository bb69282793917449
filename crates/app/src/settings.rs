//! Teller settings.
//!
//! Layered, lowest priority first: built-in defaults, the TOML file
//! (`config/teller.toml` unless `--config` is given), `SACCO_TELLER_*`
//! environment variables, command-line overrides.

use serde::Deserialize;

use crate::{cli::GlobalArgs, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/teller.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub token: String,
    pub sacco_ref: Option<String>,
    pub currency: String,
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            token: String::new(),
            sacco_ref: None,
            currency: "KES".to_string(),
            level: "info".to_string(),
        }
    }
}

pub fn load(args: &GlobalArgs) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SACCO_TELLER"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }

    Ok(settings)
}

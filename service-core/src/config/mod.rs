use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        // Plain PORT wins over APP__PORT so the usual PaaS convention keeps working.
        let port_override = std::env::var("PORT")
            .ok()
            .map(|raw| {
                raw.parse::<u16>().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("PORT is not a valid port: {}", e))
                })
            })
            .transpose()?
            .map(i64::from);

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("port", port_override)?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

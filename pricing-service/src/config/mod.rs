use crate::error::AppError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_port() -> u16 {
    8086
}

fn default_service_name() -> String {
    "pricing-service".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            service_name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

impl PricingConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

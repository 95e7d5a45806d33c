use crate::error::{Error, Result};
use crate::services::drag_drop_editor::AuthoringLimits;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub jwt_secret: String,
    pub upstream_api_url: Url,
    pub upstream_api_token: Option<String>,
    pub upstream_timeout_secs: u64,
    pub api_rps: u32,
    pub limits: AuthoringLimits,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = AuthoringLimits::default();
        let limits = AuthoringLimits {
            max_zones: get_env_parse_or("MAX_DRAG_ZONES", defaults.max_zones)?,
            max_options: get_env_parse_or("MAX_ANSWER_OPTIONS", defaults.max_options)?,
            min_options: get_env_parse_or("MIN_ANSWER_OPTIONS", defaults.min_options)?,
        };
        if limits.min_options > limits.max_options || limits.max_zones == 0 {
            return Err(Error::Config(format!(
                "Inconsistent authoring limits: {:?}",
                limits
            )));
        }

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            jwt_secret: get_env("JWT_SECRET")?,
            upstream_api_url: get_env_parse("UPSTREAM_API_URL")?,
            upstream_api_token: env::var("UPSTREAM_API_TOKEN").ok(),
            upstream_timeout_secs: get_env_parse_or("UPSTREAM_TIMEOUT_SECS", 30)?,
            api_rps: get_env_parse("API_RPS")?,
            limits,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(_) => get_env_parse(name),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

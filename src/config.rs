use log::LevelFilter;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DATABASE_URL: &str = "sqlite://social.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub max_connections: u32,
    pub workers: usize,
    pub log_level: LevelFilter,
}

impl Config {
    /// Read settings from the process environment, after loading `.env` if
    /// one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => parse_positive("DB_MAX_CONNECTIONS", raw)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let workers = match lookup("HTTP_WORKERS") {
            Some(raw) => parse_positive("HTTP_WORKERS", raw)?,
            None => num_cpus::get(),
        };
        let log_level = match lookup("LOG_LEVEL") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "LOG_LEVEL", value: raw })?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            bind_addr,
            database_url,
            max_connections,
            workers,
            log_level,
        })
    }
}

fn parse_positive<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}

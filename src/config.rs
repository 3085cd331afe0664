//! Startup configuration read from the process environment (optionally seeded by `.env`).
//!
//! Missing required values are fatal: `main` refuses to start without a bot token and
//! complete database credentials.

use crate::constants::{DEFAULT_COMMAND_PREFIX, DEFAULT_DB_MAX_CONNECTIONS};
use chrono::FixedOffset;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable `{0}`")]
    Missing(&'static str),
    #[error("environment variable `{key}` has an invalid value `{value}`")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

// Keep the password out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub guild_id: Option<u64>,
    pub command_prefix: String,
    /// Offset applied to UTC timestamps to decide which calendar day an expense belongs to.
    pub utc_offset: FixedOffset,
    pub database: DatabaseConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("guild_id", &self.guild_id)
            .field("command_prefix", &self.command_prefix)
            .field("utc_offset", &self.utc_offset)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let discord_token = required("DISCORD_TOKEN")?;
        let database = DatabaseConfig {
            host: required("DB_HOST")?,
            port: parse_value("DB_PORT", &required("DB_PORT")?)?,
            name: required("DB_NAME")?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            max_connections: match get("DB_MAX_CONNECTIONS") {
                Some(v) => parse_value("DB_MAX_CONNECTIONS", &v)?,
                None => DEFAULT_DB_MAX_CONNECTIONS,
            },
        };
        let guild_id = match get("DISCORD_GUILD_ID") {
            Some(v) => match parse_value::<u64>("DISCORD_GUILD_ID", &v)? {
                0 => {
                    return Err(ConfigError::Invalid {
                        key: "DISCORD_GUILD_ID",
                        value: v,
                    });
                }
                id => Some(id),
            },
            None => None,
        };
        let command_prefix = get("COMMAND_PREFIX")
            .map(|p| p.trim().to_string())
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());
        let utc_offset = match get("UTC_OFFSET_MINUTES") {
            Some(v) => {
                let minutes: i32 = parse_value("UTC_OFFSET_MINUTES", &v)?;
                minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or(ConfigError::Invalid {
                        key: "UTC_OFFSET_MINUTES",
                        value: v,
                    })?
            }
            None => FixedOffset::east_opt(0).ok_or(ConfigError::Invalid {
                key: "UTC_OFFSET_MINUTES",
                value: "0".into(),
            })?,
        };

        Ok(Self {
            discord_token,
            guild_id,
            command_prefix,
            utc_offset,
            database,
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

//! Application configuration
//!
//! Built once at startup and handed by reference to the components that
//! need it. Nothing below the binary reads the process environment.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

use crate::db::MAX_PER_PAGE;

/// Default page size for list endpoints
const DEFAULT_LIST_PER_PAGE: u32 = 10;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_PORT: u16 = 3000;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime environment, controls how much error detail reaches clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("expected development or production, got {other}")),
        }
    }
}

/// Database connection settings
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    /// Full connection URL; takes precedence over the individual parts
    pub url: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            user: None,
            password: None,
            database: None,
            url: None,
        }
    }
}

// Credentials never end up in logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("database", &self.database)
            .field("url", &self.url.as_ref().map(|_| "********"))
            .finish()
    }
}

impl DbConfig {
    /// Build sqlx connect options from the URL or the individual parts.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
                key: "DATABASE_URL",
                value: "********".to_string(),
                reason: e.to_string(),
            });
        }

        let mut options = PgConnectOptions::new().host(&self.host).port(self.port);
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        Ok(options)
    }
}

/// Environment variable names for one set of database credentials
struct DbKeys {
    host: &'static str,
    port: &'static str,
    user: &'static str,
    password: &'static str,
    database: &'static str,
}

const LOCAL_KEYS: DbKeys = DbKeys {
    host: "DB_HOST",
    port: "DB_PORT",
    user: "DB_USER",
    password: "DB_PASSWORD",
    database: "DB_NAME",
};

const HEROKU_KEYS: DbKeys = DbKeys {
    host: "HEROKU_HOST",
    port: "HEROKU_PORT",
    user: "HEROKU_USER",
    password: "HEROKU_PASSWORD",
    database: "HEROKU_DB",
};

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    /// Page size applied to list endpoints when the request has none
    pub list_per_page: u32,
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,
    /// Allow every origin (default: true)
    pub cors_permissive: bool,
    pub environment: Environment,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db: DbConfig::default(),
            list_per_page: DEFAULT_LIST_PER_PAGE,
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            cors_permissive: true,
            environment: Environment::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset. When `USE_HEROKU_CONFIG` is set the
    /// database credentials come from the `HEROKU_*` variables instead of
    /// `DB_*`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let keys = if get("USE_HEROKU_CONFIG").is_some() {
            &HEROKU_KEYS
        } else {
            &LOCAL_KEYS
        };

        let db = DbConfig {
            host: get(keys.host).unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
            port: parse_or(get(keys.port), keys.port, DEFAULT_DB_PORT)?,
            user: get(keys.user),
            password: get(keys.password),
            database: get(keys.database),
            url: get("DATABASE_URL"),
        };

        let list_per_page = parse_or(get("LIST_PER_PAGE"), "LIST_PER_PAGE", DEFAULT_LIST_PER_PAGE)?;
        if !(1..=MAX_PER_PAGE).contains(&list_per_page) {
            return Err(ConfigError::Invalid {
                key: "LIST_PER_PAGE",
                value: list_per_page.to_string(),
                reason: format!("must be between 1 and {MAX_PER_PAGE}"),
            });
        }

        let host: IpAddr = parse_or(get("HOST"), "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port: u16 = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;

        let cors_permissive = match get("CORS_PERMISSIVE") {
            Some(value) => parse_flag(&value).ok_or_else(|| ConfigError::Invalid {
                key: "CORS_PERMISSIVE",
                value,
                reason: "expected true or false".to_string(),
            })?,
            None => true,
        };

        let environment = parse_or(get("APP_ENV"), "APP_ENV", Environment::default())?;

        Ok(Self {
            db,
            list_per_page,
            bind_addr: SocketAddr::new(host, port),
            cors_permissive,
            environment,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

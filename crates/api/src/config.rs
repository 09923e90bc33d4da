use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use axum::http::{HeaderName, HeaderValue, Method, Uri};
use tracing::Level;

/// Deployment environment the server runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            _ => Err("expected one of development, staging, production".into()),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable, colored output for local development.
    Console,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "console" => Ok(LogFormat::Console),
            _ => Err("expected json or console".into()),
        }
    }
}

/// Either a wildcard (`*`) or an explicit list of allowed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList<T> {
    Any,
    List(Vec<T>),
}

impl<T: PartialEq> AllowList<T> {
    pub fn allows(&self, value: &T) -> bool {
        match self {
            AllowList::Any => true,
            AllowList::List(values) => values.contains(value),
        }
    }
}

/// Cross-origin policy applied to every route.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub origins: AllowList<HeaderValue>,
    pub allow_credentials: bool,
    pub methods: AllowList<Method>,
    pub headers: AllowList<HeaderName>,
}

/// Startup configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },

    #[error("{var}: invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// Resolved once at startup and shared read-only through `AppState`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub app_name: String,
    pub app_version: String,
    pub app_description: String,
    pub environment: Environment,
    /// Bind address: an IP literal or a resolvable hostname (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    pub cors: CorsConfig,
    pub log_level: Level,
    pub log_format: LogFormat,
    /// Versioned API prefix without a trailing slash (default: `/api/v1`).
    pub api_prefix: String,
    pub database_url: String,
    pub db_max_connections: u32,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `APP_NAME`             | `starter-api`                                 |
    /// | `APP_VERSION`          | crate version                                 |
    /// | `APP_DESCRIPTION`      | `Production-ready axum starter template`      |
    /// | `ENVIRONMENT`          | `development`                                 |
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `8000`                                        |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://localhost:8000` |
    /// | `CORS_CREDENTIALS`     | `true`                                        |
    /// | `CORS_METHODS`         | `*`                                           |
    /// | `CORS_HEADERS`         | `*`                                           |
    /// | `LOG_LEVEL`            | `INFO`                                        |
    /// | `LOG_FORMAT`           | `json`                                        |
    /// | `API_V1_PREFIX`        | `/api/v1`                                     |
    /// | `DATABASE_URL`         | (required)                                    |
    /// | `DB_MAX_CONNECTIONS`   | `10`                                          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or = |var: &str, default: &str| get(var).unwrap_or_else(|| default.to_string());

        let environment = parse_var("ENVIRONMENT", &or("ENVIRONMENT", "development"))?;
        let host = parse_host(&or("HOST", "0.0.0.0"))?;
        let port = parse_port(&or("PORT", "8000"))?;

        let cors = CorsConfig {
            origins: parse_list("CORS_ORIGINS", &or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS), parse_origin)?,
            allow_credentials: parse_bool("CORS_CREDENTIALS", &or("CORS_CREDENTIALS", "true"))?,
            methods: parse_list("CORS_METHODS", &or("CORS_METHODS", "*"), |m| {
                Method::from_bytes(m.to_ascii_uppercase().as_bytes()).map_err(|e| e.to_string())
            })?,
            headers: parse_list("CORS_HEADERS", &or("CORS_HEADERS", "*"), |h| {
                HeaderName::from_str(h).map_err(|e| e.to_string())
            })?,
        };

        let log_level = parse_log_level(&or("LOG_LEVEL", "INFO"))?;
        let log_format = parse_var("LOG_FORMAT", &or("LOG_FORMAT", "json"))?;
        let api_prefix = parse_prefix(&or("API_V1_PREFIX", "/api/v1"))?;

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing {
            var: "DATABASE_URL",
        })?;
        let db_max_connections = parse_positive("DB_MAX_CONNECTIONS", &or("DB_MAX_CONNECTIONS", "10"))?;
        let request_timeout_secs =
            parse_positive("REQUEST_TIMEOUT_SECS", &or("REQUEST_TIMEOUT_SECS", "30"))?;

        Ok(Self {
            app_name: or("APP_NAME", "starter-api"),
            app_version: or("APP_VERSION", env!("CARGO_PKG_VERSION")),
            app_description: or("APP_DESCRIPTION", "Production-ready axum starter template"),
            environment,
            host,
            port,
            cors,
            log_level,
            log_format,
            api_prefix,
            database_url,
            db_max_connections,
            request_timeout_secs,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn is_staging(&self) -> bool {
        self.environment == Environment::Staging
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Host/port pair for `TcpListener::bind`; hostnames are resolved there.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:8000";

impl Default for ServerConfig {
    /// Development defaults with an empty database URL; used by tests.
    fn default() -> Self {
        Self {
            app_name: "starter-api".into(),
            app_version: env!("CARGO_PKG_VERSION").into(),
            app_description: "Production-ready axum starter template".into(),
            environment: Environment::Development,
            host: "0.0.0.0".into(),
            port: 8000,
            cors: CorsConfig {
                origins: AllowList::List(
                    DEFAULT_CORS_ORIGINS
                        .split(',')
                        .map(HeaderValue::from_static)
                        .collect(),
                ),
                allow_credentials: true,
                methods: AllowList::Any,
                headers: AllowList::Any,
            },
            log_level: Level::INFO,
            log_format: LogFormat::Json,
            api_prefix: "/api/v1".into(),
            database_url: String::new(),
            db_max_connections: 10,
            request_timeout_secs: 30,
        }
    }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e| invalid(var, value, e))
}

/// Accept an IP literal or an RFC 1123 hostname such as `localhost`.
fn parse_host(value: &str) -> Result<String, ConfigError> {
    if value.parse::<IpAddr>().is_ok() {
        return Ok(value.to_string());
    }
    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if value.len() <= 253 && value.split('.').all(valid_label) {
        Ok(value.to_ascii_lowercase())
    } else {
        Err(invalid("HOST", value, "expected an IP address or hostname"))
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    match value.parse::<u16>() {
        Ok(0) => Err(invalid("PORT", value, "must be between 1 and 65535")),
        Ok(port) => Ok(port),
        Err(_) => Err(invalid("PORT", value, "must be an integer between 1 and 65535")),
    }
}

fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + From<u8>,
{
    match value.parse::<T>() {
        Ok(n) if n >= T::from(1) => Ok(n),
        _ => Err(invalid(var, value, "must be a positive integer")),
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(var, value, "expected true or false")),
    }
}

fn parse_log_level(value: &str) -> Result<Level, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" | "critical" => Ok(Level::ERROR),
        _ => Err(invalid(
            "LOG_LEVEL",
            value,
            "expected trace, debug, info, warning or error",
        )),
    }
}

fn parse_prefix(value: &str) -> Result<String, ConfigError> {
    if !value.starts_with('/') {
        return Err(invalid("API_V1_PREFIX", value, "must start with '/'"));
    }
    let prefix = value.trim_end_matches('/');
    if prefix.is_empty() {
        return Err(invalid("API_V1_PREFIX", value, "must contain at least one path segment"));
    }
    Ok(prefix.to_string())
}

fn parse_origin(value: &str) -> Result<HeaderValue, String> {
    let origin = value.trim_end_matches('/');
    let uri: Uri = origin.parse().map_err(|e: axum::http::uri::InvalidUri| e.to_string())?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err("expected an origin such as https://example.com".into());
    }
    HeaderValue::from_str(origin).map_err(|e| e.to_string())
}

/// Parse a comma-separated list where a lone `*` means "anything".
fn parse_list<T, F>(var: &'static str, value: &str, parse: F) -> Result<AllowList<T>, ConfigError>
where
    F: Fn(&str) -> Result<T, String>,
{
    let items: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if items.contains(&"*") {
        return Ok(AllowList::Any);
    }

    items
        .into_iter()
        .map(|item| parse(item).map_err(|reason| invalid(var, item, reason)))
        .collect::<Result<Vec<_>, _>>()
        .map(AllowList::List)
}

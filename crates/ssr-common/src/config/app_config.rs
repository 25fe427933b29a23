//! Application configuration
//!
//! Everything is read from environment variables (optionally seeded from a
//! `.env` file). Only `API_PORT`, `DATABASE_URL`, `JWT_SECRET` and
//! `CONFIRMATION_PASSWORD` are required.

use ssr_core::reports::{dedup::DEFAULT_WINDOW_MINUTES, ReportTimezone};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub provisioning: ProvisioningConfig,
    pub reports: ReportsConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply pending migrations at startup
    pub run_migrations: bool,
    pub migrations_dir: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Seconds
    pub access_token_expiry: i64,
    /// Seconds
    pub refresh_token_expiry: i64,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

/// Ranger account provisioning
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    /// Domain of generated logins
    pub login_domain: String,
    pub password_length: usize,
    /// App version stored on profiles when a request gives none
    pub default_app_version: String,
}

#[derive(Debug, Clone)]
pub struct ReportsConfig {
    pub dedup_window_minutes: u32,
    pub timezone: ReportTimezone,
}

/// Secrets gating destructive operations
#[derive(Clone)]
pub struct SecurityConfig {
    /// Password administrators must repeat before deletions
    pub confirmation_password: String,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("confirmation_password", &"<redacted>")
            .field("bootstrap_admin", &self.bootstrap_admin.as_ref().map(|a| &a.email))
            .finish()
    }
}

/// Administrator account created at startup when missing
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    /// `None` creates a global administrator
    pub association_id: Option<String>,
}

// Default value functions
fn default_app_name() -> String {
    "ssr-admin".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    43_200 // 12 hours
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_login_domain() -> String {
    "ranger.pl".to_string()
}

fn default_password_length() -> usize {
    ssr_core::provisioning::DEFAULT_PASSWORD_LENGTH
}

fn default_app_version() -> String {
    "1.0.0".to_string()
}

fn default_dedup_window() -> u32 {
    DEFAULT_WINDOW_MINUTES as u32
}

/// Typed access to a variable source
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parsed<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key, raw.clone()))
            })
            .transpose()
    }

    fn parsed_or<T: FromStr>(&self, key: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
        Ok(self.parsed(key)?.unwrap_or_else(default))
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an in-memory map
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let timezone = match vars.get("REPORT_TIMEZONE") {
            Some(raw) => raw
                .parse::<ReportTimezone>()
                .map_err(|_| ConfigError::InvalidValue("REPORT_TIMEZONE", raw))?,
            None => ReportTimezone::default(),
        };

        let worker_id: u16 = vars.parsed_or("WORKER_ID", || 0)?;
        if worker_id >= 1024 {
            return Err(ConfigError::InvalidValue("WORKER_ID", worker_id.to_string()));
        }

        let bootstrap_admin = match (vars.get("BOOTSTRAP_ADMIN_EMAIL"), vars.get("BOOTSTRAP_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                email,
                password,
                association_id: vars.get("BOOTSTRAP_ADMIN_ASSOCIATION_ID"),
            }),
            (Some(_), None) => return Err(ConfigError::MissingVar("BOOTSTRAP_ADMIN_PASSWORD")),
            _ => None,
        };

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: vars
                    .get("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port: vars
                    .parsed("API_PORT")?
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars.parsed_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars.parsed_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: vars.parsed_or("DATABASE_RUN_MIGRATIONS", || true)?,
                migrations_dir: vars
                    .get("DATABASE_MIGRATIONS_DIR")
                    .unwrap_or_else(default_migrations_dir),
            },
            jwt: JwtConfig {
                secret: vars.required("JWT_SECRET")?,
                access_token_expiry: vars
                    .parsed_or("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
                refresh_token_expiry: vars
                    .parsed_or("JWT_REFRESH_TOKEN_EXPIRY", default_refresh_token_expiry)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parsed_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parsed_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig { worker_id },
            provisioning: ProvisioningConfig {
                login_domain: vars.get("LOGIN_DOMAIN").unwrap_or_else(default_login_domain),
                password_length: vars
                    .parsed_or("GENERATED_PASSWORD_LENGTH", default_password_length)?
                    .clamp(8, 64),
                default_app_version: vars
                    .get("DEFAULT_APP_VERSION")
                    .unwrap_or_else(default_app_version),
            },
            reports: ReportsConfig {
                dedup_window_minutes: vars.parsed_or("DEDUP_WINDOW_MINUTES", default_dedup_window)?,
                timezone,
            },
            security: SecurityConfig {
                confirmation_password: vars.required("CONFIRMATION_PASSWORD")?,
                bootstrap_admin,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

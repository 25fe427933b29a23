//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BootstrapAdmin, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, ProvisioningConfig, RateLimitConfig, ReportsConfig, SecurityConfig, ServerConfig,
    SnowflakeConfig,
};

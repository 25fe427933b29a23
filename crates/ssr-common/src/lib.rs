//! # ssr-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, verify_password, Claims, ConfirmationSecret, JwtService, PasswordService,
    TokenPair, TokenType,
};
pub use config::{
    AppConfig, AppSettings, BootstrapAdmin, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, ProvisioningConfig, RateLimitConfig, ReportsConfig, SecurityConfig, ServerConfig,
    SnowflakeConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing, TracingConfig, TracingError};

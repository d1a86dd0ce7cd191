//! Application configuration loaded from environment variables.

use std::env;

use blog_core::domain::EmailAddress;
#[cfg(feature = "postgres")]
use blog_infra::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub telemetry: TelemetryConfig,
    /// `ADMIN_EMAIL`: the account that registers as admin.
    pub admin_email: Option<EmailAddress>,
}

fn parse_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(fallback)
}

fn admin_email() -> Option<EmailAddress> {
    let raw = env::var("ADMIN_EMAIL").ok().filter(|s| !s.trim().is_empty())?;
    match EmailAddress::from_string(&raw) {
        Ok(email) => Some(email),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring ADMIN_EMAIL");
            None
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Token and password-hashing settings are read by their services
    /// (`JWT_*`, `ARGON2_*`).
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 100),
            min_connections: parse_or("DB_MIN_CONNECTIONS", 10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            #[cfg(feature = "postgres")]
            database,
            telemetry: TelemetryConfig::from_env(),
            admin_email: admin_email(),
        }
    }
}

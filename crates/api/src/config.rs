use survex_core::eligibility::{
    EligibilityPolicy, DEFAULT_BYPASS_SUPPLY_CEILING, DEFAULT_POSTING_THRESHOLD,
};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal
    /// (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Posting quota and low-supply bypass.
    pub eligibility: EligibilityPolicy,
    /// Identity-provider token verification.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `POSTING_THRESHOLD`     | `6`                     |
    /// | `BYPASS_SUPPLY_CEILING` | `11`                    |
    ///
    /// # Panics
    ///
    /// Panics on any malformed value, and when `JWT_SECRET` is missing.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let threshold: i64 = std::env::var("POSTING_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_POSTING_THRESHOLD.to_string())
            .parse()
            .expect("POSTING_THRESHOLD must be a valid i64");

        let bypass_supply_ceiling: i64 = std::env::var("BYPASS_SUPPLY_CEILING")
            .unwrap_or_else(|_| DEFAULT_BYPASS_SUPPLY_CEILING.to_string())
            .parse()
            .expect("BYPASS_SUPPLY_CEILING must be a valid i64");

        let eligibility = EligibilityPolicy::new(threshold, bypass_supply_ceiling)
            .unwrap_or_else(|e| panic!("Invalid eligibility policy: {e}"));

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            eligibility,
            jwt,
        }
    }
}

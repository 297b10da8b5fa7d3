use anyhow::Result;
use clap::Parser;
use std::time::Duration;

const DEFAULT_JWT_SECRET: &str = "default-secret-change-in-production";
const DEFAULT_TOKEN_EXPIRATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Application configuration.
///
/// Loaded from command-line flags with environment variable overrides;
/// environment takes precedence over flags.
#[derive(Debug, Clone, Parser)]
#[command(name = "bonusmart", about = "Loyalty points backend")]
pub struct Config {
    /// Address and port the HTTP server listens on
    #[arg(short = 'a', long = "address", default_value = "localhost:8080")]
    pub run_address: String,

    /// PostgreSQL connection string (required)
    #[arg(short = 'd', long = "database-uri", default_value = "")]
    pub database_uri: String,

    /// Base URL of the external accrual service; worker is disabled when unset
    #[arg(short = 'r', long = "accrual-address")]
    pub accrual_address: Option<String>,

    /// JWT token lifetime, e.g. "24h", "30m"
    #[arg(short = 't', long = "token-expiration", value_parser = humantime::parse_duration, default_value = "24h")]
    pub token_expiration: Duration,

    /// HMAC secret for signing tokens; set via JWT_SECRET only
    #[arg(skip)]
    pub jwt_secret: String,
}

impl Config {
    /// Parse flags, then apply environment overrides and defaults.
    pub fn load() -> Self {
        let mut cfg = Self::parse();
        cfg.apply_env_overrides();
        cfg
    }

    /// Environment variables take precedence over flags.
    ///
    /// Supported overrides: RUN_ADDRESS, DATABASE_URI,
    /// ACCRUAL_SYSTEM_ADDRESS, JWT_SECRET, TOKEN_EXPIRATION.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var("RUN_ADDRESS")
            && !addr.is_empty()
        {
            self.run_address = addr;
        }
        if let Ok(uri) = std::env::var("DATABASE_URI")
            && !uri.is_empty()
        {
            self.database_uri = uri;
        }
        if let Ok(accrual) = std::env::var("ACCRUAL_SYSTEM_ADDRESS")
            && !accrual.is_empty()
        {
            self.accrual_address = Some(accrual);
        }

        self.jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

        if let Ok(exp) = std::env::var("TOKEN_EXPIRATION") {
            self.token_expiration =
                humantime::parse_duration(&exp).unwrap_or(DEFAULT_TOKEN_EXPIRATION);
        }
        if self.token_expiration.is_zero() {
            self.token_expiration = DEFAULT_TOKEN_EXPIRATION;
        }
    }

    /// Validate configuration at startup.
    pub fn validate(&self) -> Result<()> {
        if self.database_uri.is_empty() {
            anyhow::bail!("DATABASE_URI is required");
        }
        if self.run_address.is_empty() {
            anyhow::bail!("RUN_ADDRESS must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            run_address: "localhost:8080".to_string(),
            database_uri: "postgres://localhost/bonusmart".to_string(),
            accrual_address: None,
            token_expiration: DEFAULT_TOKEN_EXPIRATION,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
        }
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_requires_database_uri() {
        let mut cfg = base_config();
        cfg.database_uri.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_expiration_falls_back_to_default() {
        let mut cfg = base_config();
        cfg.token_expiration = Duration::ZERO;
        cfg.apply_env_overrides();
        assert_eq!(cfg.token_expiration, DEFAULT_TOKEN_EXPIRATION);
    }
}

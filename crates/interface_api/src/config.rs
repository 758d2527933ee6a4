//! API configuration

use serde::Deserialize;

use core_kernel::{CoreError, Currency, Identity};

/// Owner used when none is configured; only suitable for local development
pub const DEV_OWNER_IDENTITY: &str = "00000000-0000-0000-0000-000000000001";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Identity holding the owner capability, fixed at startup
    pub owner_identity: String,
    /// Settlement currency code
    pub currency: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            owner_identity: DEV_OWNER_IDENTITY.to_string(),
            currency: "ETH".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// Any variable left unset keeps its default.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs.to_string())?
            .set_default("log_level", defaults.log_level)?
            .set_default("owner_identity", defaults.owner_identity)?
            .set_default("currency", defaults.currency)?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the configured owner identity
    pub fn owner(&self) -> Result<Identity, CoreError> {
        self.owner_identity
            .parse()
            .map_err(|e| CoreError::configuration(format!("owner_identity {:?}: {e}", self.owner_identity)))
    }

    /// Parses the configured settlement currency
    pub fn currency(&self) -> Result<Currency, CoreError> {
        Ok(self.currency.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = ApiConfig::default();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.currency().unwrap(), Currency::ETH);
        assert_eq!(config.owner().unwrap().to_string(), format!("IDN-{DEV_OWNER_IDENTITY}"));
    }

    #[test]
    fn test_bad_owner_is_a_configuration_error() {
        let config = ApiConfig {
            owner_identity: "not-a-uuid".to_string(),
            ..ApiConfig::default()
        };

        assert!(matches!(config.owner(), Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let config = ApiConfig {
            currency: "DOGE".to_string(),
            ..ApiConfig::default()
        };

        assert!(matches!(config.currency(), Err(CoreError::Money(_))));
    }
}

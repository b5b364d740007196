use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// HS512 wants a key at least as long as the digest output.
const MIN_SIGNING_KEY_BYTES: usize = 32;

/// Valid bcrypt cost range (the crate only exports the default).
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Clone)]
pub struct Config {
    pub node: NodeConfig,
    pub tokens: TokenConfig,
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_address: String,
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Validity window of an access token, in minutes
    pub access_ttl_minutes: i64,
    /// bcrypt cost factor used when hashing refresh secrets
    pub bcrypt_cost: u32,
    /// Symmetric key used for both signing and verifying access tokens
    pub signing_key: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            data_dir: "./data".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());

        let signing_key = std::env::var("SIGNING_KEY").map_err(|_| {
            ConfigError::ValidationError("SIGNING_KEY must be set".to_string())
        })?;

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);

        let access_ttl_minutes = std::env::var("ACCESS_TTL_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let config = Config {
            node: NodeConfig {
                bind_address,
                data_dir,
            },
            tokens: TokenConfig {
                access_ttl_minutes,
                bcrypt_cost,
                signing_key,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tokens.signing_key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(ConfigError::ValidationError(format!(
                "SIGNING_KEY must be at least {MIN_SIGNING_KEY_BYTES} bytes for HS512"
            )));
        }

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.tokens.bcrypt_cost) {
            return Err(ConfigError::ValidationError(format!(
                "BCRYPT_COST must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}"
            )));
        }

        if self.tokens.access_ttl_minutes <= 0 {
            return Err(ConfigError::ValidationError(
                "ACCESS_TTL_MINUTES must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            node: NodeConfig::default(),
            tokens: TokenConfig {
                access_ttl_minutes: 30,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                signing_key: "0123456789abcdef0123456789abcdef".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_short_signing_key_rejected() {
        let mut config = base_config();
        config.tokens.signing_key = "too-short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bcrypt_cost_out_of_range_rejected() {
        let mut config = base_config();
        config.tokens.bcrypt_cost = 2;
        assert!(config.validate().is_err());

        config.tokens.bcrypt_cost = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nonpositive_ttl_rejected() {
        let mut config = base_config();
        config.tokens.access_ttl_minutes = 0;
        assert!(config.validate().is_err());
    }
}

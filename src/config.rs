/// Configuration management
///
/// All settings come from the environment and are validated once at startup.
/// The validated [`Config`] is passed explicitly to the components that need
/// it; nothing in the crate reads environment variables after this point.
use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_access_ttl() -> String {
    "15m".to_string()
}

fn default_refresh_ttl() -> String {
    "7d".to_string()
}

fn default_bcrypt_cost() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    #[serde(default = "default_access_ttl")]
    pub jwt_expiration: String,
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_expiration: String,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment error: {0}")]
    Env(#[from] envy::Error),

    #[error("{0} must not be empty")]
    EmptySecret(&'static str),

    #[error("JWT_SECRET and JWT_REFRESH_SECRET must be distinct")]
    SharedSecret,

    #[error("invalid duration {input:?}: expected <integer><unit> with unit in {{s, m, h, d}}")]
    InvalidDuration { input: String },

    #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
    CostOutOfRange(u32),
}

impl Config {
    /// Load and validate configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Config = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::EmptySecret("JWT_SECRET"));
        }
        if self.jwt_refresh_secret.is_empty() {
            return Err(ConfigError::EmptySecret("JWT_REFRESH_SECRET"));
        }
        if self.jwt_secret == self.jwt_refresh_secret {
            return Err(ConfigError::SharedSecret);
        }
        parse_duration(&self.jwt_expiration)?;
        parse_duration(&self.jwt_refresh_expiration)?;
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::CostOutOfRange(self.bcrypt_cost));
        }
        Ok(())
    }

    /// Access-token lifetime. Panics only if `validate` was skipped.
    pub fn access_ttl(&self) -> Duration {
        parse_duration(&self.jwt_expiration).expect("validated at startup")
    }

    /// Refresh-token lifetime. Panics only if `validate` was skipped.
    pub fn refresh_ttl(&self) -> Duration {
        parse_duration(&self.jwt_refresh_expiration).expect("validated at startup")
    }
}

/// Parse a duration string of the form `<integer><unit>`, unit one of
/// `s`, `m`, `h`, `d` (e.g. `"15m"`, `"7d"`).
///
/// The grammar is closed on purpose: anything else is a configuration error
/// surfaced at startup rather than a token that silently expires at issuance.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration {
        input: input.to_string(),
    };

    let mut chars = input.chars();
    let unit = chars.next_back().ok_or_else(invalid)?;
    let amount: i64 = chars.as_str().parse().map_err(|_| invalid())?;
    if amount <= 0 {
        return Err(invalid());
    }

    match unit {
        's' => Ok(Duration::seconds(amount)),
        'm' => Ok(Duration::minutes(amount)),
        'h' => Ok(Duration::hours(amount)),
        'd' => Ok(Duration::days(amount)),
        _ => Err(invalid()),
    }
}

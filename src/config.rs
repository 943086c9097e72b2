use crate::credentials::{Credentials, API_KEY_VAR, IDENTIFIER_VAR, PASSWORD_VAR};
use crate::environment::{Environment, USE_DEMO_VAR};
use crate::error::ConfigError;
use crate::quote::DEFAULT_EPIC;
use std::time::Duration;

pub const EPIC_VAR: &str = "CAPITAL_EPIC";
pub const TIMEOUT_VAR: &str = "CAPITAL_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the fetcher needs, read from the process environment once at
/// start-up. Credentials are taken as-is; the fetcher validates them.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub environment: Environment,
    pub epic: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::new(
            lookup(IDENTIFIER_VAR).unwrap_or_default(),
            lookup(PASSWORD_VAR).unwrap_or_default(),
            lookup(API_KEY_VAR).unwrap_or_default(),
        );
        let environment = Environment::from_flag(lookup(USE_DEMO_VAR).as_deref());
        let epic = lookup(EPIC_VAR)
            .map(|epic| epic.trim().to_string())
            .filter(|epic| !epic.is_empty())
            .unwrap_or_else(|| DEFAULT_EPIC.to_string());
        let timeout = match lookup(TIMEOUT_VAR) {
            Some(value) => parse_timeout(&value)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            credentials,
            environment,
            epic,
            timeout,
        })
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}

// crates/sensor-gate-core/src/config.rs
// ============================================================================
// Module: Gauntlet Configuration
// Description: Environment-backed configuration for the acceptance gauntlet.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: thiserror, std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid
//! silent misconfiguration; invalid values fail closed. The topic namespace
//! is the one exception to eager validation: it may be absent at load time
//! and only becomes an error the first time a scenario derives the readings
//! topic from it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use thiserror::Error;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default base URL of the sensor-data API under test.
pub const DEFAULT_BASE_URL: &str = "http://localhost:6543";

/// Default public MQTT broker host.
pub const DEFAULT_BROKER_HOST: &str = "broker.hivemq.com";

/// Default MQTT broker port.
pub const DEFAULT_BROKER_PORT: u16 = 1883;

/// Default bounded publish window for the ingestion scenario.
pub const DEFAULT_PUBLISH_WINDOW: Duration = Duration::from_secs(20);

/// Default delay between publish attempts inside the window.
pub const DEFAULT_PUBLISH_DELAY: Duration = Duration::from_millis(10);

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for gauntlet configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GauntletEnv {
    /// Optional base URL override for the API under test.
    BaseUrl,
    /// Optional broker host override.
    BrokerHost,
    /// Optional broker port override (positive integer).
    BrokerPort,
    /// Topic namespace isolating this tenant on the shared public broker.
    BaseTopic,
    /// Optional publish window override in seconds (positive integer).
    PublishWindowSeconds,
    /// Optional inter-publish delay override in milliseconds (positive integer).
    PublishDelayMillis,
}

impl GauntletEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "SENSOR_GATE_BASE_URL",
            Self::BrokerHost => "SENSOR_GATE_BROKER_HOST",
            Self::BrokerPort => "SENSOR_GATE_BROKER_PORT",
            Self::BaseTopic => "BASE_TOPIC",
            Self::PublishWindowSeconds => "SENSOR_GATE_PUBLISH_WINDOW_SEC",
            Self::PublishDelayMillis => "SENSOR_GATE_PUBLISH_DELAY_MS",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by configuration loading or first use.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment value is not valid UTF-8.
    #[error("{name} must be valid UTF-8")]
    InvalidUtf8 {
        /// Offending environment variable.
        name: &'static str,
    },
    /// Environment value is set but empty or whitespace.
    #[error("{name} must not be empty")]
    Empty {
        /// Offending environment variable.
        name: &'static str,
    },
    /// Environment value failed numeric validation.
    #[error("{name} must be a positive integer")]
    InvalidNumber {
        /// Offending environment variable.
        name: &'static str,
    },
    /// Topic namespace was requested but never supplied.
    #[error("BASE_TOPIC is not set; cannot derive the readings topic")]
    MissingNamespace,
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Process-wide configuration, read-only after setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GauntletConfig {
    /// Base URL of the API under test.
    pub base_url: String,
    /// MQTT broker host.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// Topic namespace, if supplied; validated on first use.
    pub topic_namespace: Option<String>,
    /// Bounded publish window for the ingestion scenario.
    pub publish_window: Duration,
    /// Delay between publish attempts inside the window.
    pub publish_delay: Duration,
}

impl Default for GauntletConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            broker_host: DEFAULT_BROKER_HOST.to_string(),
            broker_port: DEFAULT_BROKER_PORT,
            topic_namespace: None,
            publish_window: DEFAULT_PUBLISH_WINDOW,
            publish_delay: DEFAULT_PUBLISH_DELAY,
        }
    }
}

impl GauntletConfig {
    /// Loads configuration from environment variables over the defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when an environment value is not valid
    /// UTF-8, is empty, or fails numeric validation. An absent `BASE_TOPIC`
    /// is not an error here; it surfaces on first use.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let base_url =
            read_env_nonempty(GauntletEnv::BaseUrl.as_str())?.unwrap_or(defaults.base_url);
        let broker_host =
            read_env_nonempty(GauntletEnv::BrokerHost.as_str())?.unwrap_or(defaults.broker_host);
        let broker_port = match read_env_nonempty(GauntletEnv::BrokerPort.as_str())? {
            Some(raw) => parse_positive_u16(GauntletEnv::BrokerPort.as_str(), &raw)?,
            None => defaults.broker_port,
        };
        let topic_namespace = read_env_nonempty(GauntletEnv::BaseTopic.as_str())?;
        let publish_window = match read_env_nonempty(GauntletEnv::PublishWindowSeconds.as_str())? {
            Some(raw) => Duration::from_secs(parse_positive_u64(
                GauntletEnv::PublishWindowSeconds.as_str(),
                &raw,
            )?),
            None => defaults.publish_window,
        };
        let publish_delay = match read_env_nonempty(GauntletEnv::PublishDelayMillis.as_str())? {
            Some(raw) => Duration::from_millis(parse_positive_u64(
                GauntletEnv::PublishDelayMillis.as_str(),
                &raw,
            )?),
            None => defaults.publish_delay,
        };
        Ok(Self {
            base_url,
            broker_host,
            broker_port,
            topic_namespace,
            publish_window,
            publish_delay,
        })
    }

    /// Returns the topic namespace, failing on first use when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingNamespace`] when `BASE_TOPIC` was never
    /// supplied.
    pub fn namespace(&self) -> Result<&str, ConfigError> {
        self.topic_namespace.as_deref().ok_or(ConfigError::MissingNamespace)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUtf8`] when the value is not valid UTF-8.
pub fn read_env_strict(name: &'static str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::InvalidUtf8 {
            name,
        })
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns [`ConfigError::Empty`] when the variable is set but blank.
fn read_env_nonempty(name: &'static str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty {
            name,
        }),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive 64-bit integer from an environment value.
fn parse_positive_u64(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let parsed: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
    })?;
    if parsed == 0 {
        return Err(ConfigError::InvalidNumber {
            name,
        });
    }
    Ok(parsed)
}

/// Parses a positive 16-bit integer from an environment value.
fn parse_positive_u16(name: &'static str, raw: &str) -> Result<u16, ConfigError> {
    let parsed: u16 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
    })?;
    if parsed == 0 {
        return Err(ConfigError::InvalidNumber {
            name,
        });
    }
    Ok(parsed)
}

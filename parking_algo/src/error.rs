//! Error types for the parking maneuver core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing or stepping a parking maneuver.
#[derive(Debug, Error)]
pub enum ParkingError {
    /// Non-positive scale factor, dimension or timing value.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `evaluate` called before both provider parameters were set.
    #[error("path provider `{provider}` evaluated before its {missing} parameter was configured")]
    UnconfiguredProvider {
        /// Name of the provider.
        provider: String,
        /// Which parameter is missing.
        missing: &'static str,
    },

    /// The path provider could not be loaded or bound.
    #[error("path provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`ManeuverConfig`](crate::config::ManeuverConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl ParkingError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    /// Creates an unconfigured provider error.
    #[must_use]
    pub fn unconfigured(provider: impl Into<String>, missing: &'static str) -> Self {
        Self::UnconfiguredProvider {
            provider: provider.into(),
            missing,
        }
    }

    /// Creates a provider unavailable error.
    #[must_use]
    pub fn provider_unavailable(reason: impl Into<String>) -> Self {
        Self::ProviderUnavailable(reason.into())
    }
}

/// Result type for parking maneuver operations.
pub type Result<T> = std::result::Result<T, ParkingError>;

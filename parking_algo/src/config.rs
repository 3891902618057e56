//! Construction parameters for a maneuver, loadable from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ParkingError, Result};
use crate::geometry::RawGeometry;
use crate::pose::FirstFrameHeading;

/// Default path of the native provider library
pub const DEFAULT_PROVIDER_LIBRARY: &str = "./libpath.so";

/// Everything needed to build a [`Maneuver`](crate::maneuver::Maneuver).
///
/// All lengths in [`RawGeometry`] are unscaled; they are multiplied by
/// `scale` once by [`GeometryConfig::normalize`](crate::geometry::GeometryConfig::normalize).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManeuverConfig {
    /// Scale factor applied to every raw length
    pub scale: f32,
    /// Turning-radius-like seed for the path provider (unscaled)
    pub turning_radius: f32,
    pub geometry: RawGeometry,
    pub animation: AnimationConfig,
    pub provider: ProviderConfig,
}

impl Default for ManeuverConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            turning_radius: 80.0,
            geometry: RawGeometry::default(),
            animation: AnimationConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl ManeuverConfig {
    /// The stock demo run: a tighter radius with a wider side gap.
    pub fn demo() -> Self {
        Self {
            scale: 5.0,
            turning_radius: 24.0,
            geometry: RawGeometry {
                lateral_clearance: 22.0,
                ..RawGeometry::default()
            },
            ..Self::default()
        }
    }

    /// Parse a config from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ParkingError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded maneuver config");
        Ok(config)
    }
}

/// Frame clock settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Time between two frames [ms]
    pub interval_ms: u32,
    /// Pause before a completed run starts over [ms]
    pub repeat_delay_ms: u32,
    /// Start over after completion
    pub repeat: bool,
    pub first_frame_heading: FirstFrameHeading,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            interval_ms: 10,
            repeat_delay_ms: 2000,
            repeat: true,
            first_frame_heading: FirstFrameHeading::default(),
        }
    }
}

impl AnimationConfig {
    /// Number of ticks spent in the restart delay.
    ///
    /// Fails if `interval_ms` is zero.
    pub fn delay_ticks(&self) -> Result<u32> {
        if self.interval_ms == 0 {
            return Err(ParkingError::invalid_config(
                "animation interval must be positive, got 0 ms",
            ));
        }
        Ok(self.repeat_delay_ms.div_ceil(self.interval_ms))
    }
}

/// Which [`PathProvider`](crate::path::PathProvider) implementation to bind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProviderConfig {
    /// Built-in closed-form two-arc curve
    #[default]
    TwoArc,
    /// Shared library exposing the native provider ABI
    Native {
        #[serde(default = "default_library")]
        library: PathBuf,
    },
}

fn default_library() -> PathBuf {
    PathBuf::from(DEFAULT_PROVIDER_LIBRARY)
}

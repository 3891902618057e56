//! Reference paths for the rear-axle point
//!
//! This module provides:
//! - [`PathProvider`]: the contract the maneuver core consumes
//! - [`TwoArcPath`]: closed-form S-curve made of two tangent arcs
//! - [`NativePath`]: a provider bound from a shared library at runtime
//! - [`PathSampler`]: evenly spaced preview samples over the travel range

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
pub mod sampler;
pub mod two_arc;

#[cfg(not(target_arch = "wasm32"))]
pub use native::NativePath;
pub use sampler::{PathSampler, PathSamples};
pub use two_arc::TwoArcPath;

use crate::config::ProviderConfig;
use crate::error::{ParkingError, Result};
use crate::geometry::PathParameters;

/// Maps a longitudinal coordinate to a lateral path coordinate.
///
/// Both configuration calls must happen before the first [`evaluate`]
/// (see [`configure`]). Evaluating an unconfigured provider fails with
/// [`ParkingError::UnconfiguredProvider`].
///
/// [`evaluate`]: PathProvider::evaluate
pub trait PathProvider {
    /// Short identifier used in logs and errors
    fn name(&self) -> &str;

    /// Set the turning-radius-like curvature parameter
    fn configure_primary(&mut self, a: f32);

    /// Set the lateral offset parameter
    fn configure_offset(&mut self, b: f32);

    /// Lateral path coordinate at longitudinal coordinate `x`
    fn evaluate(&self, x: f32) -> Result<f32>;
}

impl<P: PathProvider + ?Sized> PathProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn configure_primary(&mut self, a: f32) {
        (**self).configure_primary(a)
    }

    fn configure_offset(&mut self, b: f32) {
        (**self).configure_offset(b)
    }

    fn evaluate(&self, x: f32) -> Result<f32> {
        (**self).evaluate(x)
    }
}

/// Push both derived parameters into a provider, primary first.
pub fn configure<P: PathProvider + ?Sized>(provider: &mut P, params: &PathParameters) {
    provider.configure_primary(params.primary);
    provider.configure_offset(params.offset);
    tracing::debug!(
        provider = provider.name(),
        primary = params.primary,
        offset = params.offset,
        "configured path provider"
    );
}

/// Build the provider selected in the config.
///
/// A native library that cannot be opened or bound is reported as
/// [`ParkingError::ProviderUnavailable`].
pub fn load_provider(config: &ProviderConfig) -> Result<Box<dyn PathProvider>> {
    match config {
        ProviderConfig::TwoArc => Ok(Box::new(TwoArcPath::new())),
        #[cfg(not(target_arch = "wasm32"))]
        ProviderConfig::Native { library } => Ok(Box::new(NativePath::load(library)?)),
        #[cfg(target_arch = "wasm32")]
        ProviderConfig::Native { library } => Err(ParkingError::provider_unavailable(format!(
            "{}: shared libraries cannot be loaded on this target",
            library.display()
        ))),
    }
}

/// Parameter slots shared by provider implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamSlots {
    primary: Option<f32>,
    offset: Option<f32>,
}

impl ParamSlots {
    pub fn set_primary(&mut self, a: f32) {
        self.primary = Some(a);
    }

    pub fn set_offset(&mut self, b: f32) {
        self.offset = Some(b);
    }

    /// Both parameters, or the name of the first one that is missing
    pub fn require(&self, provider: &str) -> Result<(f32, f32)> {
        let a = self
            .primary
            .ok_or_else(|| ParkingError::unconfigured(provider, "primary"))?;
        let b = self
            .offset
            .ok_or_else(|| ParkingError::unconfigured(provider, "offset"))?;
        Ok((a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_slots_require_both() {
        let mut slots = ParamSlots::default();
        let err = slots.require("test").unwrap_err();
        assert!(err.to_string().contains("primary"));

        slots.set_primary(120.0);
        let err = slots.require("test").unwrap_err();
        assert!(err.to_string().contains("offset"));

        slots.set_offset(107.5);
        assert_eq!(slots.require("test").unwrap(), (120.0, 107.5));
    }

    #[test]
    fn test_configure_then_evaluate_boxed() {
        let mut provider: Box<dyn PathProvider> = load_provider(&ProviderConfig::TwoArc).unwrap();
        assert!(provider.evaluate(0.0).is_err());

        configure(
            &mut provider,
            &PathParameters {
                primary: 120.0,
                offset: 107.5,
            },
        );
        assert_eq!(provider.name(), "two-arc");
        assert_eq!(provider.evaluate(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_missing_native_library_is_unavailable() {
        let config = ProviderConfig::Native {
            library: "/nonexistent/libpath.so".into(),
        };
        let err = load_provider(&config).err().unwrap();
        assert!(matches!(err, ParkingError::ProviderUnavailable(_)));
    }
}

//! Geometry normalization: raw vehicle/slot dimensions into scaled units.
//!
//! Every length handed to the rest of the core has already been multiplied by
//! the scale factor, so downstream code never sees raw dimensions.

use serde::{Deserialize, Serialize};

use crate::error::{ParkingError, Result};

/// Unscaled vehicle, slot and neighbor dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGeometry {
    /// Car length (bumper to bumper)
    pub car_length: f32,
    /// Axle-to-axle length
    pub axle_length: f32,
    /// Trunk length (rear axle to rear bumper)
    pub trunk_length: f32,
    /// Car width
    pub car_width: f32,
    /// Parking slot length
    pub slot_length: f32,
    /// Parking slot width (depth)
    pub slot_width: f32,
    /// Side distance between the car and the parked neighbors
    pub lateral_clearance: f32,
    /// Forward distance to the front neighbor (signed)
    pub forward_offset: f32,
    /// Neighbor vehicle width
    pub neighbor_width: f32,
    /// Neighbor vehicle length
    pub neighbor_length: f32,
}

impl Default for RawGeometry {
    fn default() -> Self {
        Self {
            car_length: 40.0,
            axle_length: 30.0,
            trunk_length: 5.0,
            car_width: 20.0,
            slot_length: 60.0,
            slot_width: 22.0,
            lateral_clearance: 20.0,
            forward_offset: -1.0,
            neighbor_width: 20.0,
            neighbor_length: 50.0,
        }
    }
}

/// Scaled geometry, immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    pub car_length: f32,
    pub axle_length: f32,
    pub trunk_length: f32,
    pub car_width: f32,
    pub slot_length: f32,
    pub slot_width: f32,
    pub lateral_clearance: f32,
    pub forward_offset: f32,
    pub neighbor_width: f32,
    pub neighbor_length: f32,
    /// The factor every length above was multiplied by
    pub scale: f32,
}

impl GeometryConfig {
    /// Scale every raw length by `scale`.
    ///
    /// The scale factor is validated before any dimension, and all required
    /// dimensions must be strictly positive. `forward_offset` is signed and only
    /// has to be finite.
    pub fn normalize(raw: &RawGeometry, scale: f32) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ParkingError::invalid_config(format!(
                "scale factor must be positive, got {scale}"
            )));
        }

        let required = [
            ("car length", raw.car_length),
            ("axle length", raw.axle_length),
            ("trunk length", raw.trunk_length),
            ("car width", raw.car_width),
            ("slot length", raw.slot_length),
            ("slot width", raw.slot_width),
            ("lateral clearance", raw.lateral_clearance),
            ("neighbor width", raw.neighbor_width),
            ("neighbor length", raw.neighbor_length),
        ];
        for (name, value) in required {
            ensure_positive(name, value)?;
        }
        if !raw.forward_offset.is_finite() {
            return Err(ParkingError::invalid_config(format!(
                "forward offset must be finite, got {}",
                raw.forward_offset
            )));
        }

        Ok(Self {
            car_length: raw.car_length * scale,
            axle_length: raw.axle_length * scale,
            trunk_length: raw.trunk_length * scale,
            car_width: raw.car_width * scale,
            slot_length: raw.slot_length * scale,
            slot_width: raw.slot_width * scale,
            lateral_clearance: raw.lateral_clearance * scale,
            forward_offset: raw.forward_offset * scale,
            neighbor_width: raw.neighbor_width * scale,
            neighbor_length: raw.neighbor_length * scale,
            scale,
        })
    }

    pub fn half_car_width(&self) -> f32 {
        self.car_width / 2.0
    }

    pub fn half_slot_width(&self) -> f32 {
        self.slot_width / 2.0
    }

    /// Lateral coordinate of the neighbors' inner edge (and the slot's near edge)
    pub fn neighbor_edge(&self) -> f32 {
        self.half_car_width() + self.lateral_clearance
    }
}

fn ensure_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParkingError::invalid_config(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

/// Longitudinal span covered by a maneuver.
///
/// The frame index and the path `x` coordinate are the same scalar, so the
/// number of frames is the scaled range itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelRange {
    /// Range in raw units (twice the turning radius)
    pub unscaled: f32,
    /// Range in scaled units
    pub scaled: f32,
    scale: f32,
}

impl TravelRange {
    pub fn from_radius(turning_radius: f32, scale: f32) -> Result<Self> {
        ensure_positive("turning radius", turning_radius)?;
        let unscaled = 2.0 * turning_radius;
        let range = Self {
            unscaled,
            scaled: unscaled * scale,
            scale,
        };
        if range.frame_count() == 0 {
            return Err(ParkingError::invalid_config(format!(
                "travel range {} is shorter than one frame",
                range.scaled
            )));
        }
        Ok(range)
    }

    /// Number of simulation frames, `floor(scaled)`
    pub fn frame_count(&self) -> u32 {
        self.scaled.floor() as u32
    }

    /// Number of frames whose `x` lies beyond `end`
    pub fn frames_past(&self, end: f32) -> u32 {
        let last_inside = if end < 0.0 { 0 } else { end.floor() as u32 + 1 };
        self.frame_count().saturating_sub(last_inside)
    }

    /// Number of preview samples, `floor(unscaled * 2 * scale)`
    pub fn sample_count(&self) -> usize {
        (self.unscaled * 2.0 * self.scale).floor() as usize
    }
}

/// Parameters pushed into the path provider before the first evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathParameters {
    /// Turning-radius-like curvature parameter (scaled)
    pub primary: f32,
    /// Half the lateral distance from the car's centerline to the slot's center
    pub offset: f32,
}

impl PathParameters {
    /// Lateral distance from the start to the slot's center, `2 * offset`
    pub fn slot_center(&self) -> f32 {
        2.0 * self.offset
    }

    pub fn derive(geometry: &GeometryConfig, turning_radius: f32) -> Result<Self> {
        ensure_positive("turning radius", turning_radius)?;
        Ok(Self {
            primary: turning_radius * geometry.scale,
            offset: (geometry.half_car_width()
                + geometry.lateral_clearance
                + geometry.half_slot_width())
                / 2.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_is_linear() {
        let raw = RawGeometry::default();
        for scale in [0.5_f32, 1.0, 5.0, 10.0, 12.5] {
            let geometry = GeometryConfig::normalize(&raw, scale).unwrap();
            assert_eq!(geometry.car_length, raw.car_length * scale);
            assert_eq!(geometry.axle_length, raw.axle_length * scale);
            assert_eq!(geometry.trunk_length, raw.trunk_length * scale);
            assert_eq!(geometry.car_width, raw.car_width * scale);
            assert_eq!(geometry.slot_length, raw.slot_length * scale);
            assert_eq!(geometry.slot_width, raw.slot_width * scale);
            assert_eq!(geometry.lateral_clearance, raw.lateral_clearance * scale);
            assert_eq!(geometry.forward_offset, raw.forward_offset * scale);
            assert_eq!(geometry.neighbor_width, raw.neighbor_width * scale);
            assert_eq!(geometry.neighbor_length, raw.neighbor_length * scale);
            assert_eq!(geometry.scale, scale);
        }
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let raw = RawGeometry::default();
        for scale in [0.0_f32, -1.0, -0.0, f32::NAN] {
            let err = GeometryConfig::normalize(&raw, scale).unwrap_err();
            assert!(matches!(err, ParkingError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_rejects_non_positive_dimension() {
        let raw = RawGeometry {
            slot_width: 0.0,
            ..Default::default()
        };
        let err = GeometryConfig::normalize(&raw, 5.0).unwrap_err();
        assert!(err.to_string().contains("slot width"));

        let raw = RawGeometry {
            trunk_length: -5.0,
            ..Default::default()
        };
        assert!(GeometryConfig::normalize(&raw, 5.0).is_err());
    }

    #[test]
    fn test_scale_checked_before_dimensions() {
        let raw = RawGeometry {
            car_width: -1.0,
            ..Default::default()
        };
        let err = GeometryConfig::normalize(&raw, 0.0).unwrap_err();
        assert!(err.to_string().contains("scale factor"));
    }

    #[test]
    fn test_negative_forward_offset_is_allowed() {
        let geometry = GeometryConfig::normalize(&RawGeometry::default(), 5.0).unwrap();
        assert_eq!(geometry.forward_offset, -5.0);
    }

    #[test]
    fn test_path_parameters_demo_scenario() {
        // scale=5, radius=24, lateral clearance=22 with the stock car/slot widths
        let raw = RawGeometry {
            lateral_clearance: 22.0,
            ..Default::default()
        };
        let geometry = GeometryConfig::normalize(&raw, 5.0).unwrap();
        let params = PathParameters::derive(&geometry, 24.0).unwrap();

        assert_relative_eq!(params.primary, 120.0);
        // (100 / 2 + 110 + 110 / 2) / 2
        assert_relative_eq!(params.offset, 107.5);
    }

    #[test]
    fn test_offset_formula() {
        let raw = RawGeometry {
            car_width: 18.0,
            lateral_clearance: 7.0,
            slot_width: 25.0,
            ..Default::default()
        };
        let geometry = GeometryConfig::normalize(&raw, 2.0).unwrap();
        let params = PathParameters::derive(&geometry, 10.0).unwrap();
        let expected =
            (geometry.car_width / 2.0 + geometry.lateral_clearance + geometry.slot_width / 2.0)
                / 2.0;
        assert_eq!(params.offset, expected);
        assert_eq!(params.primary, 20.0);
    }

    #[test]
    fn test_travel_range_counts() {
        let range = TravelRange::from_radius(24.0, 5.0).unwrap();
        assert_eq!(range.unscaled, 48.0);
        assert_eq!(range.scaled, 240.0);
        assert_eq!(range.frame_count(), 240);
        assert_eq!(range.sample_count(), 480);
    }

    #[test]
    fn test_travel_range_rejects_degenerate_radius() {
        assert!(TravelRange::from_radius(0.0, 5.0).is_err());
        assert!(TravelRange::from_radius(-3.0, 5.0).is_err());
        // 2 * 0.04 * 5 = 0.4 < one frame
        assert!(TravelRange::from_radius(0.04, 5.0).is_err());
    }

    #[test]
    fn test_frames_past_slot_center() {
        let range = TravelRange::from_radius(24.0, 5.0).unwrap();
        // Frames 216..=239 lie beyond x = 215
        assert_eq!(range.frames_past(215.0), 24);
        assert_eq!(range.frames_past(239.0), 0);
        assert_eq!(range.frames_past(1000.0), 0);
        assert_eq!(range.frames_past(-1.0), 240);

        // Stock defaults: radius 80 at scale 10 against a slot center at 410
        let range = TravelRange::from_radius(80.0, 10.0).unwrap();
        assert_eq!(range.frames_past(410.0), 1189);
    }
}

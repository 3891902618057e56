//! Kinematic pose stepping along a reference path
//!
//! The path is followed by the rear-axle point. The vehicle's reference point
//! (the corner its rectangle is anchored at) sits half a car width and one
//! trunk length behind the axle. Heading comes from the finite difference of
//! two consecutive reference points:
//! ```text
//! axle     = (f, path(f))
//! position = axle - (w/2, l_t)
//! heading  = atan2(dy, dx) + 90°
//! ```
//! The +90° accounts for the vehicle rectangle's local frame, where zero
//! rotation means pointing along the lateral axis.

use std::f32::consts::FRAC_PI_2;

use nalgebra::{Point2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::GeometryConfig;
use crate::path::PathProvider;

/// How the heading of the very first frame is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FirstFrameHeading {
    /// Difference against the rest pose the vehicle is drawn at before the
    /// run starts
    #[default]
    FromDefault,
    /// Seed the previous pose from the path at frame -1
    SeedFromPrecedingFrame,
    /// Keep the rest heading for frame 0
    Suppress,
}

impl FirstFrameHeading {
    pub const ALL: [Self; 3] = [Self::FromDefault, Self::SeedFromPrecedingFrame, Self::Suppress];

    pub fn label(&self) -> &'static str {
        match self {
            FirstFrameHeading::FromDefault => "From rest pose",
            FirstFrameHeading::SeedFromPrecedingFrame => "Seed from frame -1",
            FirstFrameHeading::Suppress => "Suppress",
        }
    }
}

/// Vehicle reference point and heading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehiclePose {
    /// Reference point (rectangle anchor corner)
    pub position: Point2<f32>,
    /// Rotation of the vehicle rectangle [rad]
    pub heading: f32,
}

impl VehiclePose {
    /// Pose the vehicle is drawn at before the first frame: axle at the origin,
    /// no rotation
    pub fn rest(geometry: &GeometryConfig) -> Self {
        Self {
            position: Point2::new(-geometry.half_car_width(), -geometry.trunk_length),
            heading: 0.0,
        }
    }

    pub fn heading_degrees(&self) -> f32 {
        self.heading.to_degrees()
    }

    /// Corners of the vehicle rectangle rotated by the heading about `pivot`.
    ///
    /// Unrotated, the rectangle spans the car width along x and the car length
    /// along y, starting at [`position`](Self::position). Corners are returned
    /// counter-clockwise from the anchor.
    pub fn footprint(&self, geometry: &GeometryConfig, pivot: Point2<f32>) -> [Point2<f32>; 4] {
        let rotation = Rotation2::new(self.heading);
        let (w, l) = (geometry.car_width, geometry.car_length);
        [
            Vector2::new(0.0, 0.0),
            Vector2::new(w, 0.0),
            Vector2::new(w, l),
            Vector2::new(0.0, l),
        ]
        .map(|corner| pivot + rotation * (self.position + corner - pivot))
    }
}

/// Output of one simulation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseUpdate {
    pub frame: u32,
    pub pose: VehiclePose,
    /// Rear-axle center; always `(frame, path(frame))`
    pub axle: Point2<f32>,
}

/// Derives the vehicle pose for a frame from the path and the previous pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseUpdater {
    /// Reference point relative to the axle
    anchor_offset: Vector2<f32>,
    first_frame: FirstFrameHeading,
    rest: VehiclePose,
}

impl PoseUpdater {
    pub fn new(geometry: &GeometryConfig, first_frame: FirstFrameHeading) -> Self {
        Self {
            anchor_offset: Vector2::new(geometry.half_car_width(), geometry.trunk_length),
            first_frame,
            rest: VehiclePose::rest(geometry),
        }
    }

    pub fn first_frame_heading(&self) -> FirstFrameHeading {
        self.first_frame
    }

    /// Reference point for a given axle point
    pub fn reference_point(&self, axle: Point2<f32>) -> Point2<f32> {
        axle - self.anchor_offset
    }

    /// Pose the first frame is differenced against
    pub fn initial_pose<P: PathProvider + ?Sized>(&self, provider: &P) -> Result<VehiclePose> {
        match self.first_frame {
            FirstFrameHeading::FromDefault | FirstFrameHeading::Suppress => Ok(self.rest),
            FirstFrameHeading::SeedFromPrecedingFrame => {
                let x = -1.0;
                let axle = Point2::new(x, provider.evaluate(x)?);
                Ok(VehiclePose {
                    position: self.reference_point(axle),
                    heading: self.rest.heading,
                })
            }
        }
    }

    /// Pose for `frame`, given the pose of the frame before it
    pub fn update<P: PathProvider + ?Sized>(
        &self,
        provider: &P,
        frame: u32,
        previous: &VehiclePose,
    ) -> Result<PoseUpdate> {
        let x = frame as f32;
        let axle = Point2::new(x, provider.evaluate(x)?);
        let position = self.reference_point(axle);

        let heading = if frame == 0 && self.first_frame == FirstFrameHeading::Suppress {
            previous.heading
        } else {
            let delta = position - previous.position;
            delta.y.atan2(delta.x) + FRAC_PI_2
        };

        Ok(PoseUpdate {
            frame,
            pose: VehiclePose { position, heading },
            axle,
        })
    }
}

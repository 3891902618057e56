//! Path sampling and kinematic pose stepping for parallel-parking maneuvers.
//!
//! A [`Maneuver`](maneuver::Maneuver) normalizes vehicle and slot dimensions,
//! configures a [`PathProvider`](path::PathProvider) for the rear-axle path and
//! steps the vehicle pose along it one frame per tick.

pub mod config;
pub mod error;
pub mod geometry;
pub mod maneuver;
pub mod path;
pub mod pose;
pub mod scene;

pub mod prelude {
    pub use crate::config::{AnimationConfig, ManeuverConfig, ProviderConfig};
    pub use crate::error::{ParkingError, Result};
    pub use crate::geometry::{GeometryConfig, PathParameters, RawGeometry, TravelRange};
    pub use crate::maneuver::{LoopState, Maneuver, Tick};
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::path::NativePath;
    pub use crate::path::{PathProvider, PathSampler, TwoArcPath};
    pub use crate::pose::{FirstFrameHeading, PoseUpdate, PoseUpdater, VehiclePose};
    pub use crate::scene::{Rect, SceneLayout};
    pub use nalgebra;
    pub use nalgebra::{Point2, Vector2};
}

pub use prelude::*;

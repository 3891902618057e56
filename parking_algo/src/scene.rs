//! Static scene around the maneuver: parked neighbors, the slot and the path
//! preview. Nothing here is consulted while stepping the vehicle.

use nalgebra::{Point2, Vector2};

use crate::error::Result;
use crate::geometry::GeometryConfig;
use crate::path::{PathProvider, PathSampler};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Lower-left corner
    pub min: Point2<f32>,
    pub size: Vector2<f32>,
}

impl Rect {
    pub fn new(min: Point2<f32>, size: Vector2<f32>) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Point2<f32> {
        self.min + self.size
    }

    pub fn center(&self) -> Point2<f32> {
        self.min + self.size / 2.0
    }

    /// Counter-clockwise from `min`
    pub fn corners(&self) -> [Point2<f32>; 4] {
        let max = self.max();
        [
            self.min,
            Point2::new(max.x, self.min.y),
            max,
            Point2::new(self.min.x, max.y),
        ]
    }
}

/// Everything drawn once per scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    /// Neighbor parked ahead of the slot
    pub front_neighbor: Rect,
    /// Neighbor parked behind the slot
    pub rear_neighbor: Rect,
    pub slot: Rect,
    /// Sampled reference path
    pub preview: Vec<Point2<f32>>,
}

impl SceneLayout {
    pub fn build<P: PathProvider + ?Sized>(
        geometry: &GeometryConfig,
        sampler: &PathSampler,
        provider: &P,
    ) -> Result<Self> {
        let preview = sampler.samples(provider).collect::<Result<Vec<_>>>()?;
        let [front_neighbor, rear_neighbor] = Self::neighbors(geometry);
        tracing::debug!(samples = preview.len(), "built scene layout");
        Ok(Self {
            front_neighbor,
            rear_neighbor,
            slot: Self::slot(geometry),
            preview,
        })
    }

    /// Front and rear neighbors; the slot lies between them.
    pub fn neighbors(geometry: &GeometryConfig) -> [Rect; 2] {
        let size = Vector2::new(geometry.neighbor_width, geometry.neighbor_length);
        let edge = geometry.neighbor_edge();
        let front = Point2::new(edge, -geometry.forward_offset);
        let rear = Point2::new(
            edge,
            -geometry.forward_offset - geometry.slot_length - geometry.neighbor_length,
        );
        [Rect::new(front, size), Rect::new(rear, size)]
    }

    pub fn slot(geometry: &GeometryConfig) -> Rect {
        Rect::new(
            Point2::new(
                geometry.neighbor_edge(),
                -geometry.forward_offset - geometry.slot_length,
            ),
            Vector2::new(geometry.slot_width, geometry.slot_length),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{RawGeometry, TravelRange};
    use crate::path::TwoArcPath;
    use approx::assert_relative_eq;

    fn demo_geometry() -> GeometryConfig {
        let raw = RawGeometry {
            lateral_clearance: 22.0,
            ..Default::default()
        };
        GeometryConfig::normalize(&raw, 5.0).unwrap()
    }

    #[test]
    fn test_neighbors_bound_the_slot() {
        let geometry = demo_geometry();
        let [front, rear] = SceneLayout::neighbors(&geometry);
        let slot = SceneLayout::slot(&geometry);

        // Inner edge at half car width + lateral clearance
        assert_relative_eq!(front.min.x, 160.0);
        assert_relative_eq!(rear.min.x, 160.0);
        assert_relative_eq!(slot.min.x, 160.0);

        // forward offset -5 puts the front neighbor at y = 5
        assert_relative_eq!(front.min.y, 5.0);
        assert_relative_eq!(slot.max().y, front.min.y);
        assert_relative_eq!(rear.max().y, slot.min.y);
        assert_relative_eq!(slot.size.y, geometry.slot_length);
        assert_relative_eq!(front.size.x, 100.0);
        assert_relative_eq!(front.size.y, 250.0);
    }

    #[test]
    fn test_path_ends_in_slot() {
        let geometry = demo_geometry();
        let travel = TravelRange::from_radius(24.0, 5.0).unwrap();
        let mut path = TwoArcPath::new();
        path.configure_primary(120.0);
        path.configure_offset(107.5);

        let scene = SceneLayout::build(&geometry, &PathSampler::new(&travel), &path).unwrap();
        assert_eq!(scene.preview.len(), 480);

        let slot_center = scene.slot.center();
        let end = path.evaluate(2.0 * 107.5).unwrap();
        assert_relative_eq!(slot_center.x, 215.0);
        assert!(end > scene.slot.min.y && end < scene.slot.max().y);
    }

    #[test]
    fn test_rect_corners() {
        let rect = Rect::new(Point2::new(1.0, 2.0), Vector2::new(3.0, 4.0));
        assert_eq!(
            rect.corners(),
            [
                Point2::new(1.0, 2.0),
                Point2::new(4.0, 2.0),
                Point2::new(4.0, 6.0),
                Point2::new(1.0, 6.0),
            ]
        );
        assert_eq!(rect.center(), Point2::new(2.5, 4.0));
    }
}

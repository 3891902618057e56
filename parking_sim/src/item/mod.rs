//! Plot items: simple shapes built with a small builder API and turned into
//! [`egui_plot`] polygons.

mod circle;
mod rectangle;
mod vehicle;

pub use circle::Circle;
pub use rectangle::Rectangle;
pub use vehicle::{draw_neighbor, draw_slot, draw_vehicle};

use egui_plot::PlotPoints;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

/// A closed outline that can be drawn as a polygon
pub trait Shape: Default {
    fn new() -> Self {
        Self::default()
    }

    /// Outline vertices in plot coordinates
    fn outline(&self) -> Vec<[f64; 2]>;

    fn bounding_box(&self) -> PlotPoints<'static> {
        PlotPoints::new(self.outline())
    }
}

pub trait WithPosition: Sized {
    fn position_mut(&mut self) -> &mut Point;

    /// Place the shape's center at `(x, y)`
    fn at(mut self, x: f64, y: f64) -> Self {
        *self.position_mut() = Point::new(x, y);
        self
    }
}

pub trait WithSize: Sized {
    fn size_mut(&mut self) -> &mut Size;

    fn with_width(mut self, width: f64) -> Self {
        self.size_mut().width = width;
        self
    }

    fn with_height(mut self, height: f64) -> Self {
        self.size_mut().height = height;
        self
    }
}

pub trait WithAngle: Sized {
    fn angle_mut(&mut self) -> &mut f64;

    /// Rotation about the center [rad]
    fn with_angle(mut self, angle: f64) -> Self {
        *self.angle_mut() = angle;
        self
    }
}

#[macro_export]
macro_rules! impl_position {
    ($t:ty) => {
        impl $crate::item::WithPosition for $t {
            fn position_mut(&mut self) -> &mut $crate::item::Point {
                &mut self.position
            }
        }
    };
}

#[macro_export]
macro_rules! impl_size {
    ($t:ty) => {
        impl $crate::item::WithSize for $t {
            fn size_mut(&mut self) -> &mut $crate::item::Size {
                &mut self.size
            }
        }
    };
}

#[macro_export]
macro_rules! impl_angle {
    ($t:ty) => {
        impl $crate::item::WithAngle for $t {
            fn angle_mut(&mut self) -> &mut f64 {
                &mut self.angle
            }
        }
    };
}

use super::{Point, Shape};
use egui::{Color32, Stroke};
use egui_plot::Polygon;

/// Number of outline vertices
const SEGMENTS: usize = 24;

pub struct Circle {
    radius: f64,
    position: Point,
    fill: Color32,
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            radius: 1.0,
            position: Point::default(),
            fill: Color32::BLACK,
        }
    }
}

impl Circle {
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_fill(mut self, fill: Color32) -> Self {
        self.fill = fill;
        self
    }

    pub fn into_polygon(self) -> Polygon<'static> {
        Polygon::new("", self.bounding_box())
            .fill_color(self.fill)
            .stroke(Stroke::new(1.0, self.fill))
    }
}

impl Shape for Circle {
    fn outline(&self) -> Vec<[f64; 2]> {
        (0..SEGMENTS)
            .map(|i| {
                let t = std::f64::consts::TAU * i as f64 / SEGMENTS as f64;
                [
                    self.position.x + self.radius * t.cos(),
                    self.position.y + self.radius * t.sin(),
                ]
            })
            .collect()
    }
}

crate::impl_position!(Circle);

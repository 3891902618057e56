use super::{Point, Shape, Size};
use egui::{Color32, Stroke};
use egui_plot::{LineStyle, Polygon};

pub struct Rectangle {
    size: Size,
    angle: f64,
    position: Point,
    stroke: Stroke,
    fill: Color32,
    style: LineStyle,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            position: Point::new(0.0, 0.0),
            size: Size::default(),
            angle: 0.0,
            stroke: Stroke::new(1.0, Color32::TRANSPARENT),
            style: LineStyle::Solid,
            fill: Color32::from_black_alpha((0.05_f32 * 255.0) as u8),
        }
    }
}

impl Rectangle {
    pub fn with_fill(mut self, fill: Color32) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn into_polygon(self) -> Polygon<'static> {
        Polygon::new("", self.bounding_box())
            .fill_color(self.fill)
            .stroke(self.stroke)
            .style(self.style)
    }
}

impl Shape for Rectangle {
    fn outline(&self) -> Vec<[f64; 2]> {
        let (hw, hh) = (self.size.width / 2.0, self.size.height / 2.0);
        let (sin, cos) = self.angle.sin_cos();
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
            .into_iter()
            .map(|(x, y)| {
                [
                    self.position.x + x * cos - y * sin,
                    self.position.y + x * sin + y * cos,
                ]
            })
            .collect()
    }
}

crate::impl_size!(Rectangle);
crate::impl_angle!(Rectangle);
crate::impl_position!(Rectangle);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{WithAngle, WithPosition, WithSize};
    use approx::assert_relative_eq;

    #[test]
    fn test_outline_axis_aligned() {
        let rect = Rectangle::new().with_width(4.0).with_height(2.0).at(1.0, 1.0);
        assert_eq!(
            rect.outline(),
            vec![[-1.0, 0.0], [3.0, 0.0], [3.0, 2.0], [-1.0, 2.0]]
        );
    }

    #[test]
    fn test_outline_rotated_about_center() {
        let rect = Rectangle::new()
            .with_width(4.0)
            .with_height(2.0)
            .with_angle(std::f64::consts::FRAC_PI_2);
        let outline = rect.outline();
        assert_relative_eq!(outline[0][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(outline[0][1], -2.0, epsilon = 1e-12);
    }
}

use super::{Circle, Rectangle, Shape, WithAngle, WithPosition, WithSize};
use egui::{Color32, Stroke};
use egui_plot::{Line, LineStyle, PlotPoints, PlotUi};
use parking_algo::{GeometryConfig, Point2, Rect, VehiclePose};

/// Axle marker radius in scaled units
const AXLE_RADIUS: f64 = 4.0;

fn plot_points<'a>(points: impl IntoIterator<Item = &'a Point2<f32>>) -> PlotPoints<'static> {
    PlotPoints::new(
        points
            .into_iter()
            .map(|p| [p.x as f64, p.y as f64])
            .collect(),
    )
}

/// Draw the vehicle body rotated about the rear axle, plus the axle itself
pub fn draw_vehicle(
    plot_ui: &mut PlotUi<'_>,
    pose: &VehiclePose,
    axle: Point2<f32>,
    geometry: &GeometryConfig,
    name: &str,
) {
    let corners = pose.footprint(geometry, axle);
    let center = Point2::from((corners[0].coords + corners[2].coords) / 2.0);
    let body = Rectangle::new()
        .with_width(geometry.car_width as f64)
        .with_height(geometry.car_length as f64)
        .with_angle(pose.heading as f64)
        .at(center.x as f64, center.y as f64)
        .with_fill(Color32::from_rgba_unmultiplied(30, 120, 220, 60))
        .with_stroke(Stroke::new(1.5, Color32::from_rgb(30, 120, 220)))
        .into_polygon();
    plot_ui.polygon(body.name(name));

    // Front edge marker: the far side of the rectangle from the anchor
    let front = plot_points(&corners[2..]);
    plot_ui.line(Line::new("", front).width(3.0));

    let axle = Circle::new()
        .with_radius(AXLE_RADIUS)
        .with_fill(Color32::RED)
        .at(axle.x as f64, axle.y as f64)
        .into_polygon();
    plot_ui.polygon(axle.name("Rear axle"));
}

/// Draw a parked neighbor
pub fn draw_neighbor(plot_ui: &mut PlotUi<'_>, rect: &Rect, name: &str) {
    let center = rect.center();
    let neighbor = Rectangle::new()
        .with_width(rect.size.x as f64)
        .with_height(rect.size.y as f64)
        .at(center.x as f64, center.y as f64)
        .with_fill(Color32::from_gray(90))
        .with_stroke(Stroke::new(1.0, Color32::from_gray(160)))
        .into_polygon();
    plot_ui.polygon(neighbor.name(name));
}

/// Draw the empty slot outline
pub fn draw_slot(plot_ui: &mut PlotUi<'_>, rect: &Rect) {
    let center = rect.center();
    let slot = Rectangle::new()
        .with_width(rect.size.x as f64)
        .with_height(rect.size.y as f64)
        .at(center.x as f64, center.y as f64)
        .with_fill(Color32::TRANSPARENT)
        .with_stroke(Stroke::new(1.0, Color32::YELLOW))
        .with_style(LineStyle::dashed_loose())
        .into_polygon();
    plot_ui.polygon(slot.name("Slot"));
}

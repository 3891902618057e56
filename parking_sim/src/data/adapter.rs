use super::*;

use egui_plot::PlotPoints;
use parking_algo::Point2;

/// Allows converting from a column in [`TimeTable`] into [`egui`] [`PlotPoints`].
///
/// This is convenience trait for plotting on [`egui`] [`Plot`](egui_plot::Plot)
pub trait IntoValues {
    fn values(&self, column: usize) -> Option<PlotPoints<'static>>;
    fn values_shifted(&self, column: usize, x: f32, y: f32) -> Option<PlotPoints<'static>>;
}

impl IntoValues for TimeTable<f32> {
    fn values(&self, column: usize) -> Option<PlotPoints<'static>> {
        self.values_shifted(column, 0.0, 0.0)
    }
    fn values_shifted(&self, column: usize, x: f32, y: f32) -> Option<PlotPoints<'static>> {
        self.zipped_iter(column).map(|zip| {
            PlotPoints::new(
                zip.map(|(t, v)| [(*t + x) as f64, (*v + y) as f64])
                    .collect(),
            )
        })
    }
}

/// Converts a sequence of points in the maneuver plane into a plottable line
pub trait PathPlot {
    fn positions(&self) -> PlotPoints<'static>;
}

impl PathPlot for [Point2<f32>] {
    fn positions(&self) -> PlotPoints<'static> {
        PlotPoints::new(self.iter().map(|p| [p.x as f64, p.y as f64]).collect())
    }
}

impl PathPlot for VecDeque<Point2<f32>> {
    fn positions(&self) -> PlotPoints<'static> {
        PlotPoints::new(self.iter().map(|p| [p.x as f64, p.y as f64]).collect())
    }
}

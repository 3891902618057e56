pub mod parking;

use parking::ParkingSim;

use egui::*;
use egui_plot::{Corner, GridMark, Legend, Plot, PlotUi};
use parking_algo::ManeuverConfig;

/// Sensor range the default view covers, in raw units
const SENSOR_RANGE: f64 = 400.0 / 3.75;

/// Half extent of the default scene view in scaled units
fn view_extent(scale: f64) -> f64 {
    SENSOR_RANGE * scale
}

/// Axis tick label in raw units
fn raw_tick_label(value: f64, scale: f64) -> String {
    let raw = value / scale;
    format!("{}", (raw * 10.0).round() / 10.0)
}

/// Base trait to make a simulation run inside the viewer.
pub trait Simulate {
    /// Advance the simulation by `dt` seconds of wall-clock time
    fn step(&mut self, dt: f32);

    /// Reset the dynamic states of the current simulation object.
    ///
    /// Anything that gets updated with [`Simulate::step`] goes back to its
    /// starting value. Tunable parameters are left alone.
    fn reset_state(&mut self);

    /// Reset the dynamic states and every parameter to the values the
    /// simulation was created with
    fn reset_all(&mut self);
}

/// Trait to allow visually representing simulation (simulation graphics + GUI)
pub trait Draw {
    /// Draw the simulation onto a 2D scene
    fn scene(&self, plot_ui: &mut PlotUi<'_>);
    /// Draw any GUI elements to interact with the simulation
    fn options(&mut self, ui: &mut Ui);
    /// Draw time-domain plot (optional)
    fn plot(&self, _plot_ui: &mut PlotUi<'_>) {}
}

/// A concrete type for containing a simulation and executing it
pub struct Simulator {
    sim: ParkingSim,
    /// Simulated time in seconds
    time: f32,
    /// Multiplier on the frame clock: how many times [`step`](Simulate::step)
    /// is called per [`update`](Self::update)
    sim_speed: usize,
    /// Show the signal plot window
    show_graph: bool,
    paused: bool,
}

impl Simulator {
    pub fn new(config: ManeuverConfig) -> Self {
        Self {
            sim: ParkingSim::new(config),
            time: 0.0,
            sim_speed: 1,
            show_graph: false,
            paused: false,
        }
    }

    pub fn simulation(&self) -> &ParkingSim {
        &self.sim
    }

    /// Update the simulation with the time elapsed since the last frame
    pub fn update(&mut self, dt: f32) {
        if !self.paused {
            self.time += dt * self.sim_speed as f32;
            (0..self.sim_speed).for_each(|_| self.sim.step(dt));
        }
    }

    /// Draw the UI directly into a Ui (for embedding in CentralPanel)
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let btn_text = if self.paused { "Play" } else { "Pause" };
            if ui.button(btn_text).clicked() {
                self.paused = !self.paused;
            }
            if ui.button("Restart").clicked() {
                self.time = 0.0;
                self.sim.reset_state();
            }
            if ui.button("Reset All").clicked() {
                self.time = 0.0;
                self.sim.reset_all();
            }
            ui.add(
                DragValue::new(&mut self.sim_speed)
                    .range(1..=10)
                    .prefix("Speed: ")
                    .suffix("x"),
            );
            ui.checkbox(&mut self.show_graph, "Show Graph");
            ui.label(format!("t = {:.2} s", self.time));
        });

        ui.separator();

        self.sim.options(ui);

        ui.separator();

        ui.collapsing("Instructions", |ui| {
            ui.label("Pan by dragging, or scroll (+ shift = horizontal).");
            ui.label("Box zooming: Right click to zoom in and zoom out using a selection.");
            if cfg!(target_arch = "wasm32") {
                ui.label("Zoom with ctrl / ⌘ + pointer wheel, or with pinch gesture.");
            } else if cfg!(target_os = "macos") {
                ui.label("Zoom with ctrl / ⌘ + scroll.");
            } else {
                ui.label("Zoom with ctrl + scroll.");
            }
            ui.label("Reset view with double-click.");
        });

        let scale = self.sim.scale() as f64;
        let extent = view_extent(scale);
        let plot = Plot::new("Scene")
            .legend(Legend::default().position(Corner::RightTop))
            .show_x(false)
            .show_y(false)
            .show_grid([true, false])
            .x_axis_formatter(move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
                raw_tick_label(mark.value, scale)
            })
            .y_axis_formatter(move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
                raw_tick_label(mark.value, scale)
            })
            .include_x(-extent)
            .include_x(extent)
            .include_y(-extent)
            .include_y(extent)
            .data_aspect(1.0);

        plot.show(ui, |plot_ui| self.sim.scene(plot_ui));

        if self.show_graph {
            egui::Window::new("Signal Plot")
                .default_size(vec2(400.0, 300.0))
                .show(ui.ctx(), |ui| {
                    Plot::new("Plot")
                        .legend(Legend::default().position(Corner::RightTop))
                        .show(ui, |plot_ui| self.sim.plot(plot_ui));
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tick_labels_in_raw_units() {
        assert_eq!(raw_tick_label(120.0, 5.0), "24");
        assert_eq!(raw_tick_label(-107.5, 5.0), "-21.5");
        assert_eq!(raw_tick_label(0.0, 10.0), "0");
    }

    #[test]
    fn test_view_covers_sensor_range() {
        assert_relative_eq!(view_extent(5.0), 533.333, epsilon = 1e-3);
        assert_relative_eq!(view_extent(3.75), 400.0, epsilon = 1e-9);
    }
}

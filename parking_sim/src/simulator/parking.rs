use super::*;

use std::collections::VecDeque;

use crate::data::{IntoValues, PathPlot, TimeTable, DEFAULT_HISTORY_LEN};
use crate::item::{draw_neighbor, draw_slot, draw_vehicle};
use crate::time::Timer;

use egui::{Color32, DragValue, RichText, Ui};
use egui_plot::{Line, LineStyle, PlotPoint, PlotUi, Text};
use parking_algo::{
    FirstFrameHeading, LoopState, Maneuver, ManeuverConfig, PathProvider, Point2, PoseUpdate,
    Tick, VehiclePose,
};

/// Signal columns recorded per frame
const HEADING: usize = 0;
const AXLE_Y: usize = 1;

/// Parallel-parking maneuver animated on the frame clock
pub struct ParkingSim {
    /// Parameters currently shown in the options panel
    config: ManeuverConfig,
    /// Parameters the simulation was created with
    initial: ManeuverConfig,
    maneuver: Option<Maneuver<Box<dyn PathProvider>>>,
    /// Last build or tick failure, shown instead of the vehicle
    error: Option<String>,
    timer: Timer,
    last: Option<PoseUpdate>,
    /// Axle positions of the current run
    trail: VecDeque<Point2<f32>>,
    /// Heading [deg] and axle y against frame number
    signals: TimeTable<f32>,
    runs: usize,
}

impl ParkingSim {
    pub fn new(config: ManeuverConfig) -> Self {
        let mut sim = Self {
            timer: Timer::from_millis(config.animation.interval_ms),
            initial: config.clone(),
            config,
            maneuver: None,
            error: None,
            last: None,
            trail: VecDeque::with_capacity(DEFAULT_HISTORY_LEN),
            signals: TimeTable::with_default_len(2),
            runs: 0,
        };
        sim.rebuild();
        sim
    }

    /// Rebuild the maneuver from the current parameters and start over.
    fn rebuild(&mut self) {
        self.clear_run();
        self.runs = 0;
        self.timer = Timer::from_millis(self.config.animation.interval_ms);
        match Maneuver::from_config(&self.config) {
            Ok(maneuver) => {
                self.maneuver = Some(maneuver);
                self.error = None;
            }
            Err(err) => {
                tracing::error!(%err, "failed to build maneuver");
                self.maneuver = None;
                self.error = Some(err.to_string());
            }
        }
    }

    fn clear_run(&mut self) {
        self.last = None;
        self.trail.clear();
        self.signals.clear();
    }

    fn record(&mut self, update: PoseUpdate) {
        if update.frame == 0 {
            self.clear_run();
            self.runs += 1;
        }
        self.trail.push_back(update.axle);
        if self.trail.len() > DEFAULT_HISTORY_LEN {
            self.trail.pop_front();
        }
        self.signals.push(
            update.frame as f32,
            &[update.pose.heading_degrees(), update.axle.y],
        );
        self.last = Some(update);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_update(&self) -> Option<&PoseUpdate> {
        self.last.as_ref()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn state(&self) -> Option<LoopState> {
        self.maneuver.as_ref().map(Maneuver::state)
    }

    pub fn config(&self) -> &ManeuverConfig {
        &self.config
    }

    /// Scale factor of the running maneuver, or of the edited parameters
    /// while none could be built
    pub fn scale(&self) -> f32 {
        self.maneuver
            .as_ref()
            .map_or(self.config.scale, |maneuver| maneuver.geometry().scale)
    }

    /// Vehicle pose and axle to draw right now
    fn current_pose(&self) -> Option<(VehiclePose, Point2<f32>)> {
        let maneuver = self.maneuver.as_ref()?;
        Some(match self.last {
            Some(update) => (update.pose, update.axle),
            None => (VehiclePose::rest(maneuver.geometry()), Point2::origin()),
        })
    }

    fn status(&self) -> String {
        match (self.state(), &self.last) {
            (None, _) => "not running".to_owned(),
            (Some(LoopState::Idle), _) => "idle".to_owned(),
            (Some(LoopState::Running { .. }), Some(update)) => format!(
                "run {} frame {} heading {:.1}°",
                self.runs,
                update.frame,
                update.pose.heading_degrees()
            ),
            (Some(LoopState::Running { .. }), None) => "running".to_owned(),
            (Some(LoopState::Completed), _) => format!("run {} completed", self.runs),
            (Some(LoopState::Restarting { remaining_ticks }), _) => {
                format!("restarting in {remaining_ticks} ticks")
            }
        }
    }
}

impl Simulate for ParkingSim {
    fn step(&mut self, dt: f32) {
        let ticks = self.timer.advance(dt);
        for _ in 0..ticks {
            let Some(maneuver) = self.maneuver.as_mut() else {
                return;
            };
            match maneuver.tick() {
                Ok(Tick::Frame(update)) => self.record(update),
                Ok(Tick::Completed) => {
                    // The car waits out the restart delay at rest
                    if matches!(maneuver.state(), LoopState::Restarting { .. }) {
                        self.last = None;
                    }
                }
                Ok(Tick::Waiting { .. }) => {}
                Err(err) => {
                    tracing::error!(%err, "maneuver stopped");
                    self.error = Some(err.to_string());
                    self.maneuver = None;
                }
            }
        }
    }

    fn reset_state(&mut self) {
        self.clear_run();
        self.timer.reset();
        if let Some(maneuver) = self.maneuver.as_mut() {
            maneuver.reset();
        } else {
            self.rebuild();
        }
    }

    fn reset_all(&mut self) {
        self.config = self.initial.clone();
        self.rebuild();
    }
}

impl Draw for ParkingSim {
    fn scene(&self, plot_ui: &mut PlotUi<'_>) {
        let Some(maneuver) = self.maneuver.as_ref() else {
            if let Some(err) = &self.error {
                plot_ui.text(Text::new(
                    "",
                    PlotPoint::new(0.0, 0.0),
                    RichText::new(err).color(Color32::RED),
                ));
            }
            return;
        };

        let scene = maneuver.scene();
        draw_neighbor(plot_ui, &scene.front_neighbor, "Front neighbor");
        draw_neighbor(plot_ui, &scene.rear_neighbor, "Rear neighbor");
        draw_slot(plot_ui, &scene.slot);

        plot_ui.line(
            Line::new("Path", scene.preview.positions())
                .style(LineStyle::Dotted { spacing: 6.0 })
                .color(Color32::GRAY),
        );
        plot_ui.line(Line::new("Axle trail", self.trail.positions()).width(2.0));

        if let Some((pose, axle)) = self.current_pose() {
            draw_vehicle(plot_ui, &pose, axle, maneuver.geometry(), "Vehicle");
        }
    }

    fn options(&mut self, ui: &mut Ui) {
        let mut changed = false;
        ui.group(|ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("Provider: {}", self.provider_name()));
                    ui.label(self.status());
                });
                if let Some(err) = &self.error {
                    ui.colored_label(Color32::RED, err);
                }
                if let Some(overhang) = self
                    .maneuver
                    .as_ref()
                    .map(Maneuver::overhang_frames)
                    .filter(|&frames| frames > 0)
                {
                    ui.colored_label(
                        Color32::YELLOW,
                        format!("{overhang} frames run past the slot center"),
                    );
                }

                ui.horizontal(|ui| {
                    ui.label("First frame heading:");
                    for policy in FirstFrameHeading::ALL {
                        let selected = self.config.animation.first_frame_heading == policy;
                        if ui.selectable_label(selected, policy.label()).clicked() && !selected {
                            self.config.animation.first_frame_heading = policy;
                            changed = true;
                        }
                    }
                    changed |= ui
                        .checkbox(&mut self.config.animation.repeat, "Repeat")
                        .changed();
                });

                ui.horizontal(|ui| {
                    changed |= ui
                        .add(
                            DragValue::new(&mut self.config.scale)
                                .speed(0.1)
                                .range(0.1_f32..=20.0)
                                .prefix("Scale: "),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            DragValue::new(&mut self.config.turning_radius)
                                .speed(0.5)
                                .range(1.0_f32..=200.0)
                                .prefix("Radius: "),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            DragValue::new(&mut self.config.animation.interval_ms)
                                .range(1..=200)
                                .prefix("Interval: ")
                                .suffix(" ms"),
                        )
                        .changed();
                });

                ui.collapsing("Geometry", |ui| {
                    let geometry = &mut self.config.geometry;
                    ui.horizontal(|ui| {
                        for (value, label) in [
                            (&mut geometry.car_length, "Car length: "),
                            (&mut geometry.car_width, "Car width: "),
                            (&mut geometry.trunk_length, "Trunk: "),
                        ] {
                            changed |= ui
                                .add(
                                    DragValue::new(value)
                                        .speed(0.5)
                                        .range(1.0_f32..=500.0)
                                        .prefix(label),
                                )
                                .changed();
                        }
                    });
                    ui.horizontal(|ui| {
                        for (value, label) in [
                            (&mut geometry.slot_length, "Slot length: "),
                            (&mut geometry.slot_width, "Slot width: "),
                            (&mut geometry.lateral_clearance, "Side gap: "),
                        ] {
                            changed |= ui
                                .add(
                                    DragValue::new(value)
                                        .speed(0.5)
                                        .range(1.0_f32..=500.0)
                                        .prefix(label),
                                )
                                .changed();
                        }
                        changed |= ui
                            .add(
                                DragValue::new(&mut geometry.forward_offset)
                                    .speed(0.5)
                                    .range(-100.0_f32..=100.0)
                                    .prefix("Forward offset: "),
                            )
                            .changed();
                    });
                });
            });
        });

        if changed {
            tracing::debug!("maneuver parameters changed, rebuilding");
            self.rebuild();
        }
    }

    fn plot(&self, plot_ui: &mut PlotUi<'_>) {
        if let Some(values) = self.signals.values(HEADING) {
            plot_ui.line(Line::new("Heading (deg)", values));
        }
        if let Some(values) = self.signals.values(AXLE_Y) {
            plot_ui.line(Line::new("Axle y", values).style(LineStyle::dashed_dense()));
        }
    }
}

impl ParkingSim {
    fn provider_name(&self) -> &str {
        self.maneuver
            .as_ref()
            .map_or("none", |maneuver| maneuver.provider().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_algo::ProviderConfig;

    /// One frame of the 10 ms demo interval at a time
    fn run_ticks(sim: &mut ParkingSim, n: u32) {
        for _ in 0..n {
            sim.step(0.01);
        }
    }

    #[test]
    fn test_step_records_frames() {
        let mut sim = ParkingSim::new(ManeuverConfig::demo());
        assert!(sim.error().is_none());
        assert_eq!(sim.state(), Some(LoopState::Idle));

        run_ticks(&mut sim, 5);
        assert_eq!(sim.trail_len(), 5);
        assert_eq!(sim.last_update().map(|u| u.frame), Some(4));
        assert_eq!(sim.state(), Some(LoopState::Running { next_frame: 5 }));
    }

    #[test]
    fn test_trail_cleared_on_restart() {
        let mut config = ManeuverConfig::demo();
        config.animation.repeat_delay_ms = 20;
        let mut sim = ParkingSim::new(config);

        // 240 frames, the completion tick opening the 2-tick delay, one
        // waiting tick, then frame 0 again
        run_ticks(&mut sim, 243);
        assert_eq!(sim.runs, 2);
        assert_eq!(sim.trail_len(), 1);
        assert_eq!(sim.last_update().map(|u| u.frame), Some(0));
    }

    #[test]
    fn test_drawn_at_rest_during_delay() {
        let mut sim = ParkingSim::new(ManeuverConfig::demo());
        run_ticks(&mut sim, 241);
        assert!(matches!(sim.state(), Some(LoopState::Restarting { .. })));
        assert!(sim.last_update().is_none());

        let geometry = sim.maneuver.as_ref().unwrap().geometry();
        assert_eq!(
            sim.current_pose(),
            Some((VehiclePose::rest(geometry), Point2::origin()))
        );
    }

    #[test]
    fn test_scale_follows_config() {
        let sim = ParkingSim::new(ManeuverConfig::demo());
        assert_eq!(sim.scale(), 5.0);

        let mut config = ManeuverConfig::demo();
        config.scale = -2.0;
        assert_eq!(ParkingSim::new(config).scale(), -2.0);
    }

    #[test]
    fn test_reset_state_returns_to_rest() {
        let mut sim = ParkingSim::new(ManeuverConfig::demo());
        run_ticks(&mut sim, 10);
        sim.reset_state();
        assert_eq!(sim.state(), Some(LoopState::Idle));
        assert!(sim.last_update().is_none());
        assert_eq!(sim.trail_len(), 0);
    }

    #[test]
    fn test_invalid_config_reported() {
        let mut config = ManeuverConfig::demo();
        config.scale = 0.0;
        let mut sim = ParkingSim::new(config);
        assert!(sim.state().is_none());
        assert!(sim.error().is_some_and(|e| e.contains("scale")));

        // Stepping without a maneuver is a no-op
        run_ticks(&mut sim, 3);
        assert!(sim.last_update().is_none());
    }

    #[test]
    fn test_missing_native_library_reported() {
        let mut config = ManeuverConfig::demo();
        config.provider = ProviderConfig::Native {
            library: "./does-not-exist.so".into(),
        };
        let sim = ParkingSim::new(config);
        assert!(sim.error().is_some());
        assert_eq!(sim.provider_name(), "none");
    }

    #[test]
    fn test_reset_all_restores_initial_config() {
        let mut sim = ParkingSim::new(ManeuverConfig::demo());
        sim.config.scale = 0.0;
        sim.rebuild();
        assert!(sim.error().is_some());

        sim.reset_all();
        assert!(sim.error().is_none());
        assert_eq!(sim.config(), &ManeuverConfig::demo());
    }
}

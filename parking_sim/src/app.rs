use crate::simulator::Simulator;

use eframe::egui;
use parking_algo::ManeuverConfig;

pub struct App {
    sim: Simulator,
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ManeuverConfig) -> Self {
        Self {
            sim: Simulator::new(config),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt);
        self.sim.update(dt);

        egui::CentralPanel::default().show(ctx, |ui| {
            ctx.set_visuals(egui::Visuals::dark());
            self.sim.ui(ui);
        });

        ctx.request_repaint();
    }
}

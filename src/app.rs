use crate::components::chart::show_resource_chart;
use crate::components::controls::show_controls;
use crate::components::settings::{show_settings_window, Settings};
use crate::components::stats_view::show_resource_stats;
use crate::metrics::{Metrics, MetricsError, SysinfoSource, SAMPLE_INTERVAL};

pub const APP_TITLE: &str = "System Resource Monitor";

pub struct ResourceMonitorApp {
    metrics: Metrics,
    settings: Settings,
}

impl ResourceMonitorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, MetricsError> {
        // Load previous settings (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let settings: Settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let ctx = cc.egui_ctx.clone();
        let metrics = Metrics::spawn(
            SysinfoSource::new()?,
            SAMPLE_INTERVAL,
            settings.history_len(),
            settings.monitor_on_launch,
            move || ctx.request_repaint(),
        )?;

        Ok(Self { metrics, settings })
    }
}

impl eframe::App for ResourceMonitorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.settings.apply(ctx);
        self.metrics.set_history_len(self.settings.history_len());

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.add_space(16.0);
                egui::widgets::global_theme_preference_buttons(ui);

                ui.add_space(16.0);
                if ui.button("⚙").clicked() {
                    self.settings.show();
                }
            });
        });

        show_settings_window(ctx, &mut self.settings);

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            show_controls(ui, &self.metrics);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(APP_TITLE);

            let memory_unit = self.settings.memory_unit;
            self.metrics.with_series(|store| {
                show_resource_stats(ui, store, memory_unit);
                show_resource_chart(ui, store);
            });
        });
    }
}

impl Drop for ResourceMonitorApp {
    fn drop(&mut self) {
        self.metrics.shutdown();
    }
}

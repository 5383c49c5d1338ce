use crate::metrics::Metrics;

/// Start/stop buttons and the monitoring status.
pub fn show_controls(ui: &mut egui::Ui, metrics: &Metrics) {
    ui.horizontal(|ui| {
        let monitoring = metrics.is_monitoring();

        if ui
            .add_enabled(!monitoring, egui::Button::new("Start Monitoring"))
            .clicked()
        {
            metrics.start_monitoring();
        }
        if ui
            .add_enabled(monitoring, egui::Button::new("Stop Monitoring"))
            .clicked()
        {
            metrics.stop_monitoring();
        }
        if ui.button("Clear").clicked() {
            metrics.clear();
        }

        ui.add_space(16.0);

        if !metrics.is_sampling() {
            ui.colored_label(ui.visuals().error_fg_color, "Sampler stopped");
        } else if monitoring {
            ui.colored_label(egui::Color32::from_rgb(0, 180, 0), "● Monitoring");
        } else {
            ui.weak("Paused");
        }
    });
}

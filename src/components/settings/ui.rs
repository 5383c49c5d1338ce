use super::state::{MemoryUnit, Settings};

pub fn show_settings_window(ctx: &egui::Context, settings: &mut Settings) {
    if !settings.is_visible() {
        return;
    }

    egui::Window::new("⚙ Settings")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("UI Scale:");
                ui.add(egui::Slider::new(&mut settings.scale, 0.5..=2.0).step_by(0.1));
            });

            ui.horizontal(|ui| {
                ui.label("Font Size:");
                ui.add(egui::Slider::new(&mut settings.font_size, 8.0..=32.0).step_by(1.0));
            });

            ui.horizontal(|ui| {
                ui.label("History:");
                ui.add(
                    egui::Slider::new(&mut settings.history_length, Settings::HISTORY_RANGE)
                        .logarithmic(true)
                        .suffix(" s"),
                );
            });

            ui.horizontal(|ui| {
                ui.label("Memory Unit:");
                egui::ComboBox::from_id_salt("memory_unit")
                    .selected_text(settings.memory_unit.label())
                    .show_ui(ui, |ui| {
                        for unit in MemoryUnit::ALL {
                            ui.selectable_value(&mut settings.memory_unit, unit, unit.label());
                        }
                    });
            });

            ui.checkbox(&mut settings.monitor_on_launch, "Start monitoring on launch");

            ui.separator();

            if ui.button("Close").clicked() {
                settings.hide();
            }
        });
}

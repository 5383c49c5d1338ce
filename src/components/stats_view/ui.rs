use crate::components::settings::MemoryUnit;
use crate::metrics::{SeriesStore, TimeSeries};

pub fn show_resource_stats(ui: &mut egui::Ui, store: &SeriesStore, memory_unit: MemoryUnit) {
    ui.horizontal(|ui| {
        series_stats(ui, &store.cpu);

        ui.add_space(32.0);

        series_stats(ui, &store.memory);

        ui.add_space(32.0);

        ui.vertical(|ui| {
            match store.latest() {
                Some(reading) => {
                    let (used, unit) = memory_unit.format_value(reading.used_memory_bytes as f64);
                    let (total, _) = memory_unit.format_value(reading.total_memory_bytes as f64);
                    ui.label(format!("Memory: {:.1} / {:.1} {}", used, total, unit));
                }
                None => {
                    ui.label("Memory: -");
                }
            }
            ui.label(format!("Samples: {} / {}", store.cpu.len(), store.capacity()));
        });
    });
    ui.add_space(8.0);
}

fn series_stats(ui: &mut egui::Ui, series: &TimeSeries) {
    ui.vertical(|ui| {
        ui.strong(series.name());
        ui.label(format!("Current: {}", percent(series.last().map(|s| s.value))));
        ui.label(format!("Average: {}", percent(series.mean())));
        ui.label(format!("Peak: {}", percent(series.peak())));
    });
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{:.1}%", v))
}

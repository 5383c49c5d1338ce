use std::ops::RangeInclusive;

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, Debug, PartialEq)]
pub enum MemoryUnit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl MemoryUnit {
    pub const ALL: [MemoryUnit; 4] = [
        MemoryUnit::Bytes,
        MemoryUnit::Kilobytes,
        MemoryUnit::Megabytes,
        MemoryUnit::Gigabytes,
    ];

    pub fn format_value(&self, bytes: f64) -> (f64, &'static str) {
        match self {
            MemoryUnit::Bytes => (bytes, "B"),
            MemoryUnit::Kilobytes => (bytes / 1024.0, "KB"),
            MemoryUnit::Megabytes => (bytes / (1024.0 * 1024.0), "MB"),
            MemoryUnit::Gigabytes => (bytes / (1024.0 * 1024.0 * 1024.0), "GB"),
        }
    }

    pub fn label(&self) -> &'static str {
        self.format_value(0.0).1
    }
}

#[derive(serde::Deserialize, serde::Serialize, Debug)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    pub scale: f32,
    pub font_size: f32,
    /// Number of one-second samples kept on the chart.
    pub history_length: usize,
    pub memory_unit: MemoryUnit,
    /// Start sampling as soon as the window opens instead of waiting for "Start".
    pub monitor_on_launch: bool,
    #[serde(skip)]
    show_window: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 1.2,
            font_size: 15.0,
            history_length: 300,
            memory_unit: MemoryUnit::Gigabytes,
            monitor_on_launch: false,
            show_window: false,
        }
    }
}

impl Settings {
    pub const HISTORY_RANGE: RangeInclusive<usize> = 10..=3600;

    pub fn show(&mut self) {
        self.show_window = true;
    }

    pub fn is_visible(&self) -> bool {
        self.show_window
    }

    pub fn hide(&mut self) {
        self.show_window = false;
    }

    /// History length clamped to what the settings window allows.
    pub fn history_len(&self) -> usize {
        self.history_length
            .clamp(*Self::HISTORY_RANGE.start(), *Self::HISTORY_RANGE.end())
    }

    pub fn apply(&self, ctx: &egui::Context) {
        use egui::{FontFamily, FontId, TextStyle};

        ctx.set_pixels_per_point(self.scale);

        let sizes = [
            (TextStyle::Heading, 4.0, FontFamily::Proportional),
            (TextStyle::Body, 0.0, FontFamily::Proportional),
            (TextStyle::Monospace, 0.0, FontFamily::Monospace),
            (TextStyle::Button, 0.0, FontFamily::Proportional),
            (TextStyle::Small, -2.0, FontFamily::Proportional),
        ];

        let mut style = (*ctx.style()).clone();
        style.text_styles = sizes
            .into_iter()
            .map(|(text_style, delta, family)| {
                (text_style, FontId::new(self.font_size + delta, family))
            })
            .collect();
        ctx.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_wait_for_the_start_button() {
        let settings = Settings::default();
        assert!(!settings.monitor_on_launch);
        assert_eq!(settings.history_len(), 300);
        assert!(!settings.is_visible());
    }

    #[test]
    fn history_length_is_clamped() {
        let mut settings = Settings::default();
        settings.history_length = 0;
        assert_eq!(settings.history_len(), 10);
        settings.history_length = 1_000_000;
        assert_eq!(settings.history_len(), 3600);
    }

    #[test]
    fn memory_units_scale_bytes() {
        let eight_gib = 8.0 * 1024.0 * 1024.0 * 1024.0;
        assert_eq!(MemoryUnit::Gigabytes.format_value(eight_gib), (8.0, "GB"));
        assert_eq!(MemoryUnit::Megabytes.format_value(eight_gib), (8192.0, "MB"));
        assert_eq!(MemoryUnit::Kilobytes.label(), "KB");
    }

    #[test]
    fn apply_sizes_text_styles_from_font_size() {
        let ctx = egui::Context::default();
        let settings = Settings {
            font_size: 20.0,
            ..Default::default()
        };
        settings.apply(&ctx);

        let style = ctx.style();
        let size = |text_style: egui::TextStyle| style.text_styles[&text_style].size;
        assert_eq!(size(egui::TextStyle::Heading), 24.0);
        assert_eq!(size(egui::TextStyle::Body), 20.0);
        assert_eq!(size(egui::TextStyle::Small), 18.0);
        assert_eq!(
            style.text_styles[&egui::TextStyle::Monospace].family,
            egui::FontFamily::Monospace
        );
    }

    #[derive(Default)]
    struct MemoryStorage(HashMap<String, String>);

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.0.insert(key.to_owned(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn settings_survive_a_restart_without_the_window_state() {
        let mut storage = MemoryStorage::default();
        let mut settings = Settings {
            scale: 1.5,
            history_length: 600,
            memory_unit: MemoryUnit::Megabytes,
            monitor_on_launch: true,
            ..Default::default()
        };
        settings.show();
        eframe::set_value(&mut storage, eframe::APP_KEY, &settings);

        let restored: Settings = eframe::get_value(&storage, eframe::APP_KEY).unwrap();
        assert_eq!(restored.scale, 1.5);
        assert_eq!(restored.history_length, 600);
        assert_eq!(restored.memory_unit, MemoryUnit::Megabytes);
        assert!(restored.monitor_on_launch);
        assert!(!restored.is_visible());
    }

    #[test]
    fn missing_fields_in_old_state_take_defaults() {
        let mut storage = MemoryStorage::default();
        eframe::Storage::set_string(&mut storage, eframe::APP_KEY, "(scale: 2.0)".to_owned());

        let restored: Settings = eframe::get_value(&storage, eframe::APP_KEY).unwrap();
        let defaults = Settings::default();
        assert_eq!(restored.scale, 2.0);
        assert_eq!(restored.font_size, defaults.font_size);
        assert_eq!(restored.history_length, defaults.history_length);
        assert_eq!(restored.memory_unit, defaults.memory_unit);
        assert!(!restored.monitor_on_launch);
    }
}

use crate::metrics::{SeriesStore, TimeSeries};
use chrono::{DateTime, Local};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, PlotPoints};
use std::ops::RangeInclusive;

/// Percentages always fit on the y axis; it does not auto-fit to the data.
pub const Y_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Line chart of both series over a shared time axis.
pub fn show_resource_chart(ui: &mut egui::Ui, store: &SeriesStore) {
    let plot = Plot::new("resource_chart")
        .legend(Legend::default())
        .x_axis_label("Time")
        .y_axis_label("Value")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            format_time_of_day(mark.value)
        })
        .label_formatter(|name, value: &PlotPoint| {
            let time = format_time_of_day(value.x);
            if name.is_empty() {
                time
            } else {
                format!("{name}\n{time}\n{:.1}%", value.y)
            }
        })
        .include_y(*Y_RANGE.start())
        .include_y(*Y_RANGE.end())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false);

    plot.show(ui, |plot_ui| {
        plot_ui.line(series_line(&store.cpu));
        plot_ui.line(series_line(&store.memory));
    });
}

fn series_line(series: &TimeSeries) -> Line {
    Line::new(PlotPoints::from(series_points(series))).name(series.name())
}

fn series_points(series: &TimeSeries) -> Vec<[f64; 2]> {
    series
        .iter()
        .map(|s| [s.second.as_f64(), s.value])
        .collect()
}

/// Formats unix seconds as local `HH:MM:SS`.
pub fn format_time_of_day(seconds: f64) -> String {
    DateTime::from_timestamp(seconds.floor() as i64, 0)
        .map(|time| time.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

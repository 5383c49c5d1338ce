pub mod chart;
pub mod controls;
pub mod settings;
pub mod stats_view;

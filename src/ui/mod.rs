pub mod dialogs;
pub mod gantt_chart;
pub mod summary_panel;
pub mod theme;
pub mod toolbar;

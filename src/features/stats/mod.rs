pub mod calculator;
pub mod progress;

pub use calculator::{accuracy, first_name, streak, DashboardStats};
pub use progress::{deck_outcomes, ProgressStats, PROGRESS_RANGES};

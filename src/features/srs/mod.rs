pub mod scheduler;

pub use scheduler::{is_due, schedule, Rating, Schedule};

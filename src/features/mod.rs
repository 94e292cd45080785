pub mod errors;
pub mod generation;
pub mod quiz;
pub mod srs;
pub mod stats;

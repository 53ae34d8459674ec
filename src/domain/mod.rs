pub mod detection;
pub mod errors;
pub mod status;
pub mod thresholds;
pub mod user;

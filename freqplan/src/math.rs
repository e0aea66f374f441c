mod haversine;

pub use haversine::{distance, haversine_m};

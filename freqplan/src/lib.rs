//! # Cell Tower Frequency Planning
//!
//! `freqplan` assigns frequencies to cell towers so that towers closer
//! than a distance threshold never share a frequency, while distant
//! towers are paired up to reuse one.
//!
//! A run has two phases:
//!
//! 1. [`build_proximity`] classifies every pair of towers as nearby
//!    or out of range.
//! 2. [`Assigner`] walks the towers in input order, pairing each with
//!    its farthest out-of-range partner.
//!
//! [`plan`] and [`plan_file`] drive both phases from a [`RunConfig`].

mod assign;
pub mod constants;
mod error;
mod math;
mod plan;
mod pool;
mod proximity;
pub mod records;
mod tower;

pub use crate::{
    assign::{assign_frequencies, Assigner, UnresolvedPolicy},
    error::FreqError,
    math::{distance, haversine_m},
    plan::{plan, plan_file, Plan, RunConfig, RunConfigBuilder},
    pool::{Frequency, FrequencyPool, Histogram},
    proximity::build_proximity,
    records::{parse_towers, read_towers},
    tower::{Link, Tower, TowerIdx, TowerSet},
};
pub use geo;

/// Base floating point type used for tower coordinates and distances.
pub type C = f64;

#[cfg(test)]
fn sample_data_path() -> std::path::PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "..", "data", "celltowers.csv"]
        .iter()
        .collect()
}

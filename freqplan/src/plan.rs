use crate::{
    assign::{Assigner, UnresolvedPolicy},
    constants::{DEFAULT_NUM_FREQS, DEFAULT_START_FREQ, DEFAULT_THRESHOLD_M},
    pool::{FrequencyPool, Histogram},
    proximity::build_proximity,
    records::read_towers,
    FreqError, Tower, TowerSet, C,
};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::Path;

/// Everything a run needs besides the towers themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    /// Towers closer than this, in meters, must not share a frequency.
    pub threshold_m: C,

    /// Frequencies available for assignment.
    pub pool: FrequencyPool,

    /// Seed for every random choice the assigner makes.
    pub seed: u64,

    /// What to do with towers that have no conflict-free frequency.
    pub policy: UnresolvedPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threshold_m: DEFAULT_THRESHOLD_M,
            pool: FrequencyPool::range(DEFAULT_START_FREQ, DEFAULT_NUM_FREQS),
            seed: 0,
            policy: UnresolvedPolicy::default(),
        }
    }
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder {
            threshold_m: None,
            pool: None,
            seed: 0,
            policy: UnresolvedPolicy::default(),
        }
    }
}

pub struct RunConfigBuilder {
    /// Proximity threshold (meters, required).
    threshold_m: Option<C>,

    /// Frequency pool (required).
    pool: Option<FrequencyPool>,

    /// Random seed (defaults to 0).
    seed: u64,

    /// Unresolved tower policy (defaults to abort).
    policy: UnresolvedPolicy,
}

impl RunConfigBuilder {
    /// Proximity threshold (meters, required).
    #[must_use]
    pub fn threshold(mut self, meters: C) -> Self {
        self.threshold_m = Some(meters);
        self
    }

    /// Frequency pool (required).
    #[must_use]
    pub fn pool(mut self, pool: FrequencyPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Random seed (defaults to 0).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Unresolved tower policy (defaults to abort).
    #[must_use]
    pub fn policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<RunConfig, FreqError> {
        let threshold_m = self.threshold_m.ok_or(FreqError::Builder("threshold"))?;
        let pool = self.pool.ok_or(FreqError::Builder("pool"))?;
        if !(threshold_m.is_finite() && threshold_m > 0.0) {
            return Err(FreqError::Threshold(threshold_m));
        }
        if pool.is_empty() {
            return Err(FreqError::NoFrequencies);
        }
        Ok(RunConfig {
            threshold_m,
            pool,
            seed: self.seed,
            policy: self.policy,
        })
    }
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Towers in input order, with proximity and frequencies filled in.
    pub towers: TowerSet,

    /// Towers per pool frequency.
    pub histogram: Histogram,
}

/// Builds proximity for `towers` and assigns their frequencies.
///
/// Each call starts from the given records; relations and
/// frequencies already present on them are discarded.
pub fn plan(towers: Vec<Tower>, config: &RunConfig) -> Result<Plan, FreqError> {
    if towers.is_empty() {
        return Err(FreqError::NoTowers);
    }
    if config.pool.is_empty() {
        return Err(FreqError::NoFrequencies);
    }
    if !(config.threshold_m.is_finite() && config.threshold_m > 0.0) {
        return Err(FreqError::Threshold(config.threshold_m));
    }

    let mut towers = TowerSet::new(towers);
    towers.reset();

    build_proximity(&mut towers, config.threshold_m);

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let histogram = Assigner::new(&config.pool)
        .policy(config.policy)
        .run(&mut towers, &mut rng)?;

    info!(
        "planned {} towers; frequencies used: {}/{}, unassigned: {}, seed: {}",
        towers.len(),
        histogram.used(),
        config.pool.len(),
        towers.len() - towers.assigned(),
        config.seed
    );

    Ok(Plan { towers, histogram })
}

/// Reads towers from `path` and plans them.
pub fn plan_file(path: impl AsRef<Path>, config: &RunConfig) -> Result<Plan, FreqError> {
    plan(read_towers(path)?, config)
}

#[cfg(test)]
mod tests {
    use super::{plan, plan_file, RunConfig};
    use crate::{FreqError, FrequencyPool, Tower, UnresolvedPolicy};

    #[test]
    fn test_builder() {
        let config = RunConfig::builder()
            .threshold(500.0)
            .pool(FrequencyPool::range(110, 6))
            .build()
            .unwrap();
        assert_eq!(config, RunConfig::default());

        assert!(matches!(
            RunConfig::builder().pool(FrequencyPool::range(110, 6)).build(),
            Err(FreqError::Builder("threshold"))
        ));
        assert!(matches!(
            RunConfig::builder().threshold(500.0).build(),
            Err(FreqError::Builder("pool"))
        ));
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let res = RunConfig::builder()
                .threshold(bad)
                .pool(FrequencyPool::range(110, 6))
                .build();
            assert!(matches!(res, Err(FreqError::Threshold(_))));
        }
        let res = RunConfig::builder()
            .threshold(500.0)
            .pool(FrequencyPool::default())
            .build();
        assert!(matches!(res, Err(FreqError::NoFrequencies)));
    }

    #[test]
    fn test_empty_input() {
        let res = plan(Vec::new(), &RunConfig::default());
        assert!(matches!(res, Err(FreqError::NoTowers)));
        assert!(res.unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_sample_file() {
        let config = RunConfig {
            seed: 1,
            ..RunConfig::default()
        };
        let plan = plan_file(crate::sample_data_path(), &config).unwrap();
        assert_eq!(plan.towers.len(), 19);
        assert_eq!(plan.towers.assigned(), 19);
        assert_eq!(plan.histogram.total(), 19);
        for tower in &plan.towers {
            for link in tower.nearby() {
                assert_ne!(tower.frequency, plan.towers[link.tower].frequency);
            }
        }
    }

    #[test]
    fn test_rerun_is_reproducible() {
        let config = RunConfig {
            seed: 99,
            policy: UnresolvedPolicy::Skip,
            ..RunConfig::default()
        };
        let first = plan_file(crate::sample_data_path(), &config).unwrap();
        let second = plan_file(crate::sample_data_path(), &config).unwrap();
        assert_eq!(first, second);

        // Feeding planned towers back in starts from scratch.
        let towers: Vec<Tower> = first.towers.iter().cloned().collect();
        let third = plan(towers, &config).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn test_threshold_changes_graph() {
        let near = |threshold_m| {
            let config = RunConfig {
                threshold_m,
                pool: FrequencyPool::range(1, 19),
                ..RunConfig::default()
            };
            let plan = plan_file(crate::sample_data_path(), &config).unwrap();
            plan.towers.iter().map(|t| t.nearby().len()).sum::<usize>()
        };
        assert!(near(200.0) < near(500.0));
        assert_eq!(near(100_000.0), 19 * 18);
    }
}

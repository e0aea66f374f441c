//! Greedy frequency assignment.
//!
//! Towers are visited in input order. Each unassigned tower is paired
//! with its farthest out-of-range tower and, where its nearby towers
//! allow it, the two share a frequency. Whatever the pairing pass
//! cannot place is handled by a final sweep that gives each remaining
//! tower the least used frequency free of conflicts.

use crate::{
    pool::{Frequency, FrequencyPool, Histogram},
    tower::{TowerIdx, TowerSet},
    FreqError,
};
use log::{debug, trace, warn};
use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use std::{fmt, str::FromStr};

/// What to do with a tower whose nearby towers already hold every
/// frequency in the pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum UnresolvedPolicy {
    /// Fail the run with [`FreqError::Unsatisfiable`].
    #[default]
    Abort,

    /// Leave the tower unassigned and keep going.
    Skip,
}

impl FromStr for UnresolvedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown policy '{other}', expected 'abort' or 'skip'")),
        }
    }
}

impl fmt::Display for UnresolvedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Assigns a frequency from `pool` to every tower in `towers`,
/// aborting if some tower cannot be given one.
///
/// Proximity must already be built (see
/// [`build_proximity`](crate::build_proximity)).
pub fn assign_frequencies<R>(
    towers: &mut TowerSet,
    pool: &FrequencyPool,
    rng: &mut R,
) -> Result<Histogram, FreqError>
where
    R: Rng + ?Sized,
{
    Assigner::new(pool).run(towers, rng)
}

pub struct Assigner<'a> {
    pool: &'a FrequencyPool,
    policy: UnresolvedPolicy,
}

impl<'a> Assigner<'a> {
    pub fn new(pool: &'a FrequencyPool) -> Self {
        Self {
            pool,
            policy: UnresolvedPolicy::default(),
        }
    }

    /// Policy for towers with no conflict-free frequency (defaults to
    /// [`UnresolvedPolicy::Abort`]).
    #[must_use]
    pub fn policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Assigns frequencies in place and returns the per-frequency
    /// usage counts.
    ///
    /// Towers which already have a frequency are left alone and
    /// counted in the returned histogram; the rest are assigned around
    /// them. Fails with [`FreqError::OutsidePool`] if a preassigned
    /// frequency is not in the pool.
    pub fn run<R>(&self, towers: &mut TowerSet, rng: &mut R) -> Result<Histogram, FreqError>
    where
        R: Rng + ?Sized,
    {
        if towers.is_empty() {
            return Err(FreqError::NoTowers);
        }
        if self.pool.is_empty() {
            return Err(FreqError::NoFrequencies);
        }

        let now = std::time::Instant::now();
        let mut histogram = Histogram::new(self.pool);
        for tower in towers.iter() {
            match tower.frequency {
                Some(freq) if self.pool.contains(freq) => histogram.increment(freq),
                Some(freq) => return Err(FreqError::OutsidePool(tower.id.clone(), freq)),
                None => (),
            }
        }
        let preassigned = histogram.total();

        for i in 0..towers.len() {
            self.pair(towers, TowerIdx(i), &mut histogram, rng);
        }
        let paired = histogram.total() - preassigned;

        self.sweep(towers, &mut histogram, rng)?;

        debug!(
            "assign; towers: {}, preassigned: {}, paired: {}, swept: {}, unassigned: {}, exec: {:?}",
            towers.len(),
            preassigned,
            paired,
            histogram.total() - paired - preassigned,
            towers.len() - histogram.total(),
            now.elapsed()
        );
        Ok(histogram)
    }
}

impl Assigner<'_> {
    /// Tries to give `idx` a frequency shared with its farthest
    /// out-of-range tower.
    fn pair<R>(&self, towers: &mut TowerSet, idx: TowerIdx, histogram: &mut Histogram, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let tower = &towers[idx];
        if tower.frequency.is_some() {
            return;
        }
        trace!(
            "{}: nearby {:?}, out of range {:?}",
            tower.id,
            tower.nearby().iter().map(|l| l.tower.0).collect::<Vec<_>>(),
            tower.out_of_range().iter().map(|l| l.tower.0).collect::<Vec<_>>()
        );
        let Some(farthest) = tower.farthest() else {
            debug!("{}: no out of range towers, deferring", tower.id);
            return;
        };
        let partner = farthest.tower;

        // Nothing is placed yet, so any frequency works for both.
        if idx.0 == 0 && towers.assigned() == 0 {
            if let Some(&freq) = self.pool.as_slice().choose(rng) {
                set(towers, histogram, idx, freq);
                set(towers, histogram, partner, freq);
            }
            return;
        }

        let free = self.free(towers, idx);
        match towers[partner].frequency {
            Some(freq) if free.contains(&freq) => set(towers, histogram, idx, freq),
            Some(_) => {
                if let Some(&freq) = free.choose(rng) {
                    set(towers, histogram, idx, freq);
                }
            }
            None => {
                let shared: Vec<Frequency> = free
                    .iter()
                    .copied()
                    .filter(|&freq| !towers.conflicts(partner, freq))
                    .collect();
                if let Some(&freq) = shared.choose(rng) {
                    set(towers, histogram, idx, freq);
                    set(towers, histogram, partner, freq);
                } else if let Some(&freq) = free.choose(rng) {
                    set(towers, histogram, idx, freq);
                }
            }
        }

        match towers[idx].frequency {
            Some(freq) => debug!(
                "{}: {} (farthest {} at {} m: {:?})",
                towers[idx].id,
                freq,
                towers[partner].id,
                farthest.distance_m,
                towers[partner].frequency
            ),
            None => debug!("{}: every frequency conflicts, deferring", towers[idx].id),
        }
    }

    /// Gives each still unassigned tower the least used conflict-free
    /// frequency, breaking ties at random.
    fn sweep<R>(
        &self,
        towers: &mut TowerSet,
        histogram: &mut Histogram,
        rng: &mut R,
    ) -> Result<(), FreqError>
    where
        R: Rng + ?Sized,
    {
        for i in 0..towers.len() {
            let idx = TowerIdx(i);
            if towers[idx].frequency.is_some() {
                continue;
            }

            let free = self.free(towers, idx);
            let Some(least) = free.iter().map(|&freq| histogram.count(freq)).min() else {
                match self.policy {
                    UnresolvedPolicy::Abort => {
                        return Err(FreqError::Unsatisfiable(towers[idx].id.clone()))
                    }
                    UnresolvedPolicy::Skip => {
                        warn!(
                            "{}: nearby towers hold every frequency, leaving unassigned",
                            towers[idx].id
                        );
                        continue;
                    }
                }
            };

            let candidates: Vec<Frequency> = free
                .into_iter()
                .filter(|&freq| histogram.count(freq) == least)
                .collect();
            if let Some(&freq) = candidates.choose(rng) {
                debug!("{}: {} (sweep)", towers[idx].id, freq);
                set(towers, histogram, idx, freq);
            }
        }
        Ok(())
    }

    /// Pool frequencies not held by any of `idx`'s nearby towers.
    fn free(&self, towers: &TowerSet, idx: TowerIdx) -> Vec<Frequency> {
        self.pool
            .as_slice()
            .iter()
            .copied()
            .filter(|&freq| !towers.conflicts(idx, freq))
            .collect()
    }
}

fn set(towers: &mut TowerSet, histogram: &mut Histogram, idx: TowerIdx, freq: Frequency) {
    towers[idx].frequency = Some(freq);
    histogram.increment(freq);
}

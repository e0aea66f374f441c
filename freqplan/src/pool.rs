use crate::FreqError;
use serde::Serialize;
use std::{fmt, str::FromStr};

/// A radio frequency label.
pub type Frequency = i32;

/// Ordered, duplicate-free set of assignable frequencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyPool(Vec<Frequency>);

impl FrequencyPool {
    pub fn new(frequencies: Vec<Frequency>) -> Result<Self, FreqError> {
        for (i, freq) in frequencies.iter().enumerate() {
            if frequencies[..i].contains(freq) {
                return Err(FreqError::DuplicateFrequency(*freq));
            }
        }
        Ok(Self(frequencies))
    }

    /// Returns `len` consecutive frequencies starting at `start`.
    pub fn range(start: Frequency, len: usize) -> Self {
        Self((start..).take(len).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Frequency] {
        &self.0
    }

    pub fn contains(&self, freq: Frequency) -> bool {
        self.0.contains(&freq)
    }
}

/// Parses a comma separated list, e.g. `"110,111,112"`.
impl FromStr for FrequencyPool {
    type Err = FreqError;

    fn from_str(s: &str) -> Result<Self, FreqError> {
        let frequencies = s
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| {
                f.parse::<Frequency>()
                    .map_err(|_| FreqError::Frequency(f.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(frequencies)
    }
}

impl fmt::Display for FrequencyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, freq) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{freq}")?;
        }
        Ok(())
    }
}

/// Number of towers assigned each frequency, in pool order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    counts: Vec<(Frequency, usize)>,
}

impl Histogram {
    pub fn new(pool: &FrequencyPool) -> Self {
        Self {
            counts: pool.as_slice().iter().map(|&freq| (freq, 0)).collect(),
        }
    }

    /// Counts one more tower on `freq`. Frequencies outside the pool
    /// are ignored.
    pub fn increment(&mut self, freq: Frequency) {
        if let Some((_, count)) = self.counts.iter_mut().find(|(f, _)| *f == freq) {
            *count += 1;
        }
    }

    pub fn count(&self, freq: Frequency) -> usize {
        self.counts
            .iter()
            .find(|(f, _)| *f == freq)
            .map_or(0, |(_, count)| *count)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Number of pool frequencies used by at least one tower.
    pub fn used(&self) -> usize {
        self.counts.iter().filter(|(_, count)| *count > 0).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Frequency, usize)> + '_ {
        self.counts.iter().copied()
    }
}

use crate::{pool::Frequency, C};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreqError {
    #[error("no towers to assign")]
    NoTowers,

    #[error("no frequencies available")]
    NoFrequencies,

    #[error("frequency {0} appears more than once in the pool")]
    DuplicateFrequency(Frequency),

    #[error("distance threshold must be a positive number of meters, got {0}")]
    Threshold(C),

    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("no conflict-free frequency for tower '{0}'")]
    Unsatisfiable(String),

    #[error("tower '{0}' already holds frequency {1}, which is not in the pool")]
    OutsidePool(String, Frequency),

    #[error("tower '{0}' appears more than once")]
    DuplicateTower(String),

    #[error("line {line}: expected 5 columns, found {found}")]
    Columns { line: usize, found: usize },

    #[error("line {line}: invalid number '{value}'")]
    Number {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("line {line}: {axis} {value} is outside [-{limit}, {limit}]")]
    Coordinate {
        line: usize,
        axis: &'static str,
        value: C,
        limit: C,
    },

    #[error("invalid frequency '{0}'")]
    Frequency(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FreqError {
    /// Returns `true` for errors caused by unusable inputs, as opposed
    /// to a tower that could not be given a frequency.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::Unsatisfiable(_) | Self::Io(_) | Self::Read { .. })
    }
}

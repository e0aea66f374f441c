//! Tower records in delimited text form.
//!
//! The first line is a header and is not interpreted. Every following
//! non-blank line holds one tower:
//!
//! ```text
//! id,easting,northing,longitude,latitude
//! ```

use crate::{FreqError, Tower, C};
use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

const COLUMNS: usize = 5;

/// Reads all tower records from the file at `path`.
pub fn read_towers(path: impl AsRef<Path>) -> Result<Vec<Tower>, FreqError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FreqError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_towers(BufReader::new(file))
}

/// Parses tower records from `rdr`.
pub fn parse_towers(rdr: impl BufRead) -> Result<Vec<Tower>, FreqError> {
    let mut towers = Vec::new();
    let mut ids = HashSet::new();

    for (idx, line) in rdr.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let tower = parse_record(idx + 1, &line)?;
        if !ids.insert(tower.id.clone()) {
            return Err(FreqError::DuplicateTower(tower.id));
        }
        towers.push(tower);
    }

    if towers.is_empty() {
        return Err(FreqError::NoTowers);
    }
    Ok(towers)
}

fn parse_record(line: usize, record: &str) -> Result<Tower, FreqError> {
    let fields: Vec<&str> = record.split(',').map(str::trim).collect();
    if fields.len() != COLUMNS {
        return Err(FreqError::Columns {
            line,
            found: fields.len(),
        });
    }
    let number = |value: &str| -> Result<C, FreqError> {
        value.parse::<C>().map_err(|source| FreqError::Number {
            line,
            value: value.to_string(),
            source,
        })
    };
    let longitude = coordinate(line, "longitude", number(fields[3])?, 180.0)?;
    let latitude = coordinate(line, "latitude", number(fields[4])?, 90.0)?;
    Ok(Tower::new(
        fields[0],
        number(fields[1])?,
        number(fields[2])?,
        longitude,
        latitude,
    ))
}

/// Rejects NaN, infinities and values beyond `limit` degrees.
fn coordinate(line: usize, axis: &'static str, value: C, limit: C) -> Result<C, FreqError> {
    if value.is_finite() && value.abs() <= limit {
        Ok(value)
    } else {
        Err(FreqError::Coordinate {
            line,
            axis,
            value,
            limit,
        })
    }
}

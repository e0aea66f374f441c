use crate::{pool::Frequency, C};

/// Approximate radius of the earth in kilometers.
pub const EARTH_RADIUS_KM: f32 = 6371.0;

/// Number of decimal places distances are rounded to before
/// classification.
pub const DISTANCE_DECIMALS: i32 = 4;

/// Towers closer than this are considered nearby, in meters.
pub const DEFAULT_THRESHOLD_M: C = 500.0;

/// First frequency of the default pool.
pub const DEFAULT_START_FREQ: Frequency = 110;

/// Size of the default pool.
pub const DEFAULT_NUM_FREQS: usize = 6;

/// How an unassigned frequency is rendered in tabular output.
pub const UNASSIGNED: Frequency = -1;

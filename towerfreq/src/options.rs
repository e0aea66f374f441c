use clap::{Parser, Subcommand};
use freqplan::{
    constants::{DEFAULT_NUM_FREQS, DEFAULT_START_FREQ, DEFAULT_THRESHOLD_M},
    Frequency, FrequencyPool, UnresolvedPolicy,
};
use std::path::PathBuf;

/// Assign frequencies to cell towers so that nearby towers never share
/// one.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Tower records, one "id,easting,northing,longitude,latitude" per
    /// line after a header line.
    #[arg(default_value = "./data/celltowers.csv")]
    pub towers: PathBuf,

    /// Towers closer than this, in meters, must not share a frequency.
    #[arg(short = 'd', long, default_value_t = DEFAULT_THRESHOLD_M)]
    pub threshold: f64,

    /// First frequency of the pool.
    #[arg(long, default_value_t = DEFAULT_START_FREQ)]
    pub start_freq: Frequency,

    /// Number of consecutive frequencies in the pool.
    #[arg(short, long, default_value_t = DEFAULT_NUM_FREQS)]
    pub num_freqs: usize,

    /// Explicit "f1,f2,..." pool; overrides --start-freq and
    /// --num-freqs.
    #[arg(short, long)]
    pub frequencies: Option<FrequencyPool>,

    /// Seed for random choices. A random seed is picked, and logged,
    /// when absent.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// What to do with a tower whose nearby towers use up the whole
    /// pool: "abort" or "skip".
    #[arg(short, long, default_value_t = UnresolvedPolicy::Abort)]
    pub unresolved: UnresolvedPolicy,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the effective configuration.
    Config,

    /// Print tower records as read from the input file.
    Towers,

    /// Print assigned frequencies and usage as a table.
    Table,

    /// Print assigned frequencies as CSV.
    Csv,

    /// Print assigned frequencies and usage as JSON.
    Json,

    /// Plot frequency usage to terminal.
    Plot,
}

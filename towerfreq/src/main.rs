mod options;
mod report;

use anyhow::Error as AnyError;
use clap::Parser;
use freqplan::{plan_file, read_towers, FreqError, FrequencyPool, RunConfig};
use log::info;
use options::{Cli, Command as CliCmd};
use std::process::ExitCode;

/// Exit status for bad input data or configuration.
const EXIT_INVALID_INPUT: u8 = 2;
/// Exit status for everything else, including unsatisfiable runs.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_status(&e))
        }
    }
}

fn exit_status(err: &AnyError) -> u8 {
    match err.downcast_ref::<FreqError>() {
        Some(e) if e.is_invalid_input() => EXIT_INVALID_INPUT,
        _ => EXIT_FAILURE,
    }
}

fn run(cli: Cli) -> Result<(), AnyError> {
    let Cli {
        towers,
        threshold,
        start_freq,
        num_freqs,
        frequencies,
        seed,
        unresolved,
        cmd,
    } = cli;

    let seed = seed.unwrap_or_else(rand::random);
    info!("seed: {seed}");

    let config = RunConfig::builder()
        .threshold(threshold)
        .pool(frequencies.unwrap_or_else(|| FrequencyPool::range(start_freq, num_freqs)))
        .seed(seed)
        .policy(unresolved)
        .build()?;

    match cmd {
        CliCmd::Config => report::print_config(&towers, &config)?,
        CliCmd::Towers => report::print_towers(&read_towers(&towers)?)?,
        CliCmd::Table => report::print_table(&plan_file(&towers, &config)?)?,
        CliCmd::Csv => report::print_csv(&plan_file(&towers, &config)?)?,
        CliCmd::Json => report::print_json(&plan_file(&towers, &config)?, &config)?,
        CliCmd::Plot => report::plot_histogram(&plan_file(&towers, &config)?),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{exit_status, run, EXIT_FAILURE, EXIT_INVALID_INPUT};
    use crate::options::Cli;
    use anyhow::Error as AnyError;
    use clap::Parser;
    use freqplan::FreqError;
    use std::io;

    #[test]
    fn test_exit_status() {
        let invalid = AnyError::from(FreqError::NoTowers);
        assert_eq!(exit_status(&invalid), EXIT_INVALID_INPUT);

        let threshold = AnyError::from(FreqError::Threshold(-1.0));
        assert_eq!(exit_status(&threshold), EXIT_INVALID_INPUT);

        let unsat = AnyError::from(FreqError::Unsatisfiable("A".into()));
        assert_eq!(exit_status(&unsat), EXIT_FAILURE);

        let io = AnyError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(exit_status(&io), EXIT_FAILURE);
    }

    #[test]
    fn test_tower_file_is_positional() {
        let cli = Cli::try_parse_from(["towerfreq", "towers.csv", "config"]).unwrap();
        assert_eq!(cli.towers, std::path::PathBuf::from("towers.csv"));

        let cli = Cli::try_parse_from(["towerfreq", "config"]).unwrap();
        assert_eq!(cli.towers, std::path::PathBuf::from("./data/celltowers.csv"));
    }

    #[test]
    fn test_bad_threshold_is_invalid_input() {
        let cli = Cli::try_parse_from(["towerfreq", "-d", "0", "config"]).unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(exit_status(&err), EXIT_INVALID_INPUT);
    }
}

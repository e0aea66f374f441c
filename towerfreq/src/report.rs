use anyhow::Error as AnyError;
use freqplan::{constants::UNASSIGNED, Frequency, Histogram, Plan, RunConfig, Tower};
use serde::Serialize;
use std::{io::Write, path::Path};
use textplots::{Chart, Plot, Shape};

const RULE: usize = 72;

pub fn print_config(towers: &Path, config: &RunConfig) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", "-".repeat(RULE))?;
    writeln!(stdout, "{:<28}{}", "File Path", towers.display())?;
    writeln!(stdout, "{:<28}{} m", "Distance Threshold", config.threshold_m)?;
    writeln!(stdout, "{:<28}{}", "Frequency Range", config.pool)?;
    writeln!(stdout, "{:<28}{}", "Number of Frequencies", config.pool.len())?;
    writeln!(stdout, "{:<28}{}", "Seed", config.seed)?;
    writeln!(stdout, "{:<28}{}", "Unresolved Towers", config.policy)?;
    writeln!(stdout, "{}", "-".repeat(RULE))?;
    Ok(())
}

pub fn print_towers(towers: &[Tower]) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "{:<10}{:>12}{:>12}{:>14}{:>14}",
        "ID", "Easting", "Northing", "Longitude", "Latitude"
    )?;
    writeln!(stdout, "{}", "-".repeat(62))?;
    for tower in towers {
        writeln!(
            stdout,
            "{:<10}{:>12}{:>12}{:>14.5}{:>14.5}",
            tower.id,
            tower.easting,
            tower.northing,
            tower.longitude(),
            tower.latitude()
        )?;
    }
    Ok(())
}

pub fn print_table(plan: &Plan) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "{:<10}{:>14}{:>14}{:>11}{:>8}  {}",
        "ID", "Longitude", "Latitude", "Frequency", "Nearby", "Farthest"
    )?;
    writeln!(stdout, "{}", "-".repeat(RULE))?;
    for tower in &plan.towers {
        let farthest = tower
            .farthest()
            .and_then(|link| plan.towers.get(link.tower))
            .map_or("-", |t| t.id.as_str());
        writeln!(
            stdout,
            "{:<10}{:>14.5}{:>14.5}{:>11}{:>8}  {}",
            tower.id,
            tower.longitude(),
            tower.latitude(),
            tower.frequency.unwrap_or(UNASSIGNED),
            tower.nearby().len(),
            farthest
        )?;
    }

    writeln!(stdout)?;
    writeln!(stdout, "{:<10}{:>8}", "Frequency", "Towers")?;
    writeln!(stdout, "{}", "-".repeat(18))?;
    for (freq, count) in plan.histogram.iter() {
        writeln!(stdout, "{freq:<10}{count:>8}")?;
    }
    let unassigned = plan.towers.len() - plan.towers.assigned();
    if unassigned > 0 {
        writeln!(stdout, "{UNASSIGNED:<10}{unassigned:>8}")?;
    }
    Ok(())
}

pub fn print_csv(plan: &Plan) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "id,easting,northing,longitude,latitude,frequency")?;
    for tower in &plan.towers {
        writeln!(
            stdout,
            "{},{},{},{},{},{}",
            tower.id,
            tower.easting,
            tower.northing,
            tower.longitude(),
            tower.latitude(),
            tower.frequency.unwrap_or(UNASSIGNED)
        )?;
    }
    Ok(())
}

pub fn print_json(plan: &Plan, config: &RunConfig) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonTower<'a> {
        id: &'a str,
        location: [f64; 2],
        easting: f64,
        northing: f64,
        frequency: Option<Frequency>,
        nearby: Vec<&'a str>,
    }

    #[derive(Serialize)]
    struct JsonPlan<'a> {
        config: &'a RunConfig,
        towers: Vec<JsonTower<'a>>,
        histogram: &'a Histogram,
    }

    let towers = plan
        .towers
        .iter()
        .map(|tower| JsonTower {
            id: &tower.id,
            location: [tower.longitude(), tower.latitude()],
            easting: tower.easting,
            northing: tower.northing,
            frequency: tower.frequency,
            nearby: tower
                .nearby()
                .iter()
                .filter_map(|link| plan.towers.get(link.tower))
                .map(|t| t.id.as_str())
                .collect(),
        })
        .collect();
    let json = serde_json::to_string(&JsonPlan {
        config,
        towers,
        histogram: &plan.histogram,
    })?;
    println!("{json}");
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
pub fn plot_histogram(plan: &Plan) {
    let bars: Vec<(f32, f32)> = plan
        .histogram
        .iter()
        .map(|(freq, count)| (freq as f32, count as f32))
        .collect();
    let (min, max) = bars
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), (x, _)| (lo.min(*x), hi.max(*x)));
    Chart::new(160, 60, min - 1.0, max + 1.0)
        .lineplot(&Shape::Bars(&bars))
        .display();
    for (freq, count) in plan.histogram.iter() {
        println!("{freq}: {count}");
    }
}

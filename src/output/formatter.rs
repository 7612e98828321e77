use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::standings::{ConstructorRaceStandings, RaceStandings};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0)
}

/// Format driver standings after a race, one driver per line
/// Columns: position, driver, points. Leader highlighted when colors are on.
pub fn format_driver_table(race: &str, standings: &RaceStandings, use_colors: bool) -> String {
    if standings.is_empty() {
        return format!("No drivers classified after {}.", race);
    }

    let width = name_width(standings.keys());
    let header = if use_colors {
        format!("Drivers after {}", race.bold())
    } else {
        format!("Drivers after {}", race)
    };

    let rows = standings.iter().enumerate().map(|(idx, (driver, points))| {
        let index_str = format!("{:>2}.", idx + 1);
        let name = format!("{:<width$}", driver, width = width);
        let points_str = format!("{:>4}", points);
        if use_colors {
            let name = if idx == 0 {
                name.yellow().bold().to_string()
            } else {
                name
            };
            format!("{} {}  {}", index_str.dimmed(), name, points_str.bold())
        } else {
            format!("{} {}  {}", index_str, name, points_str)
        }
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format constructor standings after a race
/// Columns: position, constructor, normalised points, raw points, driver count
pub fn format_constructor_table(
    race: &str,
    standings: &ConstructorRaceStandings,
    use_colors: bool,
) -> String {
    if standings.is_empty() {
        return format!("No constructors classified after {}.", race);
    }

    let width = name_width(standings.keys());
    let header = if use_colors {
        format!("Constructors after {}", race.bold())
    } else {
        format!("Constructors after {}", race)
    };

    let rows = standings.iter().enumerate().map(|(idx, (car, team))| {
        let index_str = format!("{:>2}.", idx + 1);
        let name = format!("{:<width$}", car, width = width);
        let normalised = format!("{:>4}", team.normalised_points);
        let detail = format!("({} raw, {} drivers)", team.points, team.driver_count);
        if use_colors {
            format!(
                "{} {}  {}  {}",
                index_str.dimmed(),
                name.cyan(),
                normalised.bold(),
                detail.dimmed()
            )
        } else {
            format!("{} {}  {}  {}", index_str, name, normalised, detail)
        }
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format driver standings as tab-separated values for scripting
/// Columns: position, driver, points (no headers, no colors)
pub fn format_driver_tsv(standings: &RaceStandings) -> String {
    standings
        .iter()
        .enumerate()
        .map(|(idx, (driver, points))| format!("{}\t{}\t{}", idx + 1, driver, points))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format constructor standings as tab-separated values
/// Columns: position, constructor, normalised points, points, driver count
pub fn format_constructor_tsv(standings: &ConstructorRaceStandings) -> String {
    standings
        .iter()
        .enumerate()
        .map(|(idx, (car, team))| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                idx + 1,
                car,
                team.normalised_points,
                team.points,
                team.driver_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

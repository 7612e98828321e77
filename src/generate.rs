use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

use crate::config::Config;
use crate::fixtures::{DataLayout, DataProvider};
use crate::standings::{
    calculate_driver_standings, constructors_from_driver_standings, ConstructorStandings,
    DriverStandings, Rules, StandingsError,
};
use crate::writer::save_artifact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Standings,
    Constructors,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Standings => write!(f, "standings"),
            ArtifactKind::Constructors => write!(f, "constructors"),
        }
    }
}

/// Result of writing one artifact.
#[derive(Debug)]
pub struct ArtifactOutcome {
    pub season: String,
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub result: Result<()>,
}

/// Per-artifact outcomes of a generation run, in the order they were written.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<ArtifactOutcome>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn saved(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }
}

/// Both computed standings for one season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonArtifacts {
    pub standings: DriverStandings,
    pub constructors: ConstructorStandings,
}

/// Compute a season's driver standings from its results, then constructor
/// standings from those driver standings. Nothing is written.
pub fn compute_season<P: DataProvider + ?Sized>(
    provider: &P,
    season: &str,
    rules: &Rules,
) -> Result<SeasonArtifacts, StandingsError> {
    let standings = calculate_driver_standings(provider, season, rules)?;
    let constructors = constructors_from_driver_standings(provider, season, &standings, rules)?;
    Ok(SeasonArtifacts {
        standings,
        constructors,
    })
}

fn write_outcome<T: serde::Serialize>(
    season: &str,
    kind: ArtifactKind,
    path: PathBuf,
    value: &T,
) -> ArtifactOutcome {
    let result = save_artifact(&path, value);
    match &result {
        Ok(()) => info!("{} {} data saved to {}", season, kind, path.display()),
        Err(e) => error!("Error writing {} {} data: {:#}", season, kind, e),
    }
    ArtifactOutcome {
        season: season.to_string(),
        kind,
        path,
        result,
    }
}

/// Regenerate the artifacts of every season flagged `generate`.
///
/// Fixture or data-integrity errors abort the run. Write failures are
/// recorded in the report and the remaining artifacts are still written.
pub fn run<P: DataProvider + ?Sized>(
    config: &Config,
    provider: &P,
    layout: &DataLayout,
) -> Result<GenerationReport> {
    let rules = config.rules();
    let mut report = GenerationReport::default();

    for season in config.generated_seasons() {
        let season = season.id.as_str();
        let artifacts = compute_season(provider, season, &rules)
            .with_context(|| format!("Failed to compute standings for season {}", season))?;

        report.outcomes.push(write_outcome(
            season,
            ArtifactKind::Standings,
            layout.standings(season),
            &artifacts.standings,
        ));
        report.outcomes.push(write_outcome(
            season,
            ArtifactKind::Constructors,
            layout.constructors(season),
            &artifacts.constructors,
        ));
    }

    Ok(report)
}

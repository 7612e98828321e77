pub mod constructors;
pub mod drivers;
pub mod error;

pub use constructors::{
    calculate_constructor_standings, constructors_from_driver_standings, normalise,
};
pub use drivers::{accumulate_race, calculate_driver_standings, race_points};
pub use error::StandingsError;

use serde::{Deserialize, Serialize};

use crate::fixtures::OrderedMap;

/// Driver id -> cumulative points after one race, sorted descending.
pub type RaceStandings = OrderedMap<u32>;

/// Race id -> driver standings after that race. `None` marks a race that did not run.
pub type DriverStandings = OrderedMap<Option<RaceStandings>>;

/// A constructor's cumulative totals after one race.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConstructorResult {
    pub points: u32,
    #[serde(rename = "normalisedPoints")]
    pub normalised_points: u32,
    /// Drivers counted for this race only; never accumulated.
    #[serde(rename = "driverCount")]
    pub driver_count: u32,
}

/// Constructor -> totals after one race, sorted descending by normalised points.
pub type ConstructorRaceStandings = OrderedMap<ConstructorResult>;

/// Race id -> constructor standings after that race.
pub type ConstructorStandings = OrderedMap<Option<ConstructorRaceStandings>>;

/// Scoring constants shared by both calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Bonus for the fastest lap, awarded on scoring races
    pub fastest_lap_bonus: u32,
    /// Team size that constructor points are normalised to
    pub standard_driver_count: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            fastest_lap_bonus: 1,
            standard_driver_count: 2,
        }
    }
}

/// Most recent race that ran, or the named race if given.
///
/// Returns `None` when the named race is unknown or did not run, or when no
/// race has run yet.
pub fn select_race<'a, T>(
    standings: &'a OrderedMap<Option<T>>,
    race: Option<&str>,
) -> Option<(&'a str, &'a T)> {
    match race {
        Some(name) => standings
            .iter()
            .find(|(id, _)| *id == name)
            .and_then(|(id, row)| row.as_ref().map(|r| (id, r))),
        None => standings
            .iter()
            .filter_map(|(id, row)| row.as_ref().map(|r| (id, r)))
            .last(),
    }
}

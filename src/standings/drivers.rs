use tracing::debug;

use super::{DriverStandings, RaceStandings, Rules, StandingsError};
use crate::fixtures::{DataProvider, PointsScheme, RaceResult, Track};

/// Points each classified driver scores in a single race.
///
/// Entries keep finishing order. On a `noPoints` track every driver scores
/// zero, fastest lap included.
pub fn race_points(
    result: &RaceResult,
    track: &Track,
    scheme: &PointsScheme,
    rules: &Rules,
) -> RaceStandings {
    let fastest_lap = result.fastest_lap_driver();

    result
        .finishing_order()
        .map(|(position, driver)| {
            let points = if track.no_points {
                0
            } else {
                let bonus = if fastest_lap == Some(driver) {
                    rules.fastest_lap_bonus
                } else {
                    0
                };
                scheme.points_for(position) + bonus
            };
            (driver.to_string(), points)
        })
        .collect()
}

/// Fold one race's points onto the previous cumulative row.
///
/// Only drivers classified in `race` appear in the output; a driver missing
/// from this race is dropped from this row even if they scored earlier.
/// The result is sorted by total, descending, ties in finishing order.
pub fn accumulate_race(previous: Option<&RaceStandings>, race: RaceStandings) -> RaceStandings {
    let mut cumulative: RaceStandings = race
        .into_iter()
        .map(|(driver, points)| {
            let carried = previous.map_or(0, |prev| prev.get_or_default(&driver));
            (driver, points + carried)
        })
        .collect();

    cumulative.sort_by(|a, b| b.cmp(a));
    cumulative
}

/// Cumulative driver standings for every race of a season.
///
/// Races come out in season order. A race with no classification maps to
/// `None` and the fold carries on from the last race that ran.
pub fn calculate_driver_standings<P: DataProvider + ?Sized>(
    provider: &P,
    season: &str,
    rules: &Rules,
) -> Result<DriverStandings, StandingsError> {
    let results = provider.season_results(season)?;
    let scheme = provider.points_scheme_for(season)?;

    let mut standings = DriverStandings::new();
    let mut previous: Option<RaceStandings> = None;

    for (race, result) in results {
        let track = provider.track_info(&race)?;

        match result {
            Some(result) => {
                let points = race_points(&result, &track, &scheme, rules);
                let cumulative = accumulate_race(previous.as_ref(), points);
                debug!(season, race = %race, drivers = cumulative.len(), "folded driver standings");
                previous = Some(cumulative.clone());
                standings.insert(race, Some(cumulative));
            }
            None => {
                debug!(season, race = %race, "race not run");
                standings.insert(race, None);
            }
        }
    }

    Ok(standings)
}

use tracing::debug;

use super::{
    ConstructorRaceStandings, ConstructorResult, ConstructorStandings, DriverStandings,
    RaceStandings, Rules, StandingsError,
};
use crate::fixtures::{DataProvider, Track};

/// Scale a constructor's points to a team of `standard_driver_count` drivers.
///
/// Rounds half away from zero. A team with no drivers normalises to zero.
pub fn normalise(points: u32, driver_count: u32, standard_driver_count: u32) -> u32 {
    if driver_count == 0 {
        return 0;
    }
    (f64::from(points) * f64::from(standard_driver_count) / f64::from(driver_count)).round() as u32
}

/// Group one race's driver totals by constructor.
///
/// Entries appear in the order each constructor is first met.
fn race_constructors<P: DataProvider + ?Sized>(
    provider: &P,
    season: &str,
    drivers: &RaceStandings,
    track: &Track,
    rules: &Rules,
) -> Result<ConstructorRaceStandings, StandingsError> {
    let mut teams = ConstructorRaceStandings::new();

    for (driver, points) in drivers.iter() {
        let car = provider.constructor_for(season, driver)?;
        match teams.get_mut(&car) {
            Some(team) => {
                team.points += points;
                team.driver_count += 1;
            }
            None => {
                teams.insert(
                    car,
                    ConstructorResult {
                        points: *points,
                        normalised_points: 0,
                        driver_count: 1,
                    },
                );
            }
        }
    }

    for team in teams.values_mut() {
        if track.no_points {
            team.points = 0;
        }
        team.normalised_points =
            normalise(team.points, team.driver_count, rules.standard_driver_count);
    }

    Ok(teams)
}

/// Add the previous cumulative row onto this race and re-sort.
///
/// `driver_count` always reflects this race alone.
fn accumulate_constructors(
    previous: Option<&ConstructorRaceStandings>,
    race: ConstructorRaceStandings,
) -> ConstructorRaceStandings {
    let mut cumulative: ConstructorRaceStandings = race
        .into_iter()
        .map(|(car, team)| {
            let carried = previous.map_or_else(ConstructorResult::default, |prev| {
                prev.get_or_default(&car)
            });
            let total = ConstructorResult {
                points: team.points + carried.points,
                normalised_points: team.normalised_points + carried.normalised_points,
                driver_count: team.driver_count,
            };
            (car, total)
        })
        .collect();

    cumulative.sort_by(|a, b| b.normalised_points.cmp(&a.normalised_points));
    cumulative
}

/// Constructor standings built from a given set of driver standings.
///
/// Races follow the order of `driver_standings`. Every classified driver
/// must have a constructor for the season.
pub fn constructors_from_driver_standings<P: DataProvider + ?Sized>(
    provider: &P,
    season: &str,
    driver_standings: &DriverStandings,
    rules: &Rules,
) -> Result<ConstructorStandings, StandingsError> {
    let mut standings = ConstructorStandings::new();
    let mut previous: Option<ConstructorRaceStandings> = None;

    for (race, drivers) in driver_standings.iter() {
        let track = provider.track_info(race)?;

        match drivers {
            Some(drivers) => {
                let teams = race_constructors(provider, season, drivers, &track, rules)?;
                let cumulative = accumulate_constructors(previous.as_ref(), teams);
                debug!(season, race, constructors = cumulative.len(), "folded constructor standings");
                previous = Some(cumulative.clone());
                standings.insert(race, Some(cumulative));
            }
            None => {
                standings.insert(race, None);
            }
        }
    }

    Ok(standings)
}

/// Constructor standings from the season's driver standings fixture.
pub fn calculate_constructor_standings<P: DataProvider + ?Sized>(
    provider: &P,
    season: &str,
    rules: &Rules,
) -> Result<ConstructorStandings, StandingsError> {
    let driver_standings = provider.driver_standings(season)?;
    constructors_from_driver_standings(provider, season, &driver_standings, rules)
}

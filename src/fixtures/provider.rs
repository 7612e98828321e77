use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::ordered::OrderedMap;
use super::types::{PointsScheme, RaceResult, SeasonRacer, SeasonRacers, SeasonResults, Track};
use crate::standings::{DriverStandings, StandingsError};

/// Read-only access to league fixtures.
///
/// The calculators only see this contract, never a storage format.
pub trait DataProvider {
    /// Every race of a season, in season order.
    fn season_results(&self, season: &str) -> Result<SeasonResults, StandingsError>;

    fn track_info(&self, race: &str) -> Result<Track, StandingsError>;

    /// Constructor a driver raced for. Missing assignments are an error.
    fn constructor_for(&self, season: &str, driver: &str) -> Result<String, StandingsError>;

    /// Cumulative driver standings as maintained in the fixtures.
    fn driver_standings(&self, season: &str) -> Result<DriverStandings, StandingsError>;

    fn points_scheme_for(&self, season: &str) -> Result<PointsScheme, StandingsError>;

    /// Classification for one race; `None` if the race did not run or is unknown.
    fn results_for(&self, season: &str, race: &str) -> Result<Option<RaceResult>, StandingsError> {
        Ok(self.season_results(season)?.get(race).cloned().flatten())
    }
}

/// File layout of the data directory shared by readers and the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tracks(&self) -> PathBuf {
        self.root.join("tracks.json")
    }

    pub fn results(&self, season: &str) -> PathBuf {
        self.season_file("results", season)
    }

    pub fn season_racers(&self, season: &str) -> PathBuf {
        self.season_file("seasonRacers", season)
    }

    pub fn standings(&self, season: &str) -> PathBuf {
        self.season_file("standings", season)
    }

    pub fn constructors(&self, season: &str) -> PathBuf {
        self.season_file("constructors", season)
    }

    fn season_file(&self, dir: &str, season: &str) -> PathBuf {
        self.root.join(dir).join(format!("{}.json", season))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StandingsError> {
    let file = File::open(path).map_err(|source| StandingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| StandingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Fixtures stored as JSON files under a data directory.
///
/// `tracks.json` is read once on open; season files are read on demand and
/// the driver assignments cached per season.
#[derive(Debug)]
pub struct JsonFixtures {
    layout: DataLayout,
    tracks: OrderedMap<Track>,
    schemes: HashMap<String, PointsScheme>,
    racers: RefCell<HashMap<String, SeasonRacers>>,
}

impl JsonFixtures {
    pub fn open(
        layout: DataLayout,
        schemes: HashMap<String, PointsScheme>,
    ) -> Result<Self, StandingsError> {
        let tracks = read_json(&layout.tracks())?;
        Ok(Self {
            layout,
            tracks,
            schemes,
            racers: RefCell::new(HashMap::new()),
        })
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }
}

impl DataProvider for JsonFixtures {
    fn season_results(&self, season: &str) -> Result<SeasonResults, StandingsError> {
        read_json(&self.layout.results(season))
    }

    fn track_info(&self, race: &str) -> Result<Track, StandingsError> {
        self.tracks
            .get(race)
            .cloned()
            .ok_or_else(|| StandingsError::UnknownTrack {
                race: race.to_string(),
            })
    }

    fn constructor_for(&self, season: &str, driver: &str) -> Result<String, StandingsError> {
        if !self.racers.borrow().contains_key(season) {
            let racers: SeasonRacers = read_json(&self.layout.season_racers(season))?;
            self.racers.borrow_mut().insert(season.to_string(), racers);
        }

        self.racers
            .borrow()
            .get(season)
            .and_then(|racers| racers.get(driver))
            .map(|racer| racer.car.clone())
            .ok_or_else(|| StandingsError::UnknownConstructor {
                season: season.to_string(),
                driver: driver.to_string(),
            })
    }

    fn driver_standings(&self, season: &str) -> Result<DriverStandings, StandingsError> {
        read_json(&self.layout.standings(season))
    }

    fn points_scheme_for(&self, season: &str) -> Result<PointsScheme, StandingsError> {
        self.schemes
            .get(season)
            .cloned()
            .ok_or_else(|| StandingsError::UnknownSeason {
                season: season.to_string(),
            })
    }
}

/// Fixtures held in memory, for callers that assemble data themselves.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFixtures {
    tracks: OrderedMap<Track>,
    results: HashMap<String, SeasonResults>,
    racers: HashMap<String, SeasonRacers>,
    standings: HashMap<String, DriverStandings>,
    schemes: HashMap<String, PointsScheme>,
}

impl InMemoryFixtures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, race: &str, track: Track) -> Self {
        self.tracks.insert(race, track);
        self
    }

    /// Append a race to a season. `None` records a race that did not run.
    pub fn with_race(mut self, season: &str, race: &str, result: Option<RaceResult>) -> Self {
        self.results
            .entry(season.to_string())
            .or_default()
            .insert(race, result);
        self
    }

    pub fn with_racer(mut self, season: &str, driver: &str, car: &str) -> Self {
        self.racers.entry(season.to_string()).or_default().insert(
            driver,
            SeasonRacer {
                car: car.to_string(),
            },
        );
        self
    }

    pub fn with_standings(mut self, season: &str, standings: DriverStandings) -> Self {
        self.standings.insert(season.to_string(), standings);
        self
    }

    pub fn with_points_scheme(mut self, season: &str, points: Vec<u32>) -> Self {
        self.schemes.insert(season.to_string(), PointsScheme::from(points));
        self
    }
}

impl DataProvider for InMemoryFixtures {
    fn season_results(&self, season: &str) -> Result<SeasonResults, StandingsError> {
        self.results
            .get(season)
            .cloned()
            .ok_or_else(|| StandingsError::UnknownSeason {
                season: season.to_string(),
            })
    }

    fn track_info(&self, race: &str) -> Result<Track, StandingsError> {
        self.tracks
            .get(race)
            .cloned()
            .ok_or_else(|| StandingsError::UnknownTrack {
                race: race.to_string(),
            })
    }

    fn constructor_for(&self, season: &str, driver: &str) -> Result<String, StandingsError> {
        self.racers
            .get(season)
            .and_then(|racers| racers.get(driver))
            .map(|racer| racer.car.clone())
            .ok_or_else(|| StandingsError::UnknownConstructor {
                season: season.to_string(),
                driver: driver.to_string(),
            })
    }

    fn driver_standings(&self, season: &str) -> Result<DriverStandings, StandingsError> {
        self.standings
            .get(season)
            .cloned()
            .ok_or_else(|| StandingsError::UnknownSeason {
                season: season.to_string(),
            })
    }

    fn points_scheme_for(&self, season: &str) -> Result<PointsScheme, StandingsError> {
        self.schemes
            .get(season)
            .cloned()
            .ok_or_else(|| StandingsError::UnknownSeason {
                season: season.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn fixtures_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "tracks.json",
            r#"{ "bahrain": { "name": "Bahrain" }, "imola": { "noPoints": true } }"#,
        );
        write(
            dir.path(),
            "results/s1.json",
            r#"{
                "bahrain": { "results": { "a": 0, "b": 0 }, "fastestLap": { "racerId": "a" } },
                "imola": null
            }"#,
        );
        write(
            dir.path(),
            "seasonRacers/s1.json",
            r#"{ "a": { "car": "red", "number": 1 }, "b": { "car": "blue" } }"#,
        );
        dir
    }

    fn open(dir: &TempDir) -> JsonFixtures {
        let mut schemes = HashMap::new();
        schemes.insert("s1".to_string(), PointsScheme::from(vec![10, 9]));
        JsonFixtures::open(DataLayout::new(dir.path()), schemes).unwrap()
    }

    #[test]
    fn test_layout_paths() {
        let layout = DataLayout::new("data");
        assert_eq!(layout.tracks(), PathBuf::from("data/tracks.json"));
        assert_eq!(layout.results("s4"), PathBuf::from("data/results/s4.json"));
        assert_eq!(layout.season_racers("s4"), PathBuf::from("data/seasonRacers/s4.json"));
        assert_eq!(layout.standings("s4"), PathBuf::from("data/standings/s4.json"));
        assert_eq!(layout.constructors("s4"), PathBuf::from("data/constructors/s4.json"));
    }

    #[test]
    fn test_json_fixtures_accessors() {
        let dir = fixtures_dir();
        let fixtures = open(&dir);

        assert!(fixtures.track_info("imola").unwrap().no_points);
        assert!(!fixtures.track_info("bahrain").unwrap().no_points);
        assert_eq!(fixtures.constructor_for("s1", "a").unwrap(), "red");
        assert_eq!(fixtures.points_scheme_for("s1").unwrap().points_for(1), 9);

        let bahrain = fixtures.results_for("s1", "bahrain").unwrap().unwrap();
        assert_eq!(bahrain.fastest_lap_driver(), Some("a"));
        assert!(fixtures.results_for("s1", "imola").unwrap().is_none());
    }

    #[test]
    fn test_unknown_track_is_error() {
        let dir = fixtures_dir();
        let fixtures = open(&dir);
        assert!(matches!(
            fixtures.track_info("monaco"),
            Err(StandingsError::UnknownTrack { .. })
        ));
    }

    #[test]
    fn test_unknown_constructor_names_season_and_driver() {
        let dir = fixtures_dir();
        let fixtures = open(&dir);
        let err = fixtures.constructor_for("s1", "ghost").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("s1"), "got: {}", message);
        assert!(message.contains("ghost"), "got: {}", message);
    }

    #[test]
    fn test_unconfigured_season_has_no_scheme() {
        let dir = fixtures_dir();
        let fixtures = open(&dir);
        assert!(matches!(
            fixtures.points_scheme_for("s9"),
            Err(StandingsError::UnknownSeason { .. })
        ));
    }

    #[test]
    fn test_missing_tracks_file_fails_open() {
        let dir = TempDir::new().unwrap();
        let result = JsonFixtures::open(DataLayout::new(dir.path()), HashMap::new());
        assert!(matches!(result, Err(StandingsError::Io { .. })));
    }

    #[test]
    fn test_malformed_results_is_parse_error() {
        let dir = fixtures_dir();
        write(dir.path(), "results/s2.json", "{ not json");
        let fixtures = open(&dir);
        assert!(matches!(
            fixtures.season_results("s2"),
            Err(StandingsError::Parse { .. })
        ));
    }
}

pub mod ordered;
pub mod provider;
pub mod types;

pub use ordered::OrderedMap;
pub use provider::{DataLayout, DataProvider, InMemoryFixtures, JsonFixtures};
pub use types::{FastestLap, PointsScheme, RaceResult, SeasonRacer, SeasonRacers, SeasonResults, Track};

//! Business logic services for the Ignis backend

pub mod historical;
pub mod human_factors;
pub mod prediction;
pub mod topography;
pub mod weather;
pub mod wildfire;

pub use historical::HistoricalWildfireService;
pub use human_factors::HumanFactorsService;
pub use prediction::{SpreadPredictor, SubprocessPredictor};
pub use topography::TopographyService;
pub use weather::WeatherService;
pub use wildfire::WildfireService;

/// PostgreSQL limit on bind parameters per statement
pub(crate) const MAX_BIND_PARAMS: usize = 65_535;

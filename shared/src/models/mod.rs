//! Domain models for the Ignis wildfire platform

mod historical;
mod human_factors;
mod topography;
mod weather;
mod wildfire;

pub use historical::*;
pub use human_factors::*;
pub use topography::*;
pub use weather::*;
pub use wildfire::*;

//! Shared types and algorithms for the Ignis wildfire platform
//!
//! This crate holds everything that runs on both sides of the wire: the
//! FIRMS CSV parser, the severity/confidence classifier, the distance engine
//! and terrain tile math. The backend uses it for ingestion and queries, the
//! browser gets the same code through the WASM module.

pub mod classify;
pub mod distance;
pub mod firms;
pub mod models;
pub mod tile;
pub mod types;
pub mod validation;

pub use classify::*;
pub use distance::*;
pub use models::*;
pub use types::*;
pub use validation::*;

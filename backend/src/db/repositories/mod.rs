//! Repository implementations module.
//!
//! This module contains the implementations of the `ShipmentRepository` trait:
//! - `fixture`: Deterministic in-memory implementation (fixed data or fixed error)
//! - `simulated`: Randomized latency and failures over a fixed dataset
pub mod fixture;
pub mod simulated;

pub use fixture::FixtureRepository;
pub use simulated::{OsRandom, RandomSource, SimulatedRepository, SimulationConfig};

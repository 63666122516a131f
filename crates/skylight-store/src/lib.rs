//! Durable city-list storage and the in-memory roster model for Skylight.

pub mod cities;
pub mod roster;

pub use cities::{default_cities, CityStore, StoreError};
pub use roster::CityRoster;

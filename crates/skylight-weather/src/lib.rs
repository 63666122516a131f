//! Weather domain for Skylight
//!
//! City and snapshot types, the forecast client with its retry policy,
//! free-text city search, and the shared weather cache / prefetch
//! coordinator.

pub mod client;
pub mod coordinator;
pub mod error;
pub mod retry;
pub mod search;
pub mod types;

pub use client::WeatherClient;
pub use coordinator::{ViewState, WeatherCoordinator};
pub use error::WeatherError;
pub use search::CityDirectory;
pub use types::{describe_weather_code, City, ConditionClass, WeatherSnapshot};

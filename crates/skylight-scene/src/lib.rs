//! Scene derivation for Skylight
//!
//! Everything that turns a weather snapshot into presentation values: the
//! scene category, the illustration manifest cache with deterministic image
//! selection, and the time-of-day tint/contrast resolver.

pub mod category;
pub mod daylight;
pub mod illustration;
pub mod manifest;

pub use category::SceneCategory;
pub use daylight::{resolve_contrast, resolve_time_bucket, TextStyle, TimeBucket, Tint, GRID_TEXT};
pub use illustration::{pick_filename, seed_hash};
pub use manifest::{ManifestCache, ManifestError};

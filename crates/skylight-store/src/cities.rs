//! Durable storage for the ordered city list.
//!
//! The whole list is serialized to one JSON document under the config
//! directory on every change. Older installs stored only user-added cities
//! under a separate key; loading migrates that format by merging those
//! entries after the seed list. Corrupt or missing data falls back to the
//! seed list.

use std::path::{Path, PathBuf};

use thiserror::Error;

use skylight_weather::City;

const CITIES_FILE: &str = "cities.json";
const LEGACY_USER_CITIES_FILE: &str = "user_cities.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::Io(_) => "Could not save your city list. Changes may be lost.",
            StoreError::Serialize(_) => "Could not save your city list. Changes may be lost.",
        }
    }
}

/// Seed list shown on first run and whenever stored data is unusable.
pub fn default_cities() -> Vec<City> {
    vec![
        City {
            id: 1850144,
            name: "Tokyo".to_string(),
            country: "Japan".to_string(),
            latitude: 35.6895,
            longitude: 139.69171,
            timezone: Some("Asia/Tokyo".to_string()),
        },
        City {
            id: 2988507,
            name: "Paris".to_string(),
            country: "France".to_string(),
            latitude: 48.85341,
            longitude: 2.3488,
            timezone: Some("Europe/Paris".to_string()),
        },
        City {
            id: 5128581,
            name: "New York".to_string(),
            country: "United States".to_string(),
            latitude: 40.71427,
            longitude: -74.00597,
            timezone: Some("America/New_York".to_string()),
        },
        City {
            id: 3413829,
            name: "Reykjavik".to_string(),
            country: "Iceland".to_string(),
            latitude: 64.13548,
            longitude: -21.89541,
            timezone: Some("Atlantic/Reykjavik".to_string()),
        },
    ]
}

pub struct CityStore {
    dir: PathBuf,
}

impl CityStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn cities_path(&self) -> PathBuf {
        self.dir.join(CITIES_FILE)
    }

    fn legacy_path(&self) -> PathBuf {
        self.dir.join(LEGACY_USER_CITIES_FILE)
    }

    /// Load the ordered city list.
    ///
    /// Falls back to the seed list when nothing usable is stored; migrates
    /// the legacy user-cities-only format on first encounter.
    pub fn load(&self) -> Vec<City> {
        match std::fs::read_to_string(self.cities_path()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(cities) => return cities,
                Err(e) => {
                    tracing::warn!("Stored city list is corrupt ({}), using defaults", e);
                    return default_cities();
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!("Could not read city list ({}), using defaults", e);
                return default_cities();
            }
        }

        if let Some(migrated) = self.migrate_legacy() {
            return migrated;
        }

        default_cities()
    }

    /// Merge legacy user-added cities after the seed list and persist the
    /// result in the current format.
    fn migrate_legacy(&self) -> Option<Vec<City>> {
        let contents = std::fs::read_to_string(self.legacy_path()).ok()?;
        let user_cities: Vec<City> = match serde_json::from_str(&contents) {
            Ok(cities) => cities,
            Err(e) => {
                tracing::warn!("Legacy city list is corrupt ({}), ignoring it", e);
                return None;
            }
        };

        let mut merged = default_cities();
        for city in user_cities {
            if !merged.iter().any(|c| c.id == city.id) {
                merged.push(city);
            }
        }

        tracing::info!("Migrated legacy city list ({} cities)", merged.len());
        if let Err(e) = self.save(&merged) {
            tracing::warn!("Could not persist migrated city list: {}", e);
        }
        Some(merged)
    }

    /// Persist the ordered city list. Called on every list change.
    pub fn save(&self, cities: &[City]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let contents = serde_json::to_string_pretty(cities)?;
        std::fs::write(self.cities_path(), contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn city(id: i64, name: &str) -> City {
        City {
            id,
            name: name.to_string(),
            country: "Testland".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            timezone: Some("UTC".to_string()),
        }
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CityStore::new(dir.path());

        let cities = vec![city(3, "Gamma"), city(1, "Alpha"), city(2, "Beta")];
        store.save(&cities).unwrap();

        assert_eq!(store.load(), cities);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = CityStore::new(dir.path());

        assert_eq!(store.load(), default_cities());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cities.json"), "{not json").unwrap();

        let store = CityStore::new(dir.path());
        assert_eq!(store.load(), default_cities());
    }

    #[test]
    fn test_legacy_file_is_merged_after_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let user_cities = vec![city(42, "Springfield")];
        std::fs::write(
            dir.path().join("user_cities.json"),
            serde_json::to_string(&user_cities).unwrap(),
        )
        .unwrap();

        let store = CityStore::new(dir.path());
        let loaded = store.load();

        let mut expected = default_cities();
        expected.push(city(42, "Springfield"));
        assert_eq!(loaded, expected);

        // Migration persisted the merged list in the new format
        assert!(dir.path().join("cities.json").exists());
        assert_eq!(store.load(), expected);
    }

    #[test]
    fn test_legacy_duplicate_of_default_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let duplicate = default_cities().remove(0);
        std::fs::write(
            dir.path().join("user_cities.json"),
            serde_json::to_string(&vec![duplicate]).unwrap(),
        )
        .unwrap();

        let store = CityStore::new(dir.path());
        assert_eq!(store.load(), default_cities());
    }

    #[test]
    fn test_new_format_wins_over_legacy() {
        let dir = tempfile::tempdir().unwrap();
        let store = CityStore::new(dir.path());

        store.save(&[city(7, "Kept")]).unwrap();
        std::fs::write(
            dir.path().join("user_cities.json"),
            serde_json::to_string(&vec![city(8, "Ignored")]).unwrap(),
        )
        .unwrap();

        assert_eq!(store.load(), vec![city(7, "Kept")]);
    }
}

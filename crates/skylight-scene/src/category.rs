//! Scene categories: coarse weather class crossed with day/night.
//!
//! A closed enumeration instead of free-form string keys, so a missing arm
//! is a compile error. The wire format (illustration folder names) is
//! produced by `key()`.

use skylight_weather::{ConditionClass, WeatherSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneCategory {
    ClearDay,
    ClearNight,
    RainDay,
    RainNight,
    SnowDay,
    SnowNight,
}

impl SceneCategory {
    /// Category for a weather snapshot.
    pub fn for_snapshot(snapshot: &WeatherSnapshot) -> Self {
        Self::from_condition(ConditionClass::from_code(snapshot.weather_code), snapshot.is_day)
    }

    pub fn from_condition(class: ConditionClass, is_day: bool) -> Self {
        match (class, is_day) {
            (ConditionClass::Clear, true) => Self::ClearDay,
            (ConditionClass::Clear, false) => Self::ClearNight,
            (ConditionClass::Rain, true) => Self::RainDay,
            (ConditionClass::Rain, false) => Self::RainNight,
            (ConditionClass::Snow, true) => Self::SnowDay,
            (ConditionClass::Snow, false) => Self::SnowNight,
        }
    }

    /// Illustration folder key for this category.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ClearDay => "clear-day",
            Self::ClearNight => "clear-night",
            Self::RainDay => "rain-day",
            Self::RainNight => "rain-night",
            Self::SnowDay => "snow-day",
            Self::SnowNight => "snow-night",
        }
    }

    /// All categories, in folder-key order.
    pub fn all() -> [Self; 6] {
        [
            Self::ClearDay,
            Self::ClearNight,
            Self::RainDay,
            Self::RainNight,
            Self::SnowDay,
            Self::SnowNight,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(code: i32, is_day: bool) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c: 0.0,
            weather_code: code,
            condition: String::new(),
            is_day,
            local_time: "12:00 PM".to_string(),
        }
    }

    #[test]
    fn test_snow_at_night_maps_to_snow_night() {
        let category = SceneCategory::for_snapshot(&snapshot(71, false));
        assert_eq!(category, SceneCategory::SnowNight);
        assert_eq!(category.key(), "snow-night");
    }

    #[test]
    fn test_clear_day_maps_to_clear_day() {
        let category = SceneCategory::for_snapshot(&snapshot(0, true));
        assert_eq!(category.key(), "clear-day");
    }

    #[test]
    fn test_thunderstorm_counts_as_rain() {
        let category = SceneCategory::for_snapshot(&snapshot(95, true));
        assert_eq!(category, SceneCategory::RainDay);
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: std::collections::HashSet<_> =
            SceneCategory::all().iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), 6);
    }
}

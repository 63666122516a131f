use serde::{Deserialize, Serialize};

/// A tracked location. Created by search or the seed list; immutable once
/// created. The ordering of the surrounding city list is user-significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Stable identifier from the geocoding source.
    pub id: i64,
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name; `None` lets the weather provider resolve one.
    pub timezone: Option<String>,
}

/// Current weather for one city at one point in time. Superseded by newer
/// snapshots, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    /// Source-defined condition code (WMO).
    pub weather_code: i32,
    /// Human-readable label for `weather_code`.
    pub condition: String,
    pub is_day: bool,
    /// Wall-clock time at the city when the snapshot was taken, 12-hour clock.
    pub local_time: String,
}

/// Coarse weather classes used for scene selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionClass {
    Clear,
    Rain,
    Snow,
}

impl ConditionClass {
    /// Classify a WMO weather code.
    pub fn from_code(code: i32) -> Self {
        match code {
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            51 | 53 | 55 | 56 | 57 | 61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 | 95 | 96 | 99 => {
                Self::Rain
            }
            _ => Self::Clear,
        }
    }
}

/// Human-readable label for a WMO weather code.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snowfall",
        73 => "Moderate snowfall",
        75 => "Heavy snowfall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

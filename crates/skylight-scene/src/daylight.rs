//! Time-of-day buckets and text contrast.
//!
//! Both the detail view and the grid view derive their tint from the same
//! bucket thresholds here, so the two renderings never disagree. The grid
//! view always uses light-on-dark text: its cells sit under a dark gradient
//! overlay that guarantees legibility at any hour.

use chrono::{NaiveTime, Timelike};

/// Time-of-day bucket on the 24-hour clock (half-open intervals).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    /// [23,24) and [0,3)
    DeepNight,
    /// [3,6)
    LateNight,
    /// [6,12)
    Morning,
    /// [12,18)
    Afternoon,
    /// [18,23)
    Evening,
}

impl TimeBucket {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            23 | 0..=2 => Self::DeepNight,
            3..=5 => Self::LateNight,
            6..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    /// Fixed background tint for this bucket.
    pub fn background(&self) -> &'static str {
        match self {
            Self::DeepNight => "#101423",
            Self::LateNight => "#27304a",
            Self::Morning => "#bcdcf0",
            Self::Afternoon => "#8fc3e8",
            Self::Evening => "#e8a06a",
        }
    }
}

/// Background tint for one rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub bucket: TimeBucket,
    pub background: &'static str,
}

/// Tint used when the local time cannot be parsed.
const NEUTRAL_TINT: Tint = Tint {
    bucket: TimeBucket::Morning,
    background: "#a9c4d4",
};

/// Primary/secondary text colors for one contrast choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub primary: &'static str,
    pub secondary: &'static str,
}

const DARK_ON_LIGHT: TextStyle = TextStyle {
    primary: "#1f2430",
    secondary: "rgba(31, 36, 48, 0.65)",
};

const LIGHT_ON_DARK: TextStyle = TextStyle {
    primary: "#f5f7fa",
    secondary: "rgba(245, 247, 250, 0.75)",
};

/// Text style for grid cells, regardless of hour.
pub const GRID_TEXT: TextStyle = LIGHT_ON_DARK;

/// Parse a 12-hour formatted time ("07:05 PM") into a 0-23 hour value.
///
/// Handles the AM/PM boundary (12 AM is hour 0, 12 PM stays 12). Returns
/// `None` on malformed input; never panics.
pub fn parse_hour_12(s: &str) -> Option<u32> {
    NaiveTime::parse_from_str(s.trim(), "%I:%M %p")
        .ok()
        .map(|t| t.hour())
}

/// Bucket and background tint for a formatted local time.
///
/// Invalid input resolves to a neutral daytime tint rather than failing.
pub fn resolve_time_bucket(local_time: &str) -> Tint {
    match parse_hour_12(local_time) {
        Some(hour) => {
            let bucket = TimeBucket::from_hour(hour);
            Tint {
                bucket,
                background: bucket.background(),
            }
        }
        None => NEUTRAL_TINT,
    }
}

/// Detail-view text contrast for a formatted local time: daytime hours
/// [6,18) read dark-on-light, all others light-on-dark. Invalid input
/// defaults to dark text.
pub fn resolve_contrast(local_time: &str) -> TextStyle {
    match parse_hour_12(local_time) {
        Some(hour) if (6..18).contains(&hour) => DARK_ON_LIGHT,
        Some(_) => LIGHT_ON_DARK,
        None => DARK_ON_LIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(TimeBucket::from_hour(23), TimeBucket::DeepNight);
        assert_eq!(TimeBucket::from_hour(2), TimeBucket::DeepNight);
        assert_eq!(TimeBucket::from_hour(5), TimeBucket::LateNight);
        assert_eq!(TimeBucket::from_hour(11), TimeBucket::Morning);
        assert_eq!(TimeBucket::from_hour(17), TimeBucket::Afternoon);
        assert_eq!(TimeBucket::from_hour(22), TimeBucket::Evening);
    }

    #[test]
    fn test_bucket_interval_edges() {
        assert_eq!(TimeBucket::from_hour(0), TimeBucket::DeepNight);
        assert_eq!(TimeBucket::from_hour(3), TimeBucket::LateNight);
        assert_eq!(TimeBucket::from_hour(6), TimeBucket::Morning);
        assert_eq!(TimeBucket::from_hour(12), TimeBucket::Afternoon);
        assert_eq!(TimeBucket::from_hour(18), TimeBucket::Evening);
    }

    #[test]
    fn test_parse_handles_am_pm_boundary() {
        assert_eq!(parse_hour_12("12:00 AM"), Some(0));
        assert_eq!(parse_hour_12("12:30 PM"), Some(12));
        assert_eq!(parse_hour_12("07:05 PM"), Some(19));
        assert_eq!(parse_hour_12("07:05 AM"), Some(7));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse_hour_12(""), None);
        assert_eq!(parse_hour_12("--:--"), None);
        assert_eq!(parse_hour_12("25:00 PM"), None);
        assert_eq!(parse_hour_12("noonish"), None);
    }

    #[test]
    fn test_resolve_time_bucket_from_strings() {
        assert_eq!(
            resolve_time_bucket("11:59 PM").bucket,
            TimeBucket::DeepNight
        );
        assert_eq!(resolve_time_bucket("05:00 AM").bucket, TimeBucket::LateNight);
        assert_eq!(resolve_time_bucket("11:00 AM").bucket, TimeBucket::Morning);
        assert_eq!(resolve_time_bucket("05:00 PM").bucket, TimeBucket::Afternoon);
        assert_eq!(resolve_time_bucket("10:00 PM").bucket, TimeBucket::Evening);
    }

    #[test]
    fn test_invalid_time_falls_back_to_neutral() {
        let tint = resolve_time_bucket("--:--");
        assert_eq!(tint, NEUTRAL_TINT);
        assert_eq!(resolve_contrast("--:--"), DARK_ON_LIGHT);
    }

    #[test]
    fn test_contrast_rule() {
        assert_eq!(resolve_contrast("06:00 AM"), DARK_ON_LIGHT);
        assert_eq!(resolve_contrast("05:59 PM"), DARK_ON_LIGHT);
        assert_eq!(resolve_contrast("06:00 PM"), LIGHT_ON_DARK);
        assert_eq!(resolve_contrast("03:00 AM"), LIGHT_ON_DARK);
    }

    #[test]
    fn test_grid_text_is_always_light_on_dark() {
        assert_eq!(GRID_TEXT, LIGHT_ON_DARK);
    }
}

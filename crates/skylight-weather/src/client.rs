//! Weather lookup client for the forecast endpoint.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::error::WeatherError;
use crate::retry::{with_retry, AttemptError, RetryPolicy};
use crate::types::{describe_weather_code, City, WeatherSnapshot};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Timezone sentinel sent when a city has none; the provider resolves one
/// from the coordinates.
const AUTO_TIMEZONE: &str = "auto";

/// Shown in place of a local time when the city's timezone cannot be parsed.
pub const TIME_PLACEHOLDER: &str = "--:--";

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    policy: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    weather_code: i32,
    is_day: u8,
}

impl WeatherClient {
    pub fn new(base_url: &str) -> Result<Self, WeatherError> {
        Self::with_policy(base_url, RetryPolicy::default())
    }

    pub fn with_policy(base_url: &str, policy: RetryPolicy) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy,
        })
    }

    /// Fetch current weather for a city.
    ///
    /// Retries per the configured policy; surfaces `WeatherError::Unavailable`
    /// once the attempt budget is spent. The snapshot's local time is
    /// formatted in the city's own timezone, not the caller's.
    #[instrument(skip(self, city), fields(city = %city.name), level = "info")]
    pub async fn fetch_weather(&self, city: &City) -> Result<WeatherSnapshot, WeatherError> {
        let timezone = city.timezone.as_deref().unwrap_or(AUTO_TIMEZONE);
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current=temperature_2m,weather_code,is_day&timezone={}",
            self.base_url,
            city.latitude,
            city.longitude,
            urlencoding::encode(timezone),
        );

        let body: ForecastResponse = with_retry(&self.policy, || {
            let request = self.client.get(&url);
            async move {
                let response = request
                    .send()
                    .await
                    .map_err(|e| AttemptError::Other(e.to_string()))?;

                if response.status() == StatusCode::TOO_MANY_REQUESTS {
                    return Err(AttemptError::RateLimited);
                }
                if !response.status().is_success() {
                    return Err(AttemptError::Other(format!("status {}", response.status())));
                }

                response
                    .json()
                    .await
                    .map_err(|e| AttemptError::Other(format!("malformed body: {}", e)))
            }
        })
        .await?;

        Ok(WeatherSnapshot {
            temperature_c: body.current.temperature_2m,
            weather_code: body.current.weather_code,
            condition: describe_weather_code(body.current.weather_code).to_string(),
            is_day: body.current.is_day != 0,
            local_time: local_time_for(city.timezone.as_deref(), Utc::now()),
        })
    }
}

/// Format the wall-clock time in `tz_name` as a zero-padded 12-hour string.
///
/// Unknown or missing timezone names fall back to a placeholder rather than
/// failing the fetch.
pub fn local_time_for(tz_name: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(name) = tz_name else {
        return TIME_PLACEHOLDER.to_string();
    };
    match name.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).format("%I:%M %p").to_string(),
        Err(_) => {
            tracing::debug!("Unknown timezone {:?}, using placeholder", name);
            TIME_PLACEHOLDER.to_string()
        }
    }
}

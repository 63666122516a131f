//! Free-text city search against the geocoding endpoint.
//!
//! Failures are absorbed: callers always get a (possibly empty) candidate
//! list, never an error. Designed for low-frequency, debounced use.

use serde::Deserialize;
use std::time::Duration;

use crate::error::WeatherError;
use crate::types::City;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const RESULT_LIMIT: u8 = 8;

/// Queries shorter than this never hit the network.
pub const MIN_QUERY_CHARS: usize = 2;

/// Timezone recorded when the source omits one.
const FALLBACK_TIMEZONE: &str = "UTC";

/// Suggested debounce for interactive callers.
pub const SUGGESTED_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct CityDirectory {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: i64,
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
    timezone: Option<String>,
}

impl CityDirectory {
    pub fn new(base_url: &str) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search for cities matching `query`.
    ///
    /// Returns an empty list for queries under two characters and on any
    /// network, status, or parse failure.
    pub async fn search(&self, query: &str) -> Vec<City> {
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let url = format!(
            "{}/v1/search?name={}&count={}&language=en&format=json",
            self.base_url,
            urlencoding::encode(query),
            RESULT_LIMIT,
        );

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("City search request failed: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::debug!("City search returned status {}", response.status());
            return Vec::new();
        }

        let body: SearchResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("City search parse error: {}", e);
                return Vec::new();
            }
        };

        body.results
            .into_iter()
            .map(|r| City {
                id: r.id,
                name: r.name,
                country: r.country.unwrap_or_default(),
                latitude: r.latitude,
                longitude: r.longitude,
                timezone: Some(r.timezone.unwrap_or_else(|| FALLBACK_TIMEZONE.to_string())),
            })
            .collect()
    }
}

//! Weather cache and prefetch coordination.
//!
//! Process-wide map from city id to the most recent snapshot. Serves stale
//! values while a refresh is in flight, and prefers stale data over
//! surfacing a failed refresh. Entries are replaced whole, never merged,
//! and live for the process lifetime.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use rand::Rng;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::client::WeatherClient;
use crate::types::{City, WeatherSnapshot};

/// Detail-view loading lifecycle for one tracked city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Complete,
    Error,
}

#[derive(Default)]
struct Entry {
    snapshot: Option<WeatherSnapshot>,
    state: ViewState,
    /// Sequence number of the last committed fetch; newer commits win.
    committed_seq: u64,
}

/// Upper bound for the random delay before each prefetch fetch.
const PREFETCH_JITTER_MS: u64 = 250;

pub struct WeatherCoordinator {
    client: Arc<WeatherClient>,
    entries: RwLock<HashMap<i64, Entry>>,
    next_seq: AtomicU64,
}

impl WeatherCoordinator {
    pub fn new(client: Arc<WeatherClient>) -> Self {
        Self {
            client,
            entries: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Last stored snapshot for a city, if any.
    pub fn cached(&self, city_id: i64) -> Option<WeatherSnapshot> {
        self.entries
            .read()
            .get(&city_id)
            .and_then(|e| e.snapshot.clone())
    }

    /// Loading lifecycle state for a city.
    pub fn state(&self, city_id: i64) -> ViewState {
        self.entries
            .read()
            .get(&city_id)
            .map(|e| e.state)
            .unwrap_or_default()
    }

    /// Fetch fresh weather for `city` and commit it to the cache.
    ///
    /// A cached snapshot survives a failed refresh untouched; the entry only
    /// reaches `Error` when there is nothing cached to fall back on. Results
    /// arriving after `cancel` fired, or that lost the race against a newer
    /// fetch, are discarded without touching the cache.
    pub async fn refresh(
        &self,
        city: &City,
        cancel: &CancellationToken,
    ) -> Option<WeatherSnapshot> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);

        {
            let mut entries = self.entries.write();
            let entry = entries.entry(city.id).or_default();
            if entry.state == ViewState::Idle {
                entry.state = ViewState::Loading;
            }
        }

        match self.client.fetch_weather(city).await {
            Ok(snapshot) => {
                if cancel.is_cancelled() {
                    tracing::debug!("Discarding weather for {}: view no longer active", city.name);
                    return self.cached(city.id);
                }

                let mut entries = self.entries.write();
                let entry = entries.entry(city.id).or_default();
                if seq < entry.committed_seq {
                    // A newer fetch already landed; keep it.
                    return entry.snapshot.clone();
                }
                entry.committed_seq = seq;
                entry.snapshot = Some(snapshot.clone());
                entry.state = ViewState::Complete;
                Some(snapshot)
            }
            Err(e) => {
                let mut entries = self.entries.write();
                let entry = entries.entry(city.id).or_default();
                match &entry.snapshot {
                    Some(stale) => {
                        // Stale beats broken.
                        tracing::warn!(
                            "Weather refresh for {} failed ({}), keeping cached value",
                            city.name,
                            e
                        );
                        entry.state = ViewState::Complete;
                        Some(stale.clone())
                    }
                    None => {
                        tracing::warn!("Weather fetch for {} failed: {}", city.name, e);
                        entry.state = ViewState::Error;
                        None
                    }
                }
            }
        }
    }

    /// Concurrently fetch weather for every listed city that has no cached
    /// snapshot yet.
    ///
    /// Each city's fetch is independent; individual failures never abort the
    /// batch. Returns once every fetch has settled.
    pub async fn prefetch_missing(self: &Arc<Self>, cities: &[City]) {
        let mut tasks = JoinSet::new();

        for city in cities {
            if self.cached(city.id).is_some() {
                continue;
            }
            let coordinator = Arc::clone(self);
            let city = city.clone();
            let jitter =
                Duration::from_millis(rand::thread_rng().gen_range(0..PREFETCH_JITTER_MS));
            tasks.spawn(async move {
                // Spread simultaneous grid-cell fetches out a little.
                tokio::time::sleep(jitter).await;
                coordinator.refresh(&city, &CancellationToken::new()).await;
            });
        }

        while tasks.join_next().await.is_some() {}
    }
}

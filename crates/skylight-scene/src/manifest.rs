//! Illustration manifest cache.
//!
//! Manifests (one JSON array of filenames per scene category) are fetched
//! once and memoized for the process lifetime. Concurrent callers for the
//! same uncached category share a single request: the first caller owns the
//! fetch, later callers park on a watch channel until the result lands.
//! Failures resolve to an empty manifest and are remembered for a bounded
//! retry window so a flaky CDN neither gets hammered nor stays broken for
//! the whole session.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;

use crate::category::SceneCategory;
use crate::illustration::pick_filename;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default window during which a failed fetch is not retried.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Manifest request returned status {0}")]
    Status(reqwest::StatusCode),
}

type ManifestFiles = Arc<Vec<String>>;

enum Slot {
    /// Fetched successfully; cached for the process lifetime.
    Ready(ManifestFiles),
    /// Fetch failed at this instant; empty until the retry window passes.
    Failed(Instant),
    /// A fetch is in flight; waiters park on the receiver.
    Pending(watch::Receiver<Option<ManifestFiles>>),
}

enum Plan {
    Serve(ManifestFiles),
    Wait(watch::Receiver<Option<ManifestFiles>>),
    Fetch(watch::Sender<Option<ManifestFiles>>),
}

pub struct ManifestCache {
    client: reqwest::Client,
    base_url: String,
    slots: Mutex<HashMap<SceneCategory, Slot>>,
    retry_after: Duration,
}

impl ManifestCache {
    pub fn new(base_url: &str) -> Result<Self, ManifestError> {
        Self::with_retry_after(base_url, DEFAULT_RETRY_AFTER)
    }

    pub fn with_retry_after(base_url: &str, retry_after: Duration) -> Result<Self, ManifestError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            slots: Mutex::new(HashMap::new()),
            retry_after,
        })
    }

    /// Filenames available for a category.
    ///
    /// Never fails: an unreachable or malformed manifest yields an empty
    /// list (and is negatively cached for the retry window).
    pub async fn manifest(&self, category: SceneCategory) -> ManifestFiles {
        let plan = {
            let mut slots = self.slots.lock();
            match slots.get(&category) {
                Some(Slot::Ready(files)) => Plan::Serve(files.clone()),
                Some(Slot::Failed(at)) if at.elapsed() < self.retry_after => {
                    Plan::Serve(Arc::new(Vec::new()))
                }
                Some(Slot::Pending(rx)) => Plan::Wait(rx.clone()),
                _ => {
                    let (tx, rx) = watch::channel(None);
                    slots.insert(category, Slot::Pending(rx));
                    Plan::Fetch(tx)
                }
            }
        };

        match plan {
            Plan::Serve(files) => files,
            Plan::Wait(mut rx) => match rx.wait_for(|v| v.is_some()).await {
                Ok(value) => value.as_ref().cloned().unwrap_or_else(|| Arc::new(Vec::new())),
                Err(_) => {
                    // The fetch owner went away without a result; clear the
                    // slot so a later call can retry.
                    let mut slots = self.slots.lock();
                    if matches!(slots.get(&category), Some(Slot::Pending(_))) {
                        slots.remove(&category);
                    }
                    Arc::new(Vec::new())
                }
            },
            Plan::Fetch(tx) => {
                let files = match self.fetch_manifest(category).await {
                    Ok(files) => {
                        let files = Arc::new(files);
                        self.slots
                            .lock()
                            .insert(category, Slot::Ready(files.clone()));
                        files
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Manifest fetch for {} failed: {}",
                            category.key(),
                            e
                        );
                        self.slots
                            .lock()
                            .insert(category, Slot::Failed(Instant::now()));
                        Arc::new(Vec::new())
                    }
                };
                let _ = tx.send(Some(files.clone()));
                files
            }
        }
    }

    /// Deterministically selected illustration URL for `seed`, or `None`
    /// when the category's manifest is empty or unavailable.
    pub async fn illustration(&self, category: SceneCategory, seed: &str) -> Option<String> {
        let files = self.manifest(category).await;
        pick_filename(&files, seed).map(|filename| self.image_url(category, filename))
    }

    /// Full URL of one illustration file.
    pub fn image_url(&self, category: SceneCategory, filename: &str) -> String {
        format!("{}/{}/{}", self.base_url, category.key(), filename)
    }

    async fn fetch_manifest(&self, category: SceneCategory) -> Result<Vec<String>, ManifestError> {
        let url = format!("{}/{}/index.json", self.base_url, category.key());
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ManifestError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

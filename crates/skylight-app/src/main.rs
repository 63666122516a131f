use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use skylight_core::Config;
use skylight_scene::{resolve_time_bucket, ManifestCache, SceneCategory};
use skylight_store::{CityRoster, CityStore};
use skylight_weather::{CityDirectory, WeatherClient, WeatherCoordinator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    skylight_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("Skylight started");

    // `skylight <query>` runs a city search and exits
    if let Some(query) = std::env::args().nth(1) {
        let directory = CityDirectory::new(&config.endpoints.geocoding_url)?;
        let candidates = directory.search(&query).await;
        if candidates.is_empty() {
            println!("No cities found for {:?}", query);
        }
        for candidate in candidates {
            println!(
                "{:>10}  {}, {}  ({}, {})",
                candidate.id,
                candidate.name,
                candidate.country,
                candidate.latitude,
                candidate.longitude
            );
        }
        return Ok(());
    }

    let store = CityStore::new(&config.config_dir);
    let roster = CityRoster::new(store.load());

    let client = Arc::new(WeatherClient::new(&config.endpoints.forecast_url)?);
    let coordinator = Arc::new(WeatherCoordinator::new(client));
    let scenes = ManifestCache::with_retry_after(
        &config.endpoints.scenes_url,
        Duration::from_secs(config.scene.manifest_retry_secs),
    )?;

    // Warm the cache for every tracked city in one parallel pass
    coordinator.prefetch_missing(roster.cities()).await;

    println!("Skylight - {} tracked cities", roster.cities().len());
    for city in roster.cities() {
        let marker = if roster.selected_id() == Some(city.id) {
            "*"
        } else {
            " "
        };

        match coordinator.cached(city.id) {
            Some(snapshot) => {
                let category = SceneCategory::for_snapshot(&snapshot);
                let tint = resolve_time_bucket(&snapshot.local_time);
                println!(
                    "{} {}, {}: {:.1}°C, {} ({} local, {:?})",
                    marker,
                    city.name,
                    city.country,
                    snapshot.temperature_c,
                    snapshot.condition,
                    snapshot.local_time,
                    tint.bucket,
                );
                if let Some(url) = scenes.illustration(category, &city.id.to_string()).await {
                    println!("      scene: {}", url);
                }
            }
            None => {
                println!("{} {}, {}: connection interrupted", marker, city.name, city.country);
            }
        }
    }

    Ok(())
}

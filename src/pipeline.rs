/// Temperature aggregation pipeline.
///
/// Runs the four steps in strict order:
/// 1. discovery  — list stations inside the configured bounding box
/// 2. freshness  — keep stations measured within the freshness window
/// 3. collection — fetch each fresh station's temperature readings
/// 4. aggregate  — average and round
///
/// Nothing is cached between runs; every call re-queries openSenseMap.

use crate::analysis::aggregate::aggregate;
use crate::analysis::freshness::filter_fresh;
use crate::collector::collect_readings;
use crate::config::ServiceConfig;
use crate::ingest::http::{build_client, HttpFetch};
use crate::ingest::opensensemap::discover;
use crate::model::{SenseBoxError, TemperatureSummary};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Runs the pipeline against `fetcher` with a fixed `now`.
///
/// # Errors
/// - `SenseBoxError::MalformedTimestamp` — a discovered station carries a
///   `lastMeasurementAt` in an unexpected format. Upstream outages never
///   surface here; they degrade to fewer (or zero) readings.
pub fn run_pipeline(
    fetcher: Arc<dyn HttpFetch>,
    config: &ServiceConfig,
    now: DateTime<Utc>,
) -> Result<TemperatureSummary, SenseBoxError> {
    let stations = discover(fetcher.as_ref(), &config.upstream, &config.region.bbox);
    let fresh = filter_fresh(&stations, now, config.aggregation.freshness_window())?;
    let readings = collect_readings(
        fetcher,
        &config.upstream,
        &fresh,
        config.aggregation.max_workers,
    );

    Ok(TemperatureSummary {
        average: aggregate(&readings),
        stations_discovered: stations.len(),
        stations_fresh: fresh.len(),
        readings: readings.len(),
    })
}

/// Computes the current average temperature for the configured region.
///
/// Opens one HTTP client for the duration of the call; it is released when
/// this function returns, on success and on every error path.
pub fn get_average_temperature(config: &ServiceConfig) -> Result<f64, SenseBoxError> {
    let client: Arc<dyn HttpFetch> = Arc::new(build_client()?);
    let summary = run_pipeline(client, config, Utc::now())?;

    info!(
        region = %config.region.name,
        discovered = summary.stations_discovered,
        fresh = summary.stations_fresh,
        readings = summary.readings,
        average = summary.average,
        "temperature pipeline complete"
    );

    Ok(summary.average)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

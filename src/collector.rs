/// Parallel collection of per-station temperature readings.
///
/// Station detail requests are independent, so they are spread over a
/// bounded thread pool and gathered back through a channel. A station that
/// fails contributes nothing; its siblings are unaffected. Result order is
/// unspecified because the aggregator only sums.

use crate::config::UpstreamConfig;
use crate::ingest::http::HttpFetch;
use crate::ingest::opensensemap::fetch_station_readings;
use crate::model::TemperatureReading;
use std::sync::mpsc;
use std::sync::Arc;
use threadpool::ThreadPool;
use tracing::{debug, warn};

/// Fetches every station's detail record and returns all temperature values
/// found, using at most `max_workers` concurrent requests.
pub fn collect_readings(
    fetcher: Arc<dyn HttpFetch>,
    upstream: &UpstreamConfig,
    station_ids: &[String],
    max_workers: usize,
) -> Vec<TemperatureReading> {
    if station_ids.is_empty() {
        return Vec::new();
    }

    let workers = max_workers.clamp(1, station_ids.len());
    let pool = ThreadPool::new(workers);
    let (tx, rx) = mpsc::channel();

    for station_id in station_ids {
        let tx = tx.clone();
        let fetcher = Arc::clone(&fetcher);
        let upstream = upstream.clone();
        let station_id = station_id.clone();

        pool.execute(move || {
            let readings = match fetch_station_readings(fetcher.as_ref(), &upstream, &station_id) {
                Ok(readings) => {
                    if readings.is_empty() {
                        debug!(station = %station_id, "no temperature sensor reading");
                    }
                    readings
                }
                Err(e) => {
                    warn!(error = %e, "skipping station");
                    Vec::new()
                }
            };
            let _ = tx.send(readings);
        });
    }

    // Jobs hold the remaining senders, so the iterator ends once every
    // station has reported (or its worker panicked).
    drop(tx);
    let readings: Vec<TemperatureReading> = rx.iter().flatten().collect();

    if pool.panic_count() > 0 {
        warn!(panicked = pool.panic_count(), "station workers panicked");
    }

    readings
}

/// Freshness filtering of discovered stations.
///
/// A station is trusted only if its last measurement is no older than the
/// freshness window. Stations that never reported (`lastMeasurementAt`
/// absent) are dropped silently. A timestamp that is present but does not
/// match the wire format aborts the run.

use crate::model::{SenseBoxError, StationDescriptor};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Wire format of `lastMeasurementAt`, e.g. `2024-05-01T11:58:12.417Z`.
pub const LAST_MEASUREMENT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3fZ";

/// Parses a `lastMeasurementAt` value as UTC. No fallback formats.
pub fn parse_last_measurement(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, LAST_MEASUREMENT_FORMAT).map(|dt| dt.and_utc())
}

/// Returns the ids of stations measured within `window` of `now`, in input
/// order.
///
/// `now` is a single snapshot taken by the caller, so every station in the
/// batch is judged against the same cutoff. The boundary is inclusive: a
/// station exactly `window` old passes.
///
/// # Errors
/// - `SenseBoxError::MalformedTimestamp` — the first descriptor whose
///   `lastMeasurementAt` does not parse.
pub fn filter_fresh(
    descriptors: &[StationDescriptor],
    now: DateTime<Utc>,
    window: Duration,
) -> Result<Vec<String>, SenseBoxError> {
    let mut fresh = Vec::new();

    for descriptor in descriptors {
        let Some(raw) = descriptor.last_measurement_at.as_deref() else {
            continue;
        };

        let measured_at =
            parse_last_measurement(raw).map_err(|e| SenseBoxError::MalformedTimestamp {
                id: descriptor.id.clone(),
                value: raw.to_string(),
                source: e,
            })?;

        if now - measured_at <= window {
            fresh.push(descriptor.id.clone());
        }
    }

    Ok(fresh)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

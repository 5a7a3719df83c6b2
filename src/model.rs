//! Shared data types for the temperature aggregation pipeline.
//!
//! The upstream openSenseMap payloads are large and loosely shaped. Only the
//! fields the pipeline actually reads are modelled here; everything else is
//! ignored by serde. Absence of an optional field has a defined meaning at
//! each step (see `freshness` and `ingest::opensensemap`).

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Upstream payloads
// ---------------------------------------------------------------------------

/// One entry of the `GET /boxes/?bbox=...` listing.
///
/// Built entry by entry in `ingest::opensensemap::parse_boxes_response`, so
/// one odd entry never costs its siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct StationDescriptor {
    /// Opaque box identifier used for the per-station detail lookup.
    pub id: String,

    /// `YYYY-MM-DDTHH:MM:SS.mmmZ`. `None` means freshness is unknown.
    pub last_measurement_at: Option<String>,
}

/// Per-station record from `GET /boxes/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDetail {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sensor {
    /// Untitled sensors are kept so their siblings still decode.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "lastMeasurement", default)]
    pub last_measurement: Option<LastMeasurement>,
}

/// Latest value reported by a sensor. The value arrives as a JSON string.
#[derive(Debug, Clone, Deserialize)]
pub struct LastMeasurement {
    #[serde(default)]
    pub value: Option<String>,
}

/// Sensor title that marks an air temperature sensor.
pub const TEMPERATURE_TITLE: &str = "Temperature";

/// A single temperature value, passed through in the upstream unit.
pub type TemperatureReading = f64;

// ---------------------------------------------------------------------------
// Pipeline outcome
// ---------------------------------------------------------------------------

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSummary {
    /// Mean of all readings rounded to 2 decimals; `0.0` when there are none.
    pub average: f64,
    pub stations_discovered: usize,
    pub stations_fresh: usize,
    pub readings: usize,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while talking to openSenseMap or interpreting its data.
///
/// Only `MalformedTimestamp` and `ClientInit` abort a pipeline run; the
/// remaining variants are logged and degraded at the step that produced them.
#[derive(Debug, Error)]
pub enum SenseBoxError {
    #[error("upstream returned HTTP {status}")]
    UpstreamUnavailable { status: u16 },

    #[error("station {id} unreachable: {reason}")]
    StationUnreachable { id: String, reason: String },

    #[error("station {id} has malformed lastMeasurementAt '{value}': {source}")]
    MalformedTimestamp {
        id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response body: {0}")]
    Decode(String),

    #[error("failed to build HTTP client: {0}")]
    ClientInit(String),
}

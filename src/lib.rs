/// hivebox_service: average air temperature for a region from openSenseMap.
///
/// # Module structure
///
/// ```text
/// hivebox_service
/// ├── model       — upstream payload types, TemperatureSummary, SenseBoxError
/// ├── config      — service configuration (hivebox.toml, built-in Berlin defaults)
/// ├── version     — application version string
/// ├── ingest
/// │   ├── http         — HttpFetch capability + reqwest implementation
/// │   ├── opensensemap — URL construction, parsing, discovery + detail calls
/// │   └── fixtures (test only) — representative API response payloads
/// ├── analysis
/// │   ├── freshness — drops stations whose last measurement is too old
/// │   └── aggregate — rounded mean of collected readings
/// ├── collector   — parallel per-station reading collection (thread pool)
/// ├── pipeline    — discovery → freshness → collection → aggregate
/// └── endpoint    — HTTP API: /, /version, /temperature
/// ```

/// Public modules
pub mod analysis;
pub mod collector;
pub mod config;
pub mod endpoint;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod version;

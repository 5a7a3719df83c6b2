/// Service configuration loader - parses hivebox.toml
///
/// Every setting has a built-in default matching the Berlin deployment, so
/// the service runs with no file at all. A TOML file only needs to list the
/// values it overrides.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit configuration file.
pub const ENV_CONFIG_PATH: &str = "HIVEBOX_CONFIG";

/// Configuration file looked up in the working directory when
/// `HIVEBOX_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "hivebox.toml";

pub const DEFAULT_BASE_URL: &str = "https://api.opensensemap.org";

pub const DEFAULT_FRESHNESS_WINDOW_HOURS: i64 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}

// ---------------------------------------------------------------------------
// Configuration sections
// ---------------------------------------------------------------------------

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    pub upstream: UpstreamConfig,
    pub region: RegionConfig,
    pub aggregation: AggregationConfig,
    pub endpoint: EndpointConfig,
}

/// openSenseMap API location and per-call timeouts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub discovery_timeout_secs: u64,
    pub detail_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            discovery_timeout_secs: 10,
            detail_timeout_secs: 30,
        }
    }
}

impl UpstreamConfig {
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout_secs)
    }

    pub fn detail_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_timeout_secs)
    }
}

/// The single region the service averages over
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Display name used in endpoint messages.
    pub name: String,
    pub bbox: BoundingBox,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            name: "Berlin".to_string(),
            bbox: BoundingBox::BERLIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Maximum age of a station's last measurement, inclusive.
    pub freshness_window_hours: i64,
    /// Upper bound on concurrent per-station detail requests.
    pub max_workers: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            freshness_window_hours: DEFAULT_FRESHNESS_WINDOW_HOURS,
            max_workers: 8,
        }
    }
}

impl AggregationConfig {
    /// The freshness window, or `None` when the hour count does not fit a
    /// `TimeDelta`.
    pub fn checked_freshness_window(&self) -> Option<chrono::TimeDelta> {
        chrono::TimeDelta::try_hours(self.freshness_window_hours)
    }

    /// Falls back to the 3 hour default for values `validate` would reject.
    pub fn freshness_window(&self) -> chrono::TimeDelta {
        match self.checked_freshness_window() {
            Some(window) if self.freshness_window_hours > 0 => window,
            _ => chrono::TimeDelta::hours(DEFAULT_FRESHNESS_WINDOW_HOURS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub host: String,
    pub port: u16,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

// ---------------------------------------------------------------------------
// Bounding box
// ---------------------------------------------------------------------------

/// Rectangular region in WGS84 degrees.
///
/// In TOML it is written as `[min_lon, min_lat, max_lon, max_lat]`, the same
/// order openSenseMap expects in its `bbox` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 4]")]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Berlin city extent.
    pub const BERLIN: BoundingBox = BoundingBox {
        min_lon: 13.0884,
        min_lat: 52.3382,
        max_lon: 13.7611,
        max_lat: 52.6755,
    };

    /// Renders `minLon,minLat,maxLon,maxLat` for the `bbox` query parameter.
    pub fn to_query_value(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lon_ok = |v: f64| (-180.0..=180.0).contains(&v);
        let lat_ok = |v: f64| (-90.0..=90.0).contains(&v);

        if !lon_ok(self.min_lon) || !lon_ok(self.max_lon) {
            return Err(ConfigError::InvalidBoundingBox(format!(
                "longitude out of range in {}",
                self.to_query_value()
            )));
        }
        if !lat_ok(self.min_lat) || !lat_ok(self.max_lat) {
            return Err(ConfigError::InvalidBoundingBox(format!(
                "latitude out of range in {}",
                self.to_query_value()
            )));
        }
        if self.min_lon >= self.max_lon || self.min_lat >= self.max_lat {
            return Err(ConfigError::InvalidBoundingBox(format!(
                "min must be below max in {}",
                self.to_query_value()
            )));
        }
        Ok(())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::BERLIN
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        BoundingBox {
            min_lon: v[0],
            min_lat: v[1],
            max_lon: v[2],
            max_lat: v[3],
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl ServiceConfig {
    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Resolves the configuration the binary runs with.
    ///
    /// Order: the file named by `HIVEBOX_CONFIG` (must exist), then
    /// `hivebox.toml` in the working directory if present, then built-in
    /// defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        if let Ok(path) = env::var(ENV_CONFIG_PATH) {
            return Self::load(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_PATH);
        if fallback.exists() {
            return Self::load(fallback);
        }

        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.region.bbox.validate()?;

        if self.upstream.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                field: "upstream.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.upstream.discovery_timeout_secs == 0 || self.upstream.detail_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "upstream timeouts",
                reason: "must be at least 1 second".to_string(),
            });
        }
        let hours = self.aggregation.freshness_window_hours;
        if hours <= 0 {
            return Err(ConfigError::InvalidSetting {
                field: "aggregation.freshness_window_hours",
                reason: format!("must be positive, got {}", hours),
            });
        }
        if self.aggregation.checked_freshness_window().is_none() {
            return Err(ConfigError::InvalidSetting {
                field: "aggregation.freshness_window_hours",
                reason: format!("{} hours is out of range", hours),
            });
        }
        if self.aggregation.max_workers == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "aggregation.max_workers",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// openSenseMap API client.
///
/// Handles URL construction, JSON response parsing and the two upstream
/// calls the pipeline makes:
///   GET {base}/boxes/?bbox=minLon,minLat,maxLon,maxLat   — station discovery
///   GET {base}/boxes/{id}                                — station detail
///
/// See `fixtures.rs` for annotated examples of both response shapes.

use crate::config::{BoundingBox, UpstreamConfig};
use crate::ingest::http::HttpFetch;
use crate::model::{
    SenseBoxError, StationDescriptor, StationDetail, TemperatureReading, TEMPERATURE_TITLE,
};
use serde_json::Value;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the station listing URL. The bounding box travels as a query
/// parameter, not in the path.
pub fn build_boxes_url(base_url: &str) -> String {
    format!("{}/boxes/", base_url.trim_end_matches('/'))
}

/// Builds the per-station detail URL with the id percent-encoded into the
/// path.
pub fn build_box_url(base_url: &str, station_id: &str) -> String {
    format!(
        "{}/boxes/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(station_id)
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses the `/boxes/` listing into station descriptors, in upstream order.
///
/// Entries are converted one at a time. An entry without a string `_id` (or
/// `id`) is skipped with a warning and its siblings are kept.
///
/// # Errors
/// - `SenseBoxError::Decode` — body is not a JSON array.
pub fn parse_boxes_response(json: &str) -> Result<Vec<StationDescriptor>, SenseBoxError> {
    let entries: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| SenseBoxError::Decode(format!("box listing: {}", e)))?;

    let mut stations = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match descriptor_from_entry(entry) {
            Some(station) => stations.push(station),
            None => warn!(index, "skipping box listing entry without an id"),
        }
    }
    Ok(stations)
}

/// `_id` wins over `id` when both are present.
///
/// A `lastMeasurementAt` that is present but not a string is kept in its JSON
/// form so freshness filtering reports it as malformed.
fn descriptor_from_entry(entry: &Value) -> Option<StationDescriptor> {
    let id = ["_id", "id"]
        .iter()
        .find_map(|key| entry.get(*key)?.as_str())?;

    let last_measurement_at = match entry.get("lastMeasurementAt") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };

    Some(StationDescriptor {
        id: id.to_string(),
        last_measurement_at,
    })
}

/// Parses a single `/boxes/{id}` detail record.
pub fn parse_box_detail(json: &str) -> Result<StationDetail, SenseBoxError> {
    serde_json::from_str(json)
        .map_err(|e| SenseBoxError::Decode(format!("box detail: {}", e)))
}

/// Extracts every temperature value a station reports.
///
/// All sensors titled exactly `"Temperature"` contribute, so a box with two
/// such sensors yields two readings. Sensors without a last measurement are
/// skipped, and so are values that do not parse as numbers.
pub fn temperature_values(detail: &StationDetail) -> Vec<TemperatureReading> {
    detail
        .sensors
        .iter()
        .filter(|sensor| sensor.title.as_deref() == Some(TEMPERATURE_TITLE))
        .filter_map(|sensor| sensor.last_measurement.as_ref()?.value.as_deref())
        .filter_map(|raw| match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                warn!(
                    station = detail.id.as_deref().unwrap_or("?"),
                    value = raw,
                    "skipping non-numeric temperature value"
                );
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// API calls
// ---------------------------------------------------------------------------

/// Lists the stations inside `bbox`.
///
/// Never fails: a non-200 status, a transport error or an undecodable body
/// are logged and reported as an empty region, so the pipeline degrades to
/// "no data" instead of aborting. No retries.
pub fn discover(
    fetcher: &dyn HttpFetch,
    upstream: &UpstreamConfig,
    bbox: &BoundingBox,
) -> Vec<StationDescriptor> {
    let url = build_boxes_url(&upstream.base_url);
    let bbox_param = bbox.to_query_value();

    let response = match fetcher.get(&url, &[("bbox", bbox_param.as_str())], upstream.discovery_timeout()) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, url = %url, "station discovery failed");
            return Vec::new();
        }
    };

    if !response.is_ok() {
        let e = SenseBoxError::UpstreamUnavailable { status: response.status };
        warn!(error = %e, url = %url, "station discovery failed");
        return Vec::new();
    }

    match parse_boxes_response(&response.body) {
        Ok(stations) => {
            debug!(count = stations.len(), bbox = %bbox_param, "discovered stations");
            stations
        }
        Err(e) => {
            warn!(error = %e, url = %url, "station discovery failed");
            Vec::new()
        }
    }
}

/// Fetches one station's detail record and returns its temperature values.
///
/// # Errors
/// - `SenseBoxError::StationUnreachable` — transport failure, non-200 status
///   or undecodable body. Callers treat this as "zero readings".
pub fn fetch_station_readings(
    fetcher: &dyn HttpFetch,
    upstream: &UpstreamConfig,
    station_id: &str,
) -> Result<Vec<TemperatureReading>, SenseBoxError> {
    let unreachable = |reason: String| SenseBoxError::StationUnreachable {
        id: station_id.to_string(),
        reason,
    };

    let url = build_box_url(&upstream.base_url, station_id);
    let response = fetcher
        .get(&url, &[], upstream.detail_timeout())
        .map_err(|e| unreachable(e.to_string()))?;

    if !response.is_ok() {
        return Err(unreachable(format!("HTTP {}", response.status)));
    }

    let detail = parse_box_detail(&response.body).map_err(|e| unreachable(e.to_string()))?;
    Ok(temperature_values(&detail))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    #[test]
    fn test_build_boxes_url() {
        assert_eq!(
            build_boxes_url("https://api.opensensemap.org"),
            "https://api.opensensemap.org/boxes/"
        );
        assert_eq!(
            build_boxes_url("https://api.opensensemap.org/"),
            "https://api.opensensemap.org/boxes/"
        );
    }

    #[test]
    fn test_build_box_url_interpolates_id() {
        assert_eq!(
            build_box_url("https://api.opensensemap.org", "5b8449037c519100190fc728"),
            "https://api.opensensemap.org/boxes/5b8449037c519100190fc728"
        );
    }

    #[test]
    fn test_build_box_url_encodes_path_characters() {
        let url = build_box_url("http://localhost", "a/b c");
        assert_eq!(url, "http://localhost/boxes/a%2Fb%20c");
    }

    #[test]
    fn test_parse_boxes_listing() {
        let boxes = parse_boxes_response(fixture_berlin_boxes_json()).unwrap();
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].id, "5b8449037c519100190fc728");
        assert_eq!(
            boxes[0].last_measurement_at.as_deref(),
            Some("2024-05-01T11:58:12.417Z")
        );
        // Box that has never reported
        assert!(boxes[2].last_measurement_at.is_none());
    }

    #[test]
    fn test_parse_boxes_rejects_object_body() {
        let result = parse_boxes_response(r#"{"code": "UnprocessableEntity"}"#);
        assert!(matches!(result, Err(SenseBoxError::Decode(_))));
    }

    #[test]
    fn test_parse_boxes_accepts_plain_id_and_null_timestamp() {
        let boxes = parse_boxes_response(
            r#"[{"id": "a"}, {"id": "b", "lastMeasurementAt": null}]"#,
        )
        .unwrap();
        assert_eq!(boxes[0].id, "a");
        assert!(boxes[0].last_measurement_at.is_none());
        assert_eq!(boxes[1].id, "b");
        assert!(boxes[1].last_measurement_at.is_none());
    }

    #[test]
    fn test_parse_boxes_accepts_both_id_fields() {
        let boxes = parse_boxes_response(
            r#"[{"_id": "a", "id": "a", "lastMeasurementAt": "2024-05-01T12:00:00.000Z"}]"#,
        )
        .unwrap();
        assert_eq!(
            boxes,
            vec![StationDescriptor {
                id: "a".to_string(),
                last_measurement_at: Some("2024-05-01T12:00:00.000Z".to_string()),
            }]
        );
    }

    #[test]
    fn test_parse_boxes_skips_entry_without_id() {
        let boxes = parse_boxes_response(
            r#"[
              {"_id": "a", "lastMeasurementAt": "2024-05-01T12:00:00.000Z"},
              {"name": "no id"},
              {"_id": 42},
              {"_id": "b"}
            ]"#,
        )
        .unwrap();
        let ids: Vec<&str> = boxes.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_boxes_keeps_non_string_timestamp() {
        let boxes = parse_boxes_response(r#"[{"_id": "a", "lastMeasurementAt": 1714564800000}]"#)
            .unwrap();
        assert_eq!(boxes[0].last_measurement_at.as_deref(), Some("1714564800000"));
    }

    #[test]
    fn test_temperature_values_from_detail() {
        let detail = parse_box_detail(fixture_box_detail_json()).unwrap();
        assert_eq!(temperature_values(&detail), vec![21.5]);
    }

    #[test]
    fn test_temperature_values_counts_every_temperature_sensor() {
        let detail = parse_box_detail(fixture_box_two_temperature_sensors_json()).unwrap();
        assert_eq!(temperature_values(&detail), vec![18.25, 19.0]);
    }

    #[test]
    fn test_temperature_values_without_temperature_sensor() {
        let detail = parse_box_detail(fixture_box_without_temperature_json()).unwrap();
        assert!(temperature_values(&detail).is_empty());
    }

    #[test]
    fn test_temperature_values_skips_missing_and_garbage_values() {
        let detail = parse_box_detail(
            r#"{
              "_id": "x",
              "sensors": [
                { "title": "Temperature" },
                { "title": "Temperature", "lastMeasurement": null },
                { "title": "Temperature", "lastMeasurement": { "value": "n/a" } },
                { "title": "Temperature", "lastMeasurement": { "value": "-3.75" } },
                { "title": "temperature", "lastMeasurement": { "value": "99" } }
              ]
            }"#,
        )
        .unwrap();
        assert_eq!(temperature_values(&detail), vec![-3.75]);
    }

    #[test]
    fn test_temperature_values_ignores_untitled_sibling() {
        let detail = parse_box_detail(
            r#"{
              "_id": "x",
              "sensors": [
                { "unit": "µg/m³", "lastMeasurement": { "value": "12" } },
                { "title": "Temperature", "lastMeasurement": { "value": "17.5" } }
              ]
            }"#,
        )
        .unwrap();
        assert_eq!(temperature_values(&detail), vec![17.5]);
    }
}

/// Test fixtures: representative JSON payloads from the openSenseMap API.
///
/// These fixtures are structurally faithful but truncated to the fields
/// needed to exercise the parsers. They reflect the real envelopes returned
/// by:
///   https://api.opensensemap.org/boxes/?bbox=...
///   https://api.opensensemap.org/boxes/{id}
///
/// Box listing shape:
///   []
///     ._id               — opaque box id (string)
///     .lastMeasurementAt — "YYYY-MM-DDTHH:MM:SS.mmmZ", absent for boxes
///                          that never reported
///
/// Box detail shape:
///   .sensors[]
///     .title                  — sensor label, e.g. "Temperature"
///     .unit                   — e.g. "°C"
///     .lastMeasurement.value  — the measurement as a STRING
///
/// Note: measurement values are JSON strings even though they represent
/// numbers. Parsers must handle this.

/// Three boxes inside the Berlin bbox: two that have reported and one
/// brand-new box with no `lastMeasurementAt`.
#[cfg(test)]
pub(crate) fn fixture_berlin_boxes_json() -> &'static str {
    r#"[
      {
        "_id": "5b8449037c519100190fc728",
        "name": "Kreuzberg Balkon",
        "exposure": "outdoor",
        "model": "homeV2Wifi",
        "currentLocation": {
          "type": "Point",
          "coordinates": [13.4132, 52.4987]
        },
        "lastMeasurementAt": "2024-05-01T11:58:12.417Z"
      },
      {
        "_id": "5d6e1a2b30bde6001a9b5e12",
        "name": "Pankow Garten",
        "exposure": "outdoor",
        "model": "homeV2Lora",
        "currentLocation": {
          "type": "Point",
          "coordinates": [13.4011, 52.5694]
        },
        "lastMeasurementAt": "2024-04-29T07:01:00.000Z"
      },
      {
        "_id": "60f1c3a2b1e0c4001b8d2f77",
        "name": "Neukölln Test",
        "exposure": "indoor",
        "model": "custom",
        "currentLocation": {
          "type": "Point",
          "coordinates": [13.4367, 52.4811]
        }
      }
    ]"#
}

/// A senseBox:home with one temperature sensor at 21.5 °C alongside the
/// usual humidity / pressure / PM sensors.
#[cfg(test)]
pub(crate) fn fixture_box_detail_json() -> &'static str {
    r#"{
      "_id": "5b8449037c519100190fc728",
      "name": "Kreuzberg Balkon",
      "exposure": "outdoor",
      "sensors": [
        {
          "_id": "5b8449037c519100190fc72d",
          "title": "Temperature",
          "unit": "°C",
          "sensorType": "HDC1080",
          "lastMeasurement": { "value": "21.5", "createdAt": "2024-05-01T11:58:12.417Z" }
        },
        {
          "_id": "5b8449037c519100190fc72c",
          "title": "rel. Luftfeuchte",
          "unit": "%",
          "sensorType": "HDC1080",
          "lastMeasurement": { "value": "48.13", "createdAt": "2024-05-01T11:58:12.417Z" }
        },
        {
          "_id": "5b8449037c519100190fc72b",
          "title": "Luftdruck",
          "unit": "hPa",
          "sensorType": "BMP280",
          "lastMeasurement": { "value": "1011.62", "createdAt": "2024-05-01T11:58:12.417Z" }
        },
        {
          "_id": "5b8449037c519100190fc72a",
          "title": "PM10",
          "unit": "µg/m³",
          "sensorType": "SDS 011"
        }
      ]
    }"#
}

/// A box carrying two sensors titled "Temperature" (e.g. inside and
/// outside probes). Both values count as independent readings.
#[cfg(test)]
pub(crate) fn fixture_box_two_temperature_sensors_json() -> &'static str {
    r#"{
      "_id": "5d6e1a2b30bde6001a9b5e12",
      "name": "Pankow Garten",
      "sensors": [
        {
          "title": "Temperature",
          "unit": "°C",
          "lastMeasurement": { "value": "18.25", "createdAt": "2024-05-01T11:50:00.000Z" }
        },
        {
          "title": "Temperature",
          "unit": "°C",
          "lastMeasurement": { "value": "19.00", "createdAt": "2024-05-01T11:50:00.000Z" }
        }
      ]
    }"#
}

/// Air-quality-only box: no temperature sensor at all.
#[cfg(test)]
pub(crate) fn fixture_box_without_temperature_json() -> &'static str {
    r#"{
      "_id": "60f1c3a2b1e0c4001b8d2f77",
      "name": "Neukölln Test",
      "sensors": [
        {
          "title": "PM2.5",
          "unit": "µg/m³",
          "lastMeasurement": { "value": "7.40", "createdAt": "2024-05-01T11:40:00.000Z" }
        }
      ]
    }"#
}

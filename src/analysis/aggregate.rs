/// Combines collected readings into the single reported average.

use crate::model::TemperatureReading;

/// Mean of `readings` rounded to 2 decimal places.
///
/// Returns exactly `0.0` for an empty slice; callers read that as "no data
/// available". Rounding applies `f64::round` (half away from zero) to the
/// `f64` product `mean * 100.0`, so a decimal tie whose product lands just
/// below `.5` rounds down: `1.005` becomes `1.0`.
pub fn aggregate(readings: &[TemperatureReading]) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }

    let mean = readings.iter().sum::<f64>() / readings.len() as f64;
    round_to_hundredths(mean)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

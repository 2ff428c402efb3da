//! Human-readable duration and byte-volume formatting for report cells.

const SECS_PER_DAY: u64 = 86_400;
const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// Decompose seconds into days, hours, minutes, and seconds
/// (e.g. `800000` → `"9d 6h 13m 20s"`).
pub fn fmt_uptime(secs: u64) -> String {
    let days = secs / SECS_PER_DAY;
    let hours = (secs % SECS_PER_DAY) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s")
}

/// Decimal gigabytes (10^9 bytes) rounded to two places.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn usage_gigabytes(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_GB * 100.0).round() / 100.0
}

/// Plain decimal text with at least one fractional digit: `0.0`, `1.5`, `12.34`.
pub fn fmt_gigabytes(gb: f64) -> String {
    if gb.fract().abs() < f64::EPSILON {
        format!("{gb:.1}")
    } else {
        gb.to_string()
    }
}

use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Formats seconds since the Unix epoch as an ISO-8601 UTC string ending in `Z`.
///
/// Sub-second precision is rounded to the nearest microsecond and printed with
/// six digits; a whole second prints no fractional part at all.
pub fn to_iso8601_utc(epoch: f64) -> Result<String, AppError> {
    if !epoch.is_finite() {
        return Err(AppError::Timestamp(epoch));
    }

    let mut seconds = epoch.floor();
    let mut micros = ((epoch - seconds) * MICROS_PER_SECOND).round();
    if micros >= MICROS_PER_SECOND {
        seconds += 1.0;
        micros = 0.0;
    }

    let datetime = DateTime::<Utc>::from_timestamp(seconds as i64, micros as u32 * 1_000)
        .ok_or(AppError::Timestamp(epoch))?;

    let formatted = if micros == 0.0 {
        datetime.format("%Y-%m-%dT%H:%M:%SZ")
    } else {
        datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ")
    };
    Ok(formatted.to_string())
}

/// Converts a filesystem time into fractional epoch seconds, negative before 1970.
pub fn epoch_seconds(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    }
}

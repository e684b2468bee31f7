// Bucket clock and IST calendar helpers.
// All observers with synchronised clocks derive the same bucket for the same
// 5-second window, so no network round-trip is needed to agree on values.

use chrono::{DateTime, Datelike, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Width of the global synchronisation bucket (ms).
pub const BUCKET_MS: u64 = 5_000;

/// India Standard Time, UTC+05:30. Fixed; never looked up at runtime.
pub const IST_OFFSET_MS: i64 = 19_800_000;

const MS_PER_SECOND: i64 = 1_000;
const SECONDS_PER_DAY: i64 = 86_400;
const MS_PER_DAY: i64 = MS_PER_SECOND * SECONDS_PER_DAY;

fn width_as_i64(width_ms: u64) -> i64 {
    i64::try_from(width_ms).unwrap_or(i64::MAX).max(1)
}

/// Lower bucket boundary for `now_ms` (floor toward negative infinity).
///
/// Saturates at `i64::MIN` when the true boundary is not representable.
pub fn current_bucket(now_ms: i64, width_ms: u64) -> i64 {
    let w = width_as_i64(width_ms);
    now_ms.div_euclid(w).saturating_mul(w)
}

/// Time from `now_ms` until the next bucket boundary; always in (0, width].
pub fn delay_until_next_boundary(now_ms: i64, width_ms: u64) -> Duration {
    let w = width_as_i64(width_ms);
    let next = current_bucket(now_ms, width_ms).saturating_add(w);
    let delay = next.saturating_sub(now_ms).clamp(1, w);
    Duration::from_millis(delay as u64)
}

/// Wall clock as epoch ms. A clock set before the epoch gives a negative value.
pub fn now_ms() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
        Err(e) => {
            tracing::warn!(
                error = %e,
                operation = "get_timestamp",
                "system clock is before the epoch"
            );
            i64::try_from(e.duration().as_millis()).map_or(i64::MIN, |ms| -ms)
        }
    }
}

fn ist_shifted(ms: i64) -> i64 {
    ms.saturating_add(IST_OFFSET_MS)
}

/// `YYYY-MM-DD` in IST. Outside chrono's calendar range, `d<day number>`.
pub fn ist_day_key(ms: i64) -> String {
    let shifted = ist_shifted(ms);
    match DateTime::<Utc>::from_timestamp_millis(shifted) {
        Some(d) => format!("{}-{:02}-{:02}", d.year(), d.month(), d.day()),
        None => format!("d{}", shifted.div_euclid(MS_PER_DAY)),
    }
}

/// `YYYY-MM` in IST. Outside chrono's calendar range, `m<day number / 30>`.
pub fn ist_month_key(ms: i64) -> String {
    let shifted = ist_shifted(ms);
    match DateTime::<Utc>::from_timestamp_millis(shifted) {
        Some(d) => format!("{}-{:02}", d.year(), d.month()),
        None => format!("m{}", shifted.div_euclid(MS_PER_DAY).div_euclid(30)),
    }
}

/// Fraction of the IST day elapsed, in [0, 1). Whole seconds only.
pub fn ist_fraction_of_day(ms: i64) -> f64 {
    let secs = ist_shifted(ms)
        .div_euclid(MS_PER_SECOND)
        .rem_euclid(SECONDS_PER_DAY);
    secs as f64 / SECONDS_PER_DAY as f64
}

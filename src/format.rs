// Display formatting for metric values and the screen-reader summary.
// Invalid values render as a dash; they never abort rendering of the rest.

use crate::error::MetricError;
use crate::models::{MetricKey, MetricKind, Snapshot};
use crate::snapshot_builder::round_half_up;

/// Placeholder for missing or non-finite values.
pub const PLACEHOLDER: &str = "—";

/// Inserts `,` thousands separators into the integer part of a plain
/// decimal string (optionally signed, optionally with a fraction).
fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", s),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Fractional digits that print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Rounds the unsigned decimal text `decimal` to `digits` fractional digits,
/// ties away from zero, and prefixes the sign unless the result is zero.
fn round_decimal(decimal: &str, negative: bool, digits: usize) -> String {
    let (int_part, frac_part) = decimal.split_once('.').unwrap_or((decimal, ""));
    let frac = frac_part.as_bytes();

    let mut kept: Vec<u8> = int_part.bytes().collect();
    kept.extend((0..digits).map(|i| frac.get(i).copied().unwrap_or(b'0')));
    if frac.get(digits).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    // "-0.00" reads as noise on a ticker.
    if negative && kept.iter().any(|&d| d != b'0') {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|&d| char::from(d)));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|&d| char::from(d)));
    }
    out
}

/// Browser `toFixed`: the tie is decided on the exact binary value, so
/// `1.005` (stored just below the tie) gives `"1.00"`.
fn fixed(n: f64, digits: usize) -> String {
    let exact = format!("{:.*}", digits.max(EXACT_FRACTION_DIGITS) + 1, n.abs());
    round_decimal(&exact, n.is_sign_negative(), digits)
}

/// Browser locale formatting: rounds the shortest decimal that reads back
/// as `n`, so `1.005` gives `"1.01"`.
fn locale_fixed(n: f64, digits: usize) -> String {
    round_decimal(&n.abs().to_string(), n.is_sign_negative(), digits)
}

/// Formats `n` by metric kind: integers round half up, floats keep two
/// decimals. Both use thousands grouping.
pub fn format_value(n: f64, kind: MetricKind) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    match kind {
        MetricKind::Int => group_thousands(&locale_fixed(round_half_up(n), 0)),
        MetricKind::Float => group_thousands(&locale_fixed(n, 2)),
    }
}

/// Fixed-precision formatting without grouping; dash on invalid input.
pub fn safe_to_fixed(n: Option<f64>, digits: usize) -> String {
    match n {
        Some(v) if v.is_finite() => fixed(v, digits),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Rounded, grouped integer; dash on invalid input.
pub fn safe_int(n: Option<f64>) -> String {
    match n {
        Some(v) if v.is_finite() => format_value(v, MetricKind::Int),
        _ => PLACEHOLDER.to_string(),
    }
}

fn finite_value(snapshot: &Snapshot, key: MetricKey) -> Result<f64, MetricError> {
    let value = snapshot.value(key).ok_or(MetricError::Missing { key })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MetricError::NotFinite { key, value })
    }
}

fn summary_field(snapshot: &Snapshot, key: MetricKey) -> Option<f64> {
    match finite_value(snapshot, key) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(error = %e, operation = "accessibility_summary", "metric placeholder");
            None
        }
    }
}

/// One-sentence status for screen readers. A bad field turns into a dash;
/// the other fields still render.
pub fn accessibility_summary(snapshot: &Snapshot) -> String {
    let field = |key| summary_field(snapshot, key);
    let uptime = safe_to_fixed(field(MetricKey::Uptime), 2);
    let deployments = safe_int(field(MetricKey::Deployments));
    let onprem = safe_int(field(MetricKey::Onprem));
    let edge = safe_int(field(MetricKey::Edge));
    let work_orders = safe_int(field(MetricKey::WorkOrders));
    let latency = safe_int(field(MetricKey::Latency));
    format!(
        "Status: {deployments} active deployments across {onprem} on-prem sites and {edge} edge gateways, \
         {work_orders} work orders processed today, average edge latency {latency} milliseconds, \
         SLA uptime {uptime} percent."
    )
}

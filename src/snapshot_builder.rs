// Snapshot builder: month/day/bucket seeded tiers plus a diurnal easing curve,
// composed into a bounded, presentable set of metrics.
//
// Draw order from each generator is part of the cross-client contract; adding
// a draw in the middle changes every value after it.

use std::f64::consts::{PI, TAU};

use crate::clock::{BUCKET_MS, ist_day_key, ist_fraction_of_day, ist_month_key};
use crate::generator::{Sfc32, rng_from_seed};
use crate::models::{MetricItem, MetricKey, Snapshot};

/// Seed namespace shared by every client.
const SEED_NAMESPACE: &str = "pivotr";

pub const DEPLOYMENTS_RANGE: (f64, f64) = (3.0, 10.0);
pub const UPTIME_RANGE: (f64, f64) = (99.3, 99.85);
pub const LATENCY_RANGE: (f64, f64) = (110.0, 190.0);

/// Work orders stay at zero until this fraction of the IST day.
pub const WORK_DAY_START: f64 = 0.18;
/// Fraction of the day over which work orders ramp to the daily target.
const WORK_DAY_SPAN: f64 = 0.72;

/// Seed keys for one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedKeys {
    pub bucket: String,
    pub day: String,
    pub month: String,
}

impl SeedKeys {
    pub fn for_bucket(bucket_ms: i64) -> Self {
        Self {
            bucket: format!("{SEED_NAMESPACE}|bucket|{bucket_ms}"),
            day: format!("{SEED_NAMESPACE}|day|{}", ist_day_key(bucket_ms)),
            month: format!("{SEED_NAMESPACE}|month|{}", ist_month_key(bucket_ms)),
        }
    }
}

/// The three generator tiers used for one build.
pub struct Tiers {
    pub bucket: Sfc32,
    pub day: Sfc32,
    pub month: Sfc32,
}

impl Tiers {
    pub fn for_bucket(bucket_ms: i64) -> Self {
        let keys = SeedKeys::for_bucket(bucket_ms);
        Self {
            bucket: rng_from_seed(&keys.bucket),
            day: rng_from_seed(&keys.day),
            month: rng_from_seed(&keys.month),
        }
    }
}

pub fn clamp(n: f64, min: f64, max: f64) -> f64 {
    n.max(min).min(max)
}

pub fn clamp01(n: f64) -> f64 {
    clamp(n, 0.0, 1.0)
}

/// Sine-based ease-in-out over [0, 1].
pub fn ease_in_out_sine(t: f64) -> f64 {
    0.5 - 0.5 * (PI * clamp01(t)).cos()
}

/// Daily work-order progress for a given IST fraction of day.
pub fn work_order_progress(fraction_of_day: f64) -> f64 {
    ease_in_out_sine(clamp01((fraction_of_day - WORK_DAY_START) / WORK_DAY_SPAN))
}

/// Rounds half up, matching how browsers round display integers.
pub fn round_half_up(n: f64) -> f64 {
    let f = n.floor();
    if n - f >= 0.5 { f + 1.0 } else { f }
}

/// Builds the snapshot for `bucket_ms`. Pure: equal input gives equal output.
pub fn build_snapshot(bucket_ms: i64) -> Snapshot {
    let fraction = ist_fraction_of_day(bucket_ms);
    build_with_tiers(bucket_ms, Tiers::for_bucket(bucket_ms), fraction)
}

/// Builds from explicit tiers and time of day. Lets callers hold one tier
/// fixed while varying another.
pub fn build_with_tiers(bucket_ms: i64, tiers: Tiers, fraction_of_day: f64) -> Snapshot {
    let Tiers {
        bucket: mut rng_bucket,
        day: mut rng_day,
        month: mut rng_month,
    } = tiers;

    let onprem_sites = 2.0 + (rng_month.next_f64() * 4.0).floor();
    let edge_gateways = 1.0 + (rng_month.next_f64() * 3.0).floor();
    let deployments = clamp(
        onprem_sites + edge_gateways + (rng_bucket.next_f64() * 2.0).floor(),
        DEPLOYMENTS_RANGE.0,
        DEPLOYMENTS_RANGE.1,
    );

    let modules = deployments * (1.0 + (rng_month.next_f64() * 3.0).floor());

    let sla_daily = 99.35 + rng_day.next_f64() * 0.5;
    let uptime = clamp(
        sla_daily + (rng_bucket.next_f64() - 0.5) * 0.08,
        UPTIME_RANGE.0,
        UPTIME_RANGE.1,
    );

    let progress = work_order_progress(fraction_of_day);
    let target_total = 60.0 + (rng_day.next_f64() * 240.0).floor();
    let work_orders = (target_total * progress).floor().max(0.0);

    let base_latency = 145.0 + (TAU * fraction_of_day).sin() * 12.0;
    let latency = round_half_up(clamp(
        base_latency + (rng_bucket.next_f64() - 0.5) * 16.0,
        LATENCY_RANGE.0,
        LATENCY_RANGE.1,
    ));

    let metrics = vec![
        MetricItem::int(MetricKey::Deployments, "Active Deployments", deployments),
        MetricItem::int(MetricKey::Onprem, "On-prem Sites", onprem_sites),
        MetricItem::int(MetricKey::Edge, "Edge Gateways", edge_gateways),
        MetricItem::int(MetricKey::WorkOrders, "Work Orders (Today)", work_orders),
        MetricItem::int(MetricKey::Modules, "Modules Enabled", modules),
        MetricItem::int(MetricKey::Latency, "Edge Latency (India)", latency).with_suffix("ms"),
        MetricItem::float(MetricKey::Uptime, "Uptime (90d)", uptime).with_suffix("%"),
    ];

    Snapshot {
        generated_at: bucket_ms,
        bucket_ms: BUCKET_MS,
        metrics,
    }
}

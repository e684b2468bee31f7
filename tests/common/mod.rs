// Shared test helpers

#![allow(dead_code)]

use opsticker::generator::rng_from_seed;
use opsticker::models::*;
use opsticker::ticker::TickerView;
use opsticker::worker::FrameSink;

/// 2023-11-14T22:13:20Z, early morning of 2023-11-15 in IST.
pub const REFERENCE_BUCKET: i64 = 1_700_000_000_000;

pub fn sample_snapshot(generated_at: i64) -> Snapshot {
    Snapshot {
        generated_at,
        bucket_ms: 5_000,
        metrics: vec![
            MetricItem::int(MetricKey::Deployments, "Active Deployments", 6.0),
            MetricItem::int(MetricKey::Onprem, "On-prem Sites", 4.0),
            MetricItem::int(MetricKey::Edge, "Edge Gateways", 2.0),
            MetricItem::int(MetricKey::WorkOrders, "Work Orders (Today)", 1_234.0),
            MetricItem::int(MetricKey::Modules, "Modules Enabled", 12.0),
            MetricItem::int(MetricKey::Latency, "Edge Latency (India)", 142.0).with_suffix("ms"),
            MetricItem::float(MetricKey::Uptime, "Uptime (90d)", 99.567).with_suffix("%"),
        ],
    }
}

/// Same snapshot with one metric's value replaced.
pub fn with_value(mut snapshot: Snapshot, key: MetricKey, value: f64) -> Snapshot {
    if let Some(m) = snapshot.metrics.iter_mut().find(|m| m.key == key) {
        m.value = value;
    }
    snapshot
}

/// Deterministic timestamps spread over `span_days` starting at `start_ms`.
pub fn sample_timestamps(seed: &str, start_ms: i64, span_days: i64, n: usize) -> Vec<i64> {
    let mut rng = rng_from_seed(seed);
    let span_ms = span_days * 86_400_000;
    (0..n)
        .map(|_| start_ms + (rng.next_f64() * span_ms as f64) as i64)
        .collect()
}

/// Collects rendered frames in memory.
#[derive(Default)]
pub struct VecSink {
    pub frames: Vec<Vec<String>>,
    pub deployments_shown: Vec<f64>,
}

impl FrameSink for VecSink {
    fn draw(&mut self, view: &TickerView) -> anyhow::Result<()> {
        self.frames.push(view.render());
        if let Some(v) = view.displayed(MetricKey::Deployments) {
            self.deployments_shown.push(v);
        }
        Ok(())
    }
}

// Snapshot: the immutable metric set valid for one bucket

use serde::{Deserialize, Serialize};

use super::{MetricItem, MetricKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Bucket start (epoch ms) the metrics were generated for.
    pub generated_at: i64,
    /// Bucket width in ms.
    pub bucket_ms: u64,
    /// Declaration order is significant; renderers iterate it as-is.
    pub metrics: Vec<MetricItem>,
}

impl Snapshot {
    pub fn get(&self, key: MetricKey) -> Option<&MetricItem> {
        self.metrics.iter().find(|m| m.key == key)
    }

    pub fn value(&self, key: MetricKey) -> Option<f64> {
        self.get(key).map(|m| m.value)
    }
}

// Domain models: metric items and per-bucket snapshots

mod metric;
mod snapshot;

pub use metric::{MetricItem, MetricKey, MetricKind};
pub use snapshot::Snapshot;

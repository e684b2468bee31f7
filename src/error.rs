// Typed lookup errors for formatting; absorbed into a placeholder by callers.

use thiserror::Error;

use crate::models::MetricKey;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("metric {key} missing from snapshot")]
    Missing { key: MetricKey },
    #[error("metric {key} is not finite: {value}")]
    NotFinite { key: MetricKey, value: f64 },
}

// Ticker metric item: one reading for the current bucket

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable metric identifier; serializes to camelCase JSON (e.g. "workOrders").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    Deployments,
    Onprem,
    Edge,
    WorkOrders,
    Modules,
    Latency,
    Uptime,
}

impl MetricKey {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::Deployments => "deployments",
            MetricKey::Onprem => "onprem",
            MetricKey::Edge => "edge",
            MetricKey::WorkOrders => "workOrders",
            MetricKey::Modules => "modules",
            MetricKey::Latency => "latency",
            MetricKey::Uptime => "uptime",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display formatting class: integer rounding or two-decimal fixed float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Int,
    Float,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricItem {
    pub key: MetricKey,
    pub label: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: MetricKind,
    /// Unit shown after the value (e.g. "ms", "%").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl MetricItem {
    pub fn int(key: MetricKey, label: &str, value: f64) -> Self {
        Self {
            key,
            label: label.to_string(),
            value,
            kind: MetricKind::Int,
            suffix: None,
        }
    }

    pub fn float(key: MetricKey, label: &str, value: f64) -> Self {
        Self {
            kind: MetricKind::Float,
            ..Self::int(key, label, value)
        }
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_string());
        self
    }
}

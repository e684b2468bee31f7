// Model serialization tests (JSON camelCase, "type" tag, optional suffix)

mod common;

use opsticker::models::*;

#[test]
fn test_metric_item_serializes_type_and_camel_case_key() {
    let item = MetricItem::int(MetricKey::WorkOrders, "Work Orders (Today)", 42.0);
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["key"], "workOrders");
    assert_eq!(json["type"], "int");
    assert_eq!(json["label"], "Work Orders (Today)");
    assert!(json.get("suffix").is_none());
}

#[test]
fn test_metric_item_with_suffix() {
    let item = MetricItem::float(MetricKey::Uptime, "Uptime (90d)", 99.5).with_suffix("%");
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["type"], "float");
    assert_eq!(json["suffix"], "%");
    let back: MetricItem = serde_json::from_value(json).unwrap();
    assert_eq!(back, item);
}

#[test]
fn test_snapshot_serializes_camel_case() {
    let snapshot = common::sample_snapshot(common::REFERENCE_BUCKET);
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"generatedAt\":1700000000000"));
    assert!(json.contains("\"bucketMs\":5000"));
    assert!(json.contains("\"key\":\"onprem\""));
}

#[test]
fn test_snapshot_lookup_by_key() {
    let snapshot = common::sample_snapshot(0);
    assert_eq!(snapshot.value(MetricKey::Latency), Some(142.0));
    assert_eq!(
        snapshot.get(MetricKey::Uptime).and_then(|m| m.suffix.as_deref()),
        Some("%")
    );
    let mut trimmed = snapshot.clone();
    trimmed.metrics.retain(|m| m.key != MetricKey::Edge);
    assert!(trimmed.get(MetricKey::Edge).is_none());
}

#[test]
fn test_metric_key_display_matches_wire_name() {
    for key in [
        MetricKey::Deployments,
        MetricKey::Onprem,
        MetricKey::Edge,
        MetricKey::WorkOrders,
        MetricKey::Modules,
        MetricKey::Latency,
        MetricKey::Uptime,
    ] {
        let json = serde_json::to_value(key).unwrap();
        assert_eq!(json, key.to_string());
    }
}

// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::time::{Duration, SystemTime};

use meterlink_core::{MeterData, MeterId, MeterKind, MeterSnapshot, Tag, TimeUnit};
use meterlink_emf::{Emf, EmfPublisher};

fn at() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs_f64(12345.6789)
}

#[test]
fn timer_document_shape() {
    let emf = Emf::new("MyApp");
    let snapshot = MeterSnapshot::new(
        MeterId::new("http.requests", MeterKind::Timer)
            .with_base_unit(TimeUnit::Milliseconds)
            .with_tags(vec![Tag::new("method", "GET")]),
        MeterData::Timer {
            count: 2,
            mean: 250.0,
            total: 500.0,
            max: 300.5,
            unit: TimeUnit::Milliseconds,
        },
    );

    let document = emf.document(&snapshot, at()).unwrap();
    assert_json_diff::assert_json_eq!(
        document,
        serde_json::json!({
            "_aws": {
                "CloudWatchMetrics": [{
                    "Namespace": "MyApp",
                    "Dimensions": [["method"]],
                    "Metrics": [
                        {"Name": "http.requests.count", "Unit": "Count"},
                        {"Name": "http.requests.avg", "Unit": "Milliseconds"},
                        {"Name": "http.requests.totalTime", "Unit": "Milliseconds"},
                        {"Name": "http.requests.max", "Unit": "Milliseconds"}
                    ]
                }],
                "Timestamp": 12345678
            },
            "http.requests.count": 2,
            "http.requests.avg": 250,
            "http.requests.totalTime": 500,
            "http.requests.max": 300.5,
            "method": "GET"
        })
    );
}

#[test]
fn counter_document_shape() {
    let emf = Emf::new("MyApp");
    let snapshot = MeterSnapshot::new(
        MeterId::new("cache.evictions", MeterKind::Counter),
        MeterData::Counter { count: 7.0 },
    );

    let document = emf.document(&snapshot, at()).unwrap();
    assert_json_diff::assert_json_eq!(
        document,
        serde_json::json!({
            "_aws": {
                "CloudWatchMetrics": [{
                    "Namespace": "MyApp",
                    "Dimensions": [[]],
                    "Metrics": [{"Name": "cache.evictions.throughput", "Unit": "Count"}]
                }],
                "Timestamp": 12345678
            },
            "cache.evictions.throughput": 7
        })
    );
}

#[test]
fn function_timer_omits_max() {
    let emf = Emf::new("MyApp");
    let snapshot = MeterSnapshot::new(
        MeterId::new("db.calls", MeterKind::FunctionTimer),
        MeterData::FunctionTimer {
            count: 4.0,
            mean: 1.5,
            total: 6.0,
            unit: TimeUnit::Seconds,
        },
    );

    let document = emf.document(&snapshot, at()).unwrap();
    assert!(document.get("db.calls.max").is_none());
    assert_eq!(document["db.calls.avg"], serde_json::json!(1.5));
    assert_eq!(document["db.calls.totalTime"], serde_json::json!(6));
}

#[test]
fn generic_meter_keeps_only_finite_measurements() {
    use meterlink_core::{Measurement, Statistic};

    let emf = Emf::new("MyApp");
    let snapshot = MeterSnapshot::new(
        MeterId::new("custom", MeterKind::Other),
        MeterData::Other {
            measurements: vec![
                Measurement::new(Statistic::Value, 1.25),
                Measurement::new(Statistic::Total, f64::NAN),
            ],
        },
    );

    let document = emf.document(&snapshot, at()).unwrap();
    assert_eq!(document["custom.value"], serde_json::json!(1.25));
    assert!(document.get("custom.total").is_none());
}

#[test]
fn publisher_writes_parseable_lines() {
    let mut publisher = EmfPublisher::new("MyApp", Vec::new());
    let meters = vec![
        MeterSnapshot::new(
            MeterId::new("a", MeterKind::Counter),
            MeterData::Counter { count: 1.0 },
        ),
        MeterSnapshot::new(
            MeterId::new("g", MeterKind::Gauge),
            MeterData::Gauge { value: 2.5 },
        ),
    ];
    publisher.publish_at(&meters, at());

    let written = String::from_utf8(publisher.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = written
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["a.throughput"], serde_json::json!(1));
    assert_eq!(lines[1]["g.value"], serde_json::json!(2.5));
    assert_eq!(
        lines[1]["_aws"]["CloudWatchMetrics"][0]["Namespace"],
        serde_json::json!("MyApp")
    );
}

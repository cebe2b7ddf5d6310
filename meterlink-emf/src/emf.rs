// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::time::{Duration, SystemTime};

use meterlink_core::{
    AttributeValue, Identity, Measurement, MeterData, MeterSnapshot, NamingConvention, TimeUnit,
};
use serde_json::{Map, Value};

/// Serde declaration of EMF's MetricDirective type.
#[derive(serde::Serialize, Clone, Debug)]
pub struct MetricDirective<'a> {
    /// The namespace of the metrics to be emitted.
    #[serde(rename = "Namespace")]
    pub namespace: &'a str,
    /// A DimensionSet array containing the dimension sets the metrics are
    /// emitted at.
    #[serde(rename = "Dimensions")]
    pub dimensions: Vec<Vec<&'a str>>,
    /// The list of metrics to be emitted.
    #[serde(rename = "Metrics")]
    pub metrics: Vec<MetricDefinition<'a>>,
}

/// Serde declaration of EMF's MetricDefinition type.
#[derive(serde::Serialize, Copy, Clone, Debug)]
pub struct MetricDefinition<'a> {
    /// The name of the metric to be emitted.
    #[serde(rename = "Name")]
    pub name: &'a str,
    /// The CloudWatch unit of the metric, omitted when none applies.
    #[serde(rename = "Unit")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

/// One statistic extracted from a meter, before JSON assembly.
struct StatisticValue {
    suffix: &'static str,
    value: f64,
    unit: Option<&'static str>,
}

impl StatisticValue {
    fn new(suffix: &'static str, value: f64, unit: Option<&'static str>) -> Self {
        Self {
            suffix,
            value,
            unit,
        }
    }

    fn count(suffix: &'static str, value: f64) -> Self {
        Self::new(suffix, value, Some("Count"))
    }

    fn timed(suffix: &'static str, value: f64, unit: TimeUnit) -> Self {
        Self::new(suffix, value, cloudwatch_unit(unit))
    }
}

/// The CloudWatch unit name for a time unit, where CloudWatch models one.
///
/// CloudWatch has no nanosecond or calendar units; statistics in those units
/// are emitted without a unit declaration.
const fn cloudwatch_unit(unit: TimeUnit) -> Option<&'static str> {
    match unit {
        TimeUnit::Microseconds => Some("Microseconds"),
        TimeUnit::Milliseconds => Some("Milliseconds"),
        TimeUnit::Seconds => Some("Seconds"),
        TimeUnit::Nanoseconds | TimeUnit::Minutes | TimeUnit::Hours | TimeUnit::Days => None,
    }
}

/// Formats one meter snapshot as one EMF JSON log event.
///
/// Statistic keys are the convention-transformed meter name suffixed with the
/// statistic label (`http.requests.throughput` style); the meter's tag keys
/// form the dimension set. Meters with no finite statistic produce no output.
///
/// Non-finite handling follows CloudWatch constraints rather than the event
/// adapters: NaN statistics are skipped, infinities are clamped to
/// `±f64::MAX`.
#[derive(Debug, Clone)]
pub struct Emf<N = Identity> {
    namespace: String,
    naming: N,
}

impl Emf<Identity> {
    /// Create a formatter publishing under `namespace` with the identity
    /// naming convention.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_naming(namespace, Identity)
    }
}

impl<N: NamingConvention> Emf<N> {
    /// Create a formatter publishing under `namespace` with a vendor naming
    /// convention.
    pub fn with_naming(namespace: impl Into<String>, naming: N) -> Self {
        Self {
            namespace: namespace.into(),
            naming,
        }
    }

    /// The namespace metrics are published under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Format `snapshot` as one newline-terminated EMF log event.
    ///
    /// The event is buffered and written with a single `write_all`, so a
    /// failing destination never observes a partial line. Returns `false`
    /// without touching `output` when the meter has nothing to report.
    pub fn format(
        &self,
        snapshot: &MeterSnapshot,
        timestamp: SystemTime,
        output: &mut impl io::Write,
    ) -> io::Result<bool> {
        let Some(document) = self.document(snapshot, timestamp) else {
            return Ok(false);
        };
        let mut line = serde_json::to_vec(&document)?;
        line.push(b'\n');
        output.write_all(&line)?;
        Ok(true)
    }

    /// Build the EMF document for `snapshot`, or `None` when no finite
    /// statistic remains.
    pub fn document(&self, snapshot: &MeterSnapshot, timestamp: SystemTime) -> Option<Value> {
        let id = snapshot.id();
        let statistics = finite_statistics(statistics_for(snapshot.data()));
        if statistics.is_empty() {
            return None;
        }

        let name = id.convention_name(&self.naming);
        let tags = id.convention_tags(&self.naming);
        let keys: Vec<String> = statistics
            .iter()
            .map(|stat| format!("{name}.{}", stat.suffix))
            .collect();

        let directive = MetricDirective {
            namespace: &self.namespace,
            dimensions: vec![tags.iter().map(|tag| tag.key()).collect()],
            metrics: keys
                .iter()
                .zip(&statistics)
                .map(|(key, stat)| MetricDefinition {
                    name: key,
                    unit: stat.unit,
                })
                .collect(),
        };

        let mut root = Map::new();
        root.insert(
            "_aws".to_string(),
            serde_json::json!({
                "CloudWatchMetrics": [directive],
                "Timestamp": epoch_millis(timestamp),
            }),
        );
        for (key, stat) in keys.iter().zip(&statistics) {
            let value = serde_json::to_value(AttributeValue::from_number(stat.value))
                .expect("finite numbers always serialize");
            root.insert(key.clone(), value);
        }
        for tag in &tags {
            root.insert(tag.key().to_string(), Value::String(tag.value().to_string()));
        }
        Some(Value::Object(root))
    }
}

fn epoch_millis(timestamp: SystemTime) -> u64 {
    timestamp
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Drop NaN statistics and clamp infinities to the largest finite value.
fn finite_statistics(statistics: Vec<StatisticValue>) -> Vec<StatisticValue> {
    statistics
        .into_iter()
        .filter_map(|mut stat| {
            if stat.value.is_nan() {
                tracing::debug!(statistic = stat.suffix, "skipping NaN statistic");
                return None;
            }
            if stat.value.is_infinite() {
                stat.value = f64::MAX.copysign(stat.value);
            }
            Some(stat)
        })
        .collect()
}

fn statistics_for(data: &MeterData) -> Vec<StatisticValue> {
    match data {
        MeterData::Counter { count } | MeterData::FunctionCounter { count } => {
            vec![StatisticValue::count("throughput", *count)]
        }
        MeterData::Gauge { value } => vec![StatisticValue::new("value", *value, None)],
        MeterData::TimeGauge { value, unit } => {
            vec![StatisticValue::timed("value", *value, *unit)]
        }
        MeterData::Timer {
            count,
            mean,
            total,
            max,
            unit,
        } => vec![
            StatisticValue::count("count", *count as f64),
            StatisticValue::timed("avg", *mean, *unit),
            StatisticValue::timed("totalTime", *total, *unit),
            StatisticValue::timed("max", *max, *unit),
        ],
        MeterData::FunctionTimer {
            count,
            mean,
            total,
            unit,
        } => vec![
            StatisticValue::count("count", *count),
            StatisticValue::timed("avg", *mean, *unit),
            StatisticValue::timed("totalTime", *total, *unit),
        ],
        MeterData::DistributionSummary {
            count,
            mean,
            total,
            max,
        } => vec![
            StatisticValue::count("count", *count as f64),
            StatisticValue::new("avg", *mean, None),
            StatisticValue::new("total", *total, None),
            StatisticValue::new("max", *max, None),
        ],
        MeterData::LongTaskTimer {
            active_tasks,
            duration,
            unit,
        } => vec![
            StatisticValue::count("activeTasks", f64::from(*active_tasks)),
            StatisticValue::timed("duration", *duration, *unit),
        ],
        MeterData::Other { measurements } => measurements
            .iter()
            .map(|Measurement { statistic, value }| {
                StatisticValue::new(statistic.tag_value(), *value, None)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use meterlink_core::{MeterData, MeterId, MeterKind, MeterSnapshot, TimeUnit};
    use rstest::rstest;

    use super::{Emf, cloudwatch_unit};
    use std::time::{Duration, SystemTime};

    #[rstest]
    #[case(TimeUnit::Milliseconds, Some("Milliseconds"))]
    #[case(TimeUnit::Seconds, Some("Seconds"))]
    #[case(TimeUnit::Nanoseconds, None)]
    #[case(TimeUnit::Days, None)]
    fn unit_mapping(#[case] unit: TimeUnit, #[case] expected: Option<&'static str>) {
        assert_eq!(cloudwatch_unit(unit), expected);
    }

    #[test]
    fn nan_only_meter_has_no_document() {
        let emf = Emf::new("MyApp");
        let snapshot = MeterSnapshot::new(
            MeterId::new("g", MeterKind::Gauge),
            MeterData::Gauge { value: f64::NAN },
        );
        assert!(emf.document(&snapshot, SystemTime::UNIX_EPOCH).is_none());
    }

    #[test]
    fn infinity_is_clamped() {
        let emf = Emf::new("MyApp");
        let snapshot = MeterSnapshot::new(
            MeterId::new("g", MeterKind::Gauge),
            MeterData::Gauge {
                value: f64::INFINITY,
            },
        );
        let document = emf
            .document(&snapshot, SystemTime::UNIX_EPOCH)
            .expect("clamped, not skipped");
        assert_eq!(document["g.value"], serde_json::json!(f64::MAX));
    }

    #[test]
    fn timestamp_is_epoch_millis() {
        let emf = Emf::new("MyApp");
        let snapshot = MeterSnapshot::new(
            MeterId::new("c", MeterKind::Counter),
            MeterData::Counter { count: 1.0 },
        );
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs_f64(12345.6789);
        let document = emf.document(&snapshot, at).unwrap();
        assert_eq!(document["_aws"]["Timestamp"], serde_json::json!(12345678));
    }
}

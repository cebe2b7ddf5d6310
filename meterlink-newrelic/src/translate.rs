// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Translation of meter snapshots into New Relic event attribute maps.
//!
//! Each meter kind has a fixed set of attribute keys. Every numeric
//! statistic passes through the naming convention's key transform and the
//! whole-or-decimal split; non-finite statistics are silently dropped (with
//! one historical exception, see [`EventTranslator::write_summary`]).

use meterlink_core::{
    AttributeMap, AttributeValue, Measurement, MeterData, MeterId, MissingConfigError,
    NamingConvention, TimeUnit,
};
use meterlink_core::{Identity, MeterSnapshot};

use crate::config::NewRelicConfig;

/// Attribute key for counter throughput.
pub const THROUGHPUT: &str = "throughput";
/// Attribute key for gauge values.
pub const VALUE: &str = "value";
/// Attribute key for event counts.
pub const COUNT: &str = "count";
/// Attribute key for mean statistics.
pub const AVG: &str = "avg";
/// Attribute key for summary totals.
pub const TOTAL: &str = "total";
/// Attribute key for timer totals.
pub const TOTAL_TIME: &str = "totalTime";
/// Attribute key for maximum statistics.
pub const MAX: &str = "max";
/// Attribute key for the time unit label.
pub const TIME_UNIT: &str = "timeUnit";
/// Attribute key for the number of running long tasks.
pub const ACTIVE_TASKS: &str = "activeTasks";
/// Attribute key for accumulated long-task duration.
pub const DURATION: &str = "duration";
/// Contextual attribute key carrying the meter name.
pub const METRIC_NAME: &str = "metricName";
/// Contextual attribute key carrying the meter kind label.
pub const METRIC_TYPE: &str = "metricType";

/// Translates one meter snapshot at a time into the attribute map New Relic
/// receives with the custom event.
///
/// Stateless given its inputs: every call allocates a fresh [`AttributeMap`]
/// owned by the caller. Construction fails with [`MissingConfigError`] when
/// the config names no event type and per-meter event types are disabled.
#[derive(Debug, Clone)]
pub struct EventTranslator<N = Identity> {
    config: NewRelicConfig,
    naming: N,
}

impl EventTranslator<Identity> {
    /// Create a translator with the identity naming convention.
    pub fn new(config: NewRelicConfig) -> Result<Self, MissingConfigError> {
        Self::with_naming(config, Identity)
    }
}

impl<N: NamingConvention> EventTranslator<N> {
    /// Create a translator with a vendor naming convention.
    pub fn with_naming(config: NewRelicConfig, naming: N) -> Result<Self, MissingConfigError> {
        config.validate()?;
        Ok(Self { config, naming })
    }

    /// Dispatch a snapshot to the translator for its kind.
    pub fn translate(&self, snapshot: &MeterSnapshot) -> AttributeMap {
        let id = snapshot.id();
        match snapshot.data() {
            MeterData::Counter { count } | MeterData::FunctionCounter { count } => {
                self.write_counter(id, *count)
            }
            MeterData::Gauge { value } => self.write_gauge(id, *value),
            MeterData::TimeGauge { value, unit } => self.write_time_gauge(id, *value, *unit),
            MeterData::Timer {
                count,
                mean,
                total,
                max,
                unit,
            } => self.write_timer(id, *count, *mean, *total, *max, *unit),
            MeterData::FunctionTimer {
                count,
                mean,
                total,
                unit,
            } => self.write_function_timer(id, *count, *mean, *total, *unit),
            MeterData::DistributionSummary {
                count,
                mean,
                total,
                max,
            } => self.write_summary(id, *count, *mean, *total, *max),
            MeterData::LongTaskTimer {
                active_tasks,
                duration,
                unit,
            } => self.write_long_task_timer(id, *active_tasks, *duration, *unit),
            MeterData::Other { measurements } => self.write_meter(id, measurements),
        }
    }

    /// The event type this meter publishes under: the convention-transformed
    /// meter name in per-meter mode, otherwise the configured event type.
    pub fn event_type_for(&self, id: &MeterId) -> String {
        if self.config.meter_name_event_type() {
            id.convention_name(&self.naming)
        } else {
            // validated non-empty at construction
            self.config.event_type().unwrap_or_default().to_string()
        }
    }

    /// `{throughput}`, gated on a finite count. Shared by counters and
    /// function counters.
    pub fn write_counter(&self, id: &MeterId, count: f64) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        if count.is_finite() {
            self.put_number(&mut attributes, THROUGHPUT, count);
            self.add_context(id, &mut attributes);
        }
        attributes
    }

    /// `{value}`, gated on a finite value.
    pub fn write_gauge(&self, id: &MeterId, value: f64) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        if value.is_finite() {
            self.put_number(&mut attributes, VALUE, value);
            self.add_context(id, &mut attributes);
        }
        attributes
    }

    /// `{value, timeUnit}`, gated on a finite value.
    pub fn write_time_gauge(&self, id: &MeterId, value: f64, unit: TimeUnit) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        if value.is_finite() {
            self.put_number(&mut attributes, VALUE, value);
            self.put_text(&mut attributes, TIME_UNIT, unit.as_str());
            self.add_context(id, &mut attributes);
        }
        attributes
    }

    /// `{count, avg, total, max}`, always emitted.
    ///
    /// Known inconsistency: unlike every other meter kind, summary statistics
    /// are not gated on finiteness, so a NaN mean is forwarded as-is.
    /// Existing dashboards depend on the four attributes always being
    /// present, so the gate is deliberately not applied here.
    pub fn write_summary(
        &self,
        id: &MeterId,
        count: u64,
        mean: f64,
        total: f64,
        max: f64,
    ) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        self.put_integer(&mut attributes, COUNT, count as i64);
        self.put_number(&mut attributes, AVG, mean);
        self.put_number(&mut attributes, TOTAL, total);
        self.put_number(&mut attributes, MAX, max);
        self.add_context(id, &mut attributes);
        attributes
    }

    /// `{count, avg, totalTime, max, timeUnit}`. The count is always emitted
    /// on the integer branch.
    pub fn write_timer(
        &self,
        id: &MeterId,
        count: u64,
        mean: f64,
        total: f64,
        max: f64,
        unit: TimeUnit,
    ) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        self.put_integer(&mut attributes, COUNT, count as i64);
        self.put_number(&mut attributes, AVG, mean);
        self.put_number(&mut attributes, TOTAL_TIME, total);
        self.put_number(&mut attributes, MAX, max);
        self.put_text(&mut attributes, TIME_UNIT, unit.as_str());
        self.add_context(id, &mut attributes);
        attributes
    }

    /// `{count, avg, totalTime, timeUnit}` — function timers expose no max.
    /// The sampled count is truncated onto the integer branch.
    pub fn write_function_timer(
        &self,
        id: &MeterId,
        count: f64,
        mean: f64,
        total: f64,
        unit: TimeUnit,
    ) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        self.put_integer(&mut attributes, COUNT, count as i64);
        self.put_number(&mut attributes, AVG, mean);
        self.put_number(&mut attributes, TOTAL_TIME, total);
        self.put_text(&mut attributes, TIME_UNIT, unit.as_str());
        self.add_context(id, &mut attributes);
        attributes
    }

    /// `{activeTasks, duration, timeUnit}`.
    pub fn write_long_task_timer(
        &self,
        id: &MeterId,
        active_tasks: u32,
        duration: f64,
        unit: TimeUnit,
    ) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        self.put_integer(&mut attributes, ACTIVE_TASKS, i64::from(active_tasks));
        self.put_number(&mut attributes, DURATION, duration);
        self.put_text(&mut attributes, TIME_UNIT, unit.as_str());
        self.add_context(id, &mut attributes);
        attributes
    }

    /// One attribute per finite measurement, keyed by its statistic label.
    /// When every measurement is non-finite the result stays empty and the
    /// contextual attributes are skipped too.
    pub fn write_meter(&self, id: &MeterId, measurements: &[Measurement]) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        for measurement in measurements {
            if !measurement.value.is_finite() {
                continue;
            }
            self.put_number(
                &mut attributes,
                measurement.statistic.tag_value(),
                measurement.value,
            );
        }
        if attributes.is_empty() {
            return attributes;
        }
        self.add_context(id, &mut attributes);
        attributes
    }

    /// Contextual attributes appended to every non-empty map: `metricName`
    /// and `metricType` when all meters share one categorical event type,
    /// and the convention-transformed tag pairs in both modes.
    fn add_context(&self, id: &MeterId, attributes: &mut AttributeMap) {
        if !self.config.meter_name_event_type() {
            attributes.put(METRIC_NAME, id.convention_name(&self.naming));
            attributes.put(METRIC_TYPE, id.kind().as_str());
        }
        for tag in id.convention_tags(&self.naming) {
            attributes.put(tag.key(), tag.value());
        }
    }

    fn put_number(&self, attributes: &mut AttributeMap, key: &str, value: f64) {
        attributes.put(self.naming.tag_key(key), AttributeValue::from_number(value));
    }

    fn put_integer(&self, attributes: &mut AttributeMap, key: &str, value: i64) {
        attributes.put(self.naming.tag_key(key), AttributeValue::Integer(value));
    }

    fn put_text(&self, attributes: &mut AttributeMap, key: &str, value: &str) {
        attributes.put(
            self.naming.tag_key(key),
            AttributeValue::Text(self.naming.tag_value(value)),
        );
    }
}

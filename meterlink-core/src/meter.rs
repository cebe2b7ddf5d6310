// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Meter snapshots: the registry-facing data model consumed by the adapters.
//!
//! A registry hands each adapter a sequence of [`MeterSnapshot`]s per publish
//! tick. Every snapshot carries a [`MeterId`] (name, kind, tags, base time
//! unit) and a [`MeterData`] value with the statistics precomputed for that
//! kind. [`MeterData`] is a closed union: an adapter dispatching over it is
//! forced by the compiler to handle every kind.

use crate::naming::NamingConvention;
use crate::unit::TimeUnit;

/// The closed set of meter kinds an adapter must handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeterKind {
    /// A monotonically increasing count.
    Counter,
    /// An instantaneous value.
    Gauge,
    /// Event timing with count/mean/total/max statistics.
    Timer,
    /// A gauge reporting a time value in a fixed unit.
    TimeGauge,
    /// Sample distribution with count/mean/total/max statistics.
    DistributionSummary,
    /// Tracks tasks still running, reporting active count and duration.
    LongTaskTimer,
    /// A counter sampled from a monotonic function.
    FunctionCounter,
    /// A timer sampled from monotonic count/total functions; has no max.
    FunctionTimer,
    /// A custom meter exposing arbitrary named measurements.
    Other,
}

impl MeterKind {
    /// The label transmitted under the `metricType` contextual attribute.
    ///
    /// Function meters and time gauges report the label of the family they
    /// belong to, so only six distinct labels exist for the nine kinds.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Counter | Self::FunctionCounter => "COUNTER",
            Self::Gauge | Self::TimeGauge => "GAUGE",
            Self::Timer | Self::FunctionTimer => "TIMER",
            Self::DistributionSummary => "DISTRIBUTION_SUMMARY",
            Self::LongTaskTimer => "LONG_TASK_TIMER",
            Self::Other => "OTHER",
        }
    }
}

/// A single key/value pair attached to a meter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    key: String,
    value: String,
}

impl Tag {
    /// Create a tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The raw tag key, before any naming convention is applied.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw tag value, before any naming convention is applied.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Identifies one meter: name, kind, tag set, and optional base time unit.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterId {
    name: String,
    kind: MeterKind,
    tags: Vec<Tag>,
    base_unit: Option<TimeUnit>,
}

impl MeterId {
    /// Create an id without tags or a base unit.
    pub fn new(name: impl Into<String>, kind: MeterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            tags: Vec::new(),
            base_unit: None,
        }
    }

    /// Attach tags to the id.
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Attach the base time unit timer statistics are scaled to.
    pub fn with_base_unit(mut self, unit: TimeUnit) -> Self {
        self.base_unit = Some(unit);
        self
    }

    /// The raw meter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The meter kind.
    pub fn kind(&self) -> MeterKind {
        self.kind
    }

    /// The raw tag set.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The base time unit, for timer-flavored meters.
    pub fn base_unit(&self) -> Option<TimeUnit> {
        self.base_unit
    }

    /// The meter name as transformed by `naming`.
    pub fn convention_name(&self, naming: &impl NamingConvention) -> String {
        naming.name(&self.name, self.kind)
    }

    /// The tag set with keys and values transformed by `naming`.
    pub fn convention_tags(&self, naming: &impl NamingConvention) -> Vec<Tag> {
        self.tags
            .iter()
            .map(|tag| Tag::new(naming.tag_key(tag.key()), naming.tag_value(tag.value())))
            .collect()
    }
}

/// The statistic behind one generic [`Measurement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// A running total.
    Total,
    /// A running total of time.
    TotalTime,
    /// An event count.
    Count,
    /// A maximum.
    Max,
    /// An instantaneous value.
    Value,
    /// Number of currently active tasks.
    ActiveTasks,
    /// Accumulated duration of active tasks.
    Duration,
    /// A statistic this model doesn't recognize.
    Unknown,
}

impl Statistic {
    /// The camelCase label used as the attribute key for a generic measurement.
    pub const fn tag_value(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::TotalTime => "totalTime",
            Self::Count => "count",
            Self::Max => "max",
            Self::Value => "value",
            Self::ActiveTasks => "activeTasks",
            Self::Duration => "duration",
            Self::Unknown => "unknown",
        }
    }
}

/// One named sample from a generic meter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// The statistic this sample reports.
    pub statistic: Statistic,
    /// The sampled value. May be non-finite; adapters filter.
    pub value: f64,
}

impl Measurement {
    /// Create a measurement.
    pub fn new(statistic: Statistic, value: f64) -> Self {
        Self { statistic, value }
    }
}

/// Per-kind statistics for one meter at one publish tick.
///
/// Values arrive precomputed by the registry: timer statistics are already
/// scaled to the id's base unit, counters already hold the delta or total
/// their registry semantics prescribe. This layer only copies them out.
#[derive(Debug, Clone, PartialEq)]
pub enum MeterData {
    /// Statistics of a [`MeterKind::Counter`].
    Counter {
        /// Events counted in this interval.
        count: f64,
    },
    /// Statistics of a [`MeterKind::Gauge`].
    Gauge {
        /// The current value.
        value: f64,
    },
    /// Statistics of a [`MeterKind::Timer`].
    Timer {
        /// Number of events recorded.
        count: u64,
        /// Mean event duration, in `unit`.
        mean: f64,
        /// Total time recorded, in `unit`.
        total: f64,
        /// Longest event duration, in `unit`.
        max: f64,
        /// Unit the durations are scaled to.
        unit: TimeUnit,
    },
    /// Statistics of a [`MeterKind::TimeGauge`].
    TimeGauge {
        /// The current value, in `unit`.
        value: f64,
        /// Unit the value is scaled to.
        unit: TimeUnit,
    },
    /// Statistics of a [`MeterKind::DistributionSummary`].
    DistributionSummary {
        /// Number of samples recorded.
        count: u64,
        /// Mean sample value.
        mean: f64,
        /// Total of all samples.
        total: f64,
        /// Largest sample.
        max: f64,
    },
    /// Statistics of a [`MeterKind::LongTaskTimer`].
    LongTaskTimer {
        /// Tasks currently running.
        active_tasks: u32,
        /// Accumulated duration of the running tasks, in `unit`.
        duration: f64,
        /// Unit the duration is scaled to.
        unit: TimeUnit,
    },
    /// Statistics of a [`MeterKind::FunctionCounter`].
    FunctionCounter {
        /// The sampled count.
        count: f64,
    },
    /// Statistics of a [`MeterKind::FunctionTimer`]. Function timers expose
    /// no max statistic.
    FunctionTimer {
        /// The sampled event count.
        count: f64,
        /// Mean event duration, in `unit`.
        mean: f64,
        /// Total time, in `unit`.
        total: f64,
        /// Unit the durations are scaled to.
        unit: TimeUnit,
    },
    /// Arbitrary measurements of a [`MeterKind::Other`] meter.
    Other {
        /// The sampled measurements, in registry order.
        measurements: Vec<Measurement>,
    },
}

/// One meter as observed at one publish tick.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterSnapshot {
    id: MeterId,
    data: MeterData,
}

impl MeterSnapshot {
    /// Pair an id with its statistics.
    pub fn new(id: MeterId, data: MeterData) -> Self {
        Self { id, data }
    }

    /// The meter's identity.
    pub fn id(&self) -> &MeterId {
        &self.id
    }

    /// The meter's statistics.
    pub fn data(&self) -> &MeterData {
        &self.data
    }
}

/// The registry facade: anything that can present its meters as snapshots.
///
/// The in-process registry itself is an external collaborator; adapters only
/// require this one capability.
pub trait MeterSource {
    /// Snapshot every meter currently held by the registry.
    fn meters(&self) -> Vec<MeterSnapshot>;
}

impl MeterSource for Vec<MeterSnapshot> {
    fn meters(&self) -> Vec<MeterSnapshot> {
        self.clone()
    }
}

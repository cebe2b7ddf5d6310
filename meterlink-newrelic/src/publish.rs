// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use meterlink_core::{
    AttributeMap, Identity, MeterId, MeterSource, MissingConfigError, NamingConvention,
};

use crate::config::NewRelicConfig;
use crate::translate::EventTranslator;

/// Error reported by an [`InsightsAgent`] when recording an event fails.
pub type SendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The vendor send capability: records one custom event per meter.
///
/// Implemented over whatever client binding is in use (agent FFI, HTTP SDK,
/// test double). The agent owns buffering and delivery; this layer performs
/// no retries. Thread safety of a shared client is the vendor's contract.
pub trait InsightsAgent {
    /// Record one custom event carrying the meter's attributes.
    fn record_custom_event(
        &self,
        event_type: &str,
        attributes: &AttributeMap,
    ) -> Result<(), SendError>;
}

impl<A: InsightsAgent + ?Sized> InsightsAgent for &A {
    fn record_custom_event(
        &self,
        event_type: &str,
        attributes: &AttributeMap,
    ) -> Result<(), SendError> {
        (**self).record_custom_event(event_type, attributes)
    }
}

/// Publishes every meter of a [`MeterSource`] as New Relic custom events.
///
/// One publish call walks the registry snapshot once, synchronously. A send
/// failure for one meter is logged at warn level and does not abort the rest
/// of the batch.
#[derive(Debug, Clone)]
pub struct EventPublisher<A, N = Identity> {
    translator: EventTranslator<N>,
    agent: A,
}

impl<A: InsightsAgent> EventPublisher<A, Identity> {
    /// Create a publisher with the identity naming convention.
    ///
    /// Fails with [`MissingConfigError`] when the config names no event type
    /// and per-meter event types are disabled.
    pub fn new(config: NewRelicConfig, agent: A) -> Result<Self, MissingConfigError> {
        Self::with_naming(config, Identity, agent)
    }
}

impl<A: InsightsAgent, N: NamingConvention> EventPublisher<A, N> {
    /// Create a publisher with a vendor naming convention.
    pub fn with_naming(
        config: NewRelicConfig,
        naming: N,
        agent: A,
    ) -> Result<Self, MissingConfigError> {
        Ok(Self {
            translator: EventTranslator::with_naming(config, naming)?,
            agent,
        })
    }

    /// The translator backing this publisher.
    pub fn translator(&self) -> &EventTranslator<N> {
        &self.translator
    }

    /// Snapshot `source` and record one event per meter that produced a
    /// non-empty attribute map.
    pub fn publish(&self, source: &impl MeterSource) {
        for snapshot in source.meters() {
            let attributes = self.translator.translate(&snapshot);
            self.send_event(snapshot.id(), attributes);
        }
    }

    fn send_event(&self, id: &MeterId, attributes: AttributeMap) {
        if attributes.is_empty() {
            return;
        }
        let event_type = self.translator.event_type_for(id);
        if let Err(error) = self.agent.record_custom_event(&event_type, &attributes) {
            tracing::warn!(
                meter = id.name(),
                event_type = event_type.as_str(),
                %error,
                "failed to send metrics to New Relic"
            );
        }
    }
}

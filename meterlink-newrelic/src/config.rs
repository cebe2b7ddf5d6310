// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use meterlink_core::MissingConfigError;

/// Labeling configuration for the New Relic adapter.
///
/// Events are labeled one of two ways:
/// - a single categorical event type for all meters ([`event_type`]), with
///   `metricName`/`metricType` attributes distinguishing them, or
/// - one event type per meter name ([`meter_name_event_type`] set to true).
///
/// At least one of the two must be configured; adapters reject a config with
/// neither at construction time.
///
/// [`event_type`]: NewRelicConfigBuilder::event_type
/// [`meter_name_event_type`]: NewRelicConfigBuilder::meter_name_event_type
#[derive(Debug, Clone)]
pub struct NewRelicConfig {
    event_type: Option<String>,
    meter_name_event_type: bool,
}

impl NewRelicConfig {
    /// Create a builder for [`NewRelicConfig`].
    pub fn builder() -> NewRelicConfigBuilder {
        NewRelicConfigBuilder {
            event_type: None,
            meter_name_event_type: false,
        }
    }

    /// The categorical event type, if one was configured. An empty string
    /// counts as absent.
    pub fn event_type(&self) -> Option<&str> {
        self.event_type.as_deref()
    }

    /// Whether each meter publishes under its own event type.
    pub fn meter_name_event_type(&self) -> bool {
        self.meter_name_event_type
    }

    pub(crate) fn validate(&self) -> Result<(), MissingConfigError> {
        if !self.meter_name_event_type && self.event_type.is_none() {
            return Err(MissingConfigError::new(
                "eventType must be set to report metrics to New Relic",
            ));
        }
        Ok(())
    }
}

/// Builder for [`NewRelicConfig`].
#[derive(Debug, Clone)]
pub struct NewRelicConfigBuilder {
    event_type: Option<String>,
    meter_name_event_type: bool,
}

impl NewRelicConfigBuilder {
    /// Set the categorical event type all meters publish under.
    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        let event_type = event_type.into();
        // empty means unset, same as not calling this at all
        self.event_type = (!event_type.is_empty()).then_some(event_type);
        self
    }

    /// Publish each meter under an event type derived from its metric name
    /// instead of the categorical event type.
    pub fn meter_name_event_type(mut self, enabled: bool) -> Self {
        self.meter_name_event_type = enabled;
        self
    }

    /// Finish the configuration. Validation happens when an adapter is
    /// constructed from it.
    pub fn build(self) -> NewRelicConfig {
        NewRelicConfig {
            event_type: self.event_type,
            meter_name_event_type: self.meter_name_event_type,
        }
    }
}

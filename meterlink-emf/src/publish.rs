// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::time::SystemTime;

use meterlink_core::{Identity, MeterSource, NamingConvention};

use crate::emf::Emf;

/// Writes one EMF log line per meter to an [`io::Write`] destination.
///
/// In production the destination is typically a rotating log file watched by
/// the CloudWatch agent, or a pipe to any `PutLogEvents` shipper. A write
/// failure for one meter is logged at warn level and does not abort the rest
/// of the batch.
#[derive(Debug)]
pub struct EmfPublisher<W, N = Identity> {
    formatter: Emf<N>,
    output: W,
}

impl<W: io::Write> EmfPublisher<W, Identity> {
    /// Create a publisher emitting under `namespace` with the identity
    /// naming convention.
    pub fn new(namespace: impl Into<String>, output: W) -> Self {
        Self {
            formatter: Emf::new(namespace),
            output,
        }
    }
}

impl<W: io::Write, N: NamingConvention> EmfPublisher<W, N> {
    /// Create a publisher from a configured formatter.
    pub fn from_formatter(formatter: Emf<N>, output: W) -> Self {
        Self { formatter, output }
    }

    /// The formatter backing this publisher.
    pub fn formatter(&self) -> &Emf<N> {
        &self.formatter
    }

    /// Snapshot `source` and write one log event per meter with data,
    /// timestamped with the current wall clock.
    pub fn publish(&mut self, source: &impl MeterSource) {
        self.publish_at(source, SystemTime::now());
    }

    /// Like [`EmfPublisher::publish`] with a caller-provided timestamp.
    pub fn publish_at(&mut self, source: &impl MeterSource, timestamp: SystemTime) {
        for snapshot in source.meters() {
            if let Err(error) = self.formatter.format(&snapshot, timestamp, &mut self.output) {
                tracing::warn!(
                    meter = snapshot.id().name(),
                    %error,
                    "failed to write EMF log event"
                );
            }
        }
    }

    /// Consume the publisher and hand back the destination.
    pub fn into_inner(self) -> W {
        self.output
    }
}

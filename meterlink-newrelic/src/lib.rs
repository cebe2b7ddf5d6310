// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub use crate::config::{NewRelicConfig, NewRelicConfigBuilder};
pub use crate::publish::{EventPublisher, InsightsAgent, SendError};
pub use crate::translate::EventTranslator;

mod config;
mod publish;
pub mod translate;

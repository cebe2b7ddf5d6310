// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub use crate::emf::{Emf, MetricDefinition, MetricDirective};
pub use crate::publish::EmfPublisher;

mod emf;
mod publish;

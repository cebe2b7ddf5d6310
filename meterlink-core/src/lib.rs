// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub use crate::attribute::{AttributeMap, AttributeValue};
pub use crate::error::MissingConfigError;
pub use crate::meter::{
    Measurement, MeterData, MeterId, MeterKind, MeterSnapshot, MeterSource, Statistic, Tag,
};
pub use crate::naming::{Identity, NamingConvention};
pub use crate::unit::TimeUnit;

pub mod attribute;
mod error;
pub mod meter;
pub mod naming;
pub mod unit;

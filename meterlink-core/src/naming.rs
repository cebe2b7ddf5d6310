// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Naming conventions: pure transforms from internal meter/tag names to
//! vendor-acceptable strings.

use crate::meter::MeterKind;

/// Policy object converting internal names and tags into vendor-safe strings.
///
/// Implementations must be pure: the same input always yields the same
/// output, with no mutable state. All methods default to the identity
/// transform, so a vendor convention only overrides what it restricts.
pub trait NamingConvention {
    /// Transform a meter name.
    fn name(&self, name: &str, kind: MeterKind) -> String {
        let _ = kind;
        name.to_string()
    }

    /// Transform a tag or attribute key.
    fn tag_key(&self, key: &str) -> String {
        key.to_string()
    }

    /// Transform a tag value.
    fn tag_value(&self, value: &str) -> String {
        value.to_string()
    }
}

/// The identity convention: names and tags pass through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl NamingConvention for Identity {}

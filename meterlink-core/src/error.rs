// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Required labeling configuration was absent when an adapter was constructed.
///
/// This is the only error that crosses an adapter's boundary: it is raised
/// immediately at construction and prevents the adapter from being used.
/// Everything later (vendor send failures, non-finite values) is absorbed
/// inside the publish loop.
#[derive(Clone)]
pub struct MissingConfigError {
    message: String,
}

impl MissingConfigError {
    /// Record which configuration item was missing and why it is required.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Debug for MissingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MissingConfigError")
            .field(&self.message)
            .finish()
    }
}

impl fmt::Display for MissingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for MissingConfigError {}

// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Time units attached to timer-flavored meters.
//!
//! Vendors receive the unit as a lowercase label (for example `"milliseconds"`)
//! next to the already-converted statistic values. No conversion happens in
//! this layer: the registry hands over statistics pre-scaled to the meter's
//! base unit.

use std::fmt;

/// The time unit a timer-flavored meter reports its statistics in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// `10^-9` seconds
    Nanoseconds,
    /// `10^-6` seconds
    Microseconds,
    /// `10^-3` seconds
    Milliseconds,
    /// Seconds
    Seconds,
    /// Minutes
    Minutes,
    /// Hours
    Hours,
    /// Days
    Days,
}

impl TimeUnit {
    /// The lowercase label transmitted under the `timeUnit` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nanoseconds => "nanoseconds",
            Self::Microseconds => "microseconds",
            Self::Milliseconds => "milliseconds",
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        }
    }

    /// Parse a base-unit label as reported by a registry. Accepts exactly the
    /// labels produced by [`TimeUnit::as_str`].
    pub fn parse(label: &str) -> Option<Self> {
        Some(match label {
            "nanoseconds" => Self::Nanoseconds,
            "microseconds" => Self::Microseconds,
            "milliseconds" => Self::Milliseconds,
            "seconds" => Self::Seconds,
            "minutes" => Self::Minutes,
            "hours" => Self::Hours,
            "days" => Self::Days,
            _ => return None,
        })
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::TimeUnit;

    #[test]
    fn labels_round_trip() {
        for unit in [
            TimeUnit::Nanoseconds,
            TimeUnit::Microseconds,
            TimeUnit::Milliseconds,
            TimeUnit::Seconds,
            TimeUnit::Minutes,
            TimeUnit::Hours,
            TimeUnit::Days,
        ] {
            assert_eq!(TimeUnit::parse(unit.as_str()), Some(unit));
        }
    }

    #[test]
    fn unknown_label() {
        assert_eq!(TimeUnit::parse("fortnights"), None);
        // labels are matched exactly, not case-folded
        assert_eq!(TimeUnit::parse("Milliseconds"), None);
    }
}

// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The vendor-bound key/value payload built for one meter at one publish tick.
//!
//! An [`AttributeMap`] is allocated fresh per meter, filled by a translator,
//! and discarded after the send call. Ordering is irrelevant. Numbers go
//! through a deterministic whole-or-decimal split: a value mathematically
//! equal to its floor is stored as an integer, everything else as a decimal.

use std::collections::HashMap;
use std::collections::hash_map;

use serde::Serialize;

/// A single attribute value: an integer, a decimal, or a string.
///
/// Which numeric variant a `f64` lands in is decided by
/// [`AttributeValue::from_number`] and must stay bit-reproducible, since
/// vendors treat `4` and `4.0` as different payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A whole number, emitted without a decimal point.
    Integer(i64),
    /// A fractional number.
    Decimal(f64),
    /// A string attribute (time units, tag values, metric metadata).
    Text(String),
}

impl AttributeValue {
    /// Classify a numeric value as whole or decimal.
    ///
    /// The branch condition is `value.floor() == value`: `4.0` becomes
    /// `Integer(4)`, `4.5` stays `Decimal(4.5)`. Whole values outside the
    /// exactly-representable `i64` range stay decimal rather than saturating.
    /// Non-finite values never satisfy the floor condition and fall through
    /// to `Decimal` (callers gate on finiteness before reaching this point).
    pub fn from_number(value: f64) -> Self {
        const I64_EXCLUSIVE_MAX: f64 = 9_223_372_036_854_775_808.0; // 2^63
        if value.floor() == value && value >= i64::MIN as f64 && value < I64_EXCLUSIVE_MAX {
            Self::Integer(value as i64)
        } else {
            Self::Decimal(value)
        }
    }

    /// Returns true for the numeric variants.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Decimal(_))
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        // counts beyond i64 don't occur in practice; saturate rather than wrap
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::from_number(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// The attribute payload for one meter at one publish tick.
///
/// An empty map must never be sent; publishers check [`AttributeMap::is_empty`]
/// before invoking the vendor capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeMap {
    entries: HashMap<String, AttributeValue>,
}

impl AttributeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute. Numbers passed as `f64` are split into the
    /// integer or decimal variant by [`AttributeValue::from_number`].
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up an attribute by key.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.get(key)
    }

    /// True when no attribute was recorded. Maps stay empty when every
    /// candidate statistic was non-finite.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of attributes recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over the recorded attributes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = hash_map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{AttributeMap, AttributeValue};

    #[rstest]
    #[case(4.0, AttributeValue::Integer(4))]
    #[case(4.5, AttributeValue::Decimal(4.5))]
    #[case(0.0, AttributeValue::Integer(0))]
    #[case(-3.0, AttributeValue::Integer(-3))]
    #[case(-3.25, AttributeValue::Decimal(-3.25))]
    #[case(f64::MAX, AttributeValue::Decimal(f64::MAX))]
    #[case(1e19, AttributeValue::Decimal(1e19))]
    fn whole_or_decimal(#[case] input: f64, #[case] expected: AttributeValue) {
        assert_eq!(AttributeValue::from_number(input), expected);
    }

    #[test]
    fn non_finite_takes_decimal_branch() {
        // translators gate on finiteness; the split itself must still be total
        assert!(matches!(
            AttributeValue::from_number(f64::NAN),
            AttributeValue::Decimal(v) if v.is_nan()
        ));
        assert_eq!(
            AttributeValue::from_number(f64::INFINITY),
            AttributeValue::Decimal(f64::INFINITY)
        );
    }

    #[test]
    fn map_basics() {
        let mut map = AttributeMap::new();
        assert!(map.is_empty());
        map.put("throughput", 2.0);
        map.put("timeUnit", "seconds");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("throughput"), Some(&AttributeValue::Integer(2)));
        assert_eq!(
            map.get("timeUnit"),
            Some(&AttributeValue::Text("seconds".to_string()))
        );
    }

    #[test]
    fn serializes_without_tagging() {
        let mut map = AttributeMap::new();
        map.put("count", 3u64);
        map.put("avg", 1.5);
        map.put("timeUnit", "seconds");
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"count": 3, "avg": 1.5, "timeUnit": "seconds"})
        );
    }
}

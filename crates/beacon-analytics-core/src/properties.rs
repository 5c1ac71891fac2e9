// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event parameter maps.
//!
//! Callers describe an interaction with a free-form parameter set; the
//! enricher then merges the derived identity fields on top. Merging is
//! right-biased, which is what makes the identity fields non-overridable:
//! `params.merge_user_data(&user_data)` always wins over whatever the
//! caller put under the same keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::user_data::UserData;

/// A set of event parameters keyed by string.
///
/// # Example
///
/// ```
/// use beacon_analytics_core::Properties;
///
/// let params = Properties::new()
///     .insert("label", "X")
///     .insert("step", 3)
///     .insert("first_visit", true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: Map<String, Value>,
}

impl Properties {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a key-value pair (builder pattern).
	///
	/// Accepts anything convertible to a JSON value: strings, numbers,
	/// booleans, or `Value::Null` for an explicit reset.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Inserts a key-value pair in place.
	pub fn set<K, V>(&mut self, key: K, value: V)
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
	}

	/// Removes a key, returning its previous value if present.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.inner.remove(key)
	}

	/// Merges `other` into this set; on duplicate keys `other` wins.
	#[must_use]
	pub fn merge(mut self, other: Properties) -> Self {
		for (k, v) in other.inner {
			self.inner.insert(k, v);
		}
		self
	}

	/// Merges the derived identity fields on top of this set.
	///
	/// The identity fields are applied last so they overwrite any
	/// same-named caller-supplied parameters.
	#[must_use]
	pub fn merge_user_data(self, user_data: &UserData) -> Self {
		self.merge(user_data.to_properties())
	}

	/// Gets a value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Gets a string value by key.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.inner.get(key).and_then(Value::as_str)
	}

	/// Returns `true` if `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	/// Returns `true` if no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Iterates over the parameters in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.inner.iter()
	}

	/// Converts the parameter set into a `serde_json::Value`.
	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Properties> for Value {
	fn from(params: Properties) -> Self {
		params.into_value()
	}
}

impl From<Map<String, Value>> for Properties {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}

impl From<Value> for Properties {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

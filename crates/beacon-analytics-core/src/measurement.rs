// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The analytics measurement target identifier.
//!
//! Configured once per deployment and carried on every session-scoped
//! config push, this is the only wire-format constant the instrumentation
//! layer owns.

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsCoreError;

/// A Google Analytics measurement ID (`G-XXXXXXXXXX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementId(String);

impl MeasurementId {
	/// Prefix every measurement ID carries.
	pub const PREFIX: &'static str = "G-";

	/// Validates and wraps a measurement ID.
	///
	/// The ID must start with `G-` followed by at least one character,
	/// all uppercase alphanumerics.
	pub fn new(id: impl Into<String>) -> Result<Self, AnalyticsCoreError> {
		let id = id.into();

		let Some(rest) = id.strip_prefix(Self::PREFIX) else {
			return Err(AnalyticsCoreError::InvalidMeasurementId(id));
		};

		if rest.is_empty()
			|| !rest
				.chars()
				.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
		{
			return Err(AnalyticsCoreError::InvalidMeasurementId(id));
		}

		Ok(Self(id))
	}

	/// Returns the ID as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for MeasurementId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::str::FromStr for MeasurementId {
	type Err = AnalyticsCoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn valid_measurement_id() {
		let id = MeasurementId::new("G-TV7JCEY4DV").unwrap();
		assert_eq!(id.as_str(), "G-TV7JCEY4DV");
		assert_eq!(id.to_string(), "G-TV7JCEY4DV");
	}

	#[test]
	fn missing_prefix_is_rejected() {
		assert!(MeasurementId::new("TV7JCEY4DV").is_err());
		assert!(MeasurementId::new("UA-12345-1").is_err());
	}

	#[test]
	fn empty_and_lowercase_are_rejected() {
		assert!(MeasurementId::new("G-").is_err());
		assert!(MeasurementId::new("G-abc123").is_err());
	}

	#[test]
	fn from_str_roundtrip() {
		let id: MeasurementId = "G-TV7JCEY4DV".parse().unwrap();
		let again: MeasurementId = id.to_string().parse().unwrap();
		assert_eq!(id, again);
	}

	#[test]
	fn serde_is_transparent() {
		let id = MeasurementId::new("G-TV7JCEY4DV").unwrap();
		let json = serde_json::to_string(&id).unwrap();
		assert_eq!(json, r#""G-TV7JCEY4DV""#);
	}

	proptest! {
		#[test]
		fn well_formed_ids_parse(rest in "[A-Z0-9]{1,12}") {
			let id = format!("G-{rest}");
			prop_assert!(MeasurementId::new(id).is_ok());
		}

		#[test]
		fn garbage_never_panics(garbage in ".{0,24}") {
			let _ = MeasurementId::new(garbage);
		}
	}
}

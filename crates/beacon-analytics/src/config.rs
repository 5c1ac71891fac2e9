// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration for the instrumentation layer.

use beacon_analytics_core::MeasurementId;

/// Configuration for event enrichment.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
	/// Measurement target carried on every session-scoped config push.
	pub measurement_id: MeasurementId,

	/// Whether enriched events carry the provider subject as `google_id`.
	pub include_google_id: bool,

	/// Title attached to page views when the caller supplies none.
	pub default_page_title: Option<String>,
}

impl AnalyticsConfig {
	/// Creates a config for the given measurement target.
	///
	/// `google_id` inclusion defaults to on; there is no default page
	/// title.
	pub fn new(measurement_id: MeasurementId) -> Self {
		Self {
			measurement_id,
			include_google_id: true,
			default_page_title: None,
		}
	}

	/// Sets the fallback page title (builder pattern).
	#[must_use]
	pub fn with_default_page_title(mut self, title: impl Into<String>) -> Self {
		self.default_page_title = Some(title.into());
		self
	}

	/// Switches off the `google_id` field on enriched events.
	#[must_use]
	pub fn without_google_id(mut self) -> Self {
		self.include_google_id = false;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn target() -> MeasurementId {
		"G-TV7JCEY4DV".parse().unwrap()
	}

	#[test]
	fn defaults() {
		let config = AnalyticsConfig::new(target());
		assert!(config.include_google_id);
		assert!(config.default_page_title.is_none());
	}

	#[test]
	fn builder_switches() {
		let config = AnalyticsConfig::new(target())
			.with_default_page_title("Homepage")
			.without_google_id();

		assert!(!config.include_google_id);
		assert_eq!(config.default_page_title.as_deref(), Some("Homepage"));
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The analytics sink capability.
//!
//! The sink is the outbound boundary of the instrumentation layer: one
//! primitive for events, one for session-scoped configuration. It is
//! injected rather than probed for, so server-side and test contexts
//! supply [`NoOpAnalyticsSink`] (or nothing at all) instead of the
//! instrumentation code checking an ambient global per call.

use std::sync::Arc;

use beacon_analytics_core::{MeasurementId, Properties};

/// Destination for analytics events and session-scoped configuration.
///
/// Implementations must be fast, non-blocking, and infallible from the
/// caller's perspective: tracking is fire-and-forget and must never
/// interrupt the user-facing action it instruments. Queue expensive work
/// (HTTP, disk) behind a channel and drop on overflow.
pub trait AnalyticsSink: Send + Sync {
	/// Dispatches a named event with its final, enriched parameter set.
	fn send_event(&self, name: &str, params: Properties);

	/// Pushes session-scoped configuration for the given measurement
	/// target. Later events are attributed under this context until the
	/// next push.
	fn set_config(&self, target: &MeasurementId, params: Properties);
}

/// Type alias for a shared analytics sink.
pub type SharedAnalyticsSink = Arc<dyn AnalyticsSink>;

/// A sink that discards everything.
///
/// Used when analytics is disabled or unavailable in the current
/// execution context.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAnalyticsSink;

impl AnalyticsSink for NoOpAnalyticsSink {
	fn send_event(&self, _name: &str, _params: Properties) {
		// No-op: discard the event
	}

	fn set_config(&self, _target: &MeasurementId, _params: Properties) {
		// No-op: discard the config push
	}
}


#[cfg(test)]
mod tests {
	use super::test_support::RecordingSink;
	use super::*;

	fn target() -> MeasurementId {
		"G-TESTTARGET".parse().unwrap()
	}

	#[test]
	fn noop_sink_accepts_everything() {
		let sink = NoOpAnalyticsSink;
		sink.send_event("click", Properties::new().insert("label", "X"));
		sink.set_config(&target(), Properties::new());
	}

	#[test]
	fn sink_is_object_safe() {
		let sink: SharedAnalyticsSink = Arc::new(NoOpAnalyticsSink);
		sink.send_event("click", Properties::new());
	}

	#[test]
	fn recording_sink_captures_calls_in_order() {
		let sink = RecordingSink::new();

		sink.send_event("first", Properties::new());
		sink.send_event("second", Properties::new());
		sink.set_config(&target(), Properties::new().insert("user_type", "guest"));

		let events = sink.events();
		assert_eq!(events.len(), 2);
		assert_eq!(events[0].0, "first");
		assert_eq!(events[1].0, "second");

		let (config_target, params) = sink.last_config().unwrap();
		assert_eq!(config_target, target());
		assert_eq!(params.get_str("user_type"), Some("guest"));
	}
}

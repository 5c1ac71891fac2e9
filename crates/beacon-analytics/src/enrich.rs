// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event enrichment and session-scoped analytics context.
//!
//! [`EventEnricher`] is the single entry point for instrumentation: it
//! derives the visitor's identity attributes from the session, merges
//! them on top of the caller's parameters for every tracked interaction,
//! and pushes session-scoped config to the sink when the session state
//! changes.
//!
//! The caller owns the session lifecycle: call [`EventEnricher::identify_user`]
//! exactly once per successful login, [`EventEnricher::track_logout`] on
//! sign-out, and [`EventEnricher::set_user_context`] on every session
//! transition. Redundant context pushes are harmless; a missed one after
//! logout leaks the old identity into subsequent anonymous events.

use chrono::{SecondsFormat, Utc};
use tracing::debug;

use beacon_analytics_core::{Properties, Session, UserData};

use crate::config::AnalyticsConfig;
use crate::identity::IdentityResolver;
use crate::sink::SharedAnalyticsSink;

/// A page-view record supplied by the caller.
///
/// There is no ambient document to read a title or URL from, so both
/// travel explicitly; a missing title falls back to the configured
/// default.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
	pub location: String,
	pub title: Option<String>,
}

impl PageView {
	/// A page view for the given location with no title.
	pub fn new(location: impl Into<String>) -> Self {
		Self {
			location: location.into(),
			title: None,
		}
	}

	/// Sets the page title (builder pattern).
	#[must_use]
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}
}

/// Attaches identity and user attributes to every outgoing analytics
/// event, and keeps the sink's session-scoped context in step with the
/// auth session.
pub struct EventEnricher {
	config: AnalyticsConfig,
	sink: Option<SharedAnalyticsSink>,
	resolver: IdentityResolver,
}

impl EventEnricher {
	/// Creates an enricher.
	///
	/// `sink` is `None` in contexts where analytics is unavailable;
	/// every operation is then a silent no-op.
	pub fn new(
		config: AnalyticsConfig,
		sink: Option<SharedAnalyticsSink>,
		resolver: IdentityResolver,
	) -> Self {
		Self {
			config,
			sink,
			resolver,
		}
	}

	/// Returns `true` if a sink is attached.
	#[must_use]
	pub fn is_enabled(&self) -> bool {
		self.sink.is_some()
	}

	/// Resolves the stable analytics identifier for the given session.
	pub fn resolve_id(&self, session: Option<&Session>) -> String {
		self.resolver.resolve_id(session)
	}

	fn user_data(&self, session: Option<&Session>) -> UserData {
		let data = UserData::from_session(session);
		if self.config.include_google_id {
			data
		} else {
			data.without_google_id()
		}
	}

	/// Tracks a named interaction.
	///
	/// The derived identity fields are merged on top of `params`, so
	/// event-specific data can never override `user_type`, `user_id`,
	/// and friends. Best-effort: without a sink this returns silently.
	pub fn track(&self, name: &str, params: Properties, session: Option<&Session>) {
		let Some(sink) = &self.sink else {
			debug!(event = name, "Analytics sink unavailable, dropping event");
			return;
		};

		let params = params.merge_user_data(&self.user_data(session));
		sink.send_event(name, params);
	}

	/// Pushes session-scoped identity config to the sink.
	///
	/// Call on every session transition: login, logout, and initial
	/// load. An authenticated session pushes the identity fields; an
	/// absent one pushes an explicit reset so no stale identity leaks
	/// into subsequent anonymous events. Idempotent.
	pub fn set_user_context(&self, session: Option<&Session>) {
		let Some(sink) = &self.sink else {
			return;
		};

		let params = match session.and_then(Session::user) {
			Some(_) => self.user_data(session).to_properties(),
			None => UserData::reset_properties(),
		};

		sink.set_config(&self.config.measurement_id, params);
	}

	/// Composite login hook: emits a `user_login` event and pushes the
	/// authenticated context. Call exactly once per successful login,
	/// not on every render.
	pub fn identify_user(&self, session: &Session) {
		if self.sink.is_none() {
			return;
		}

		let user_id = self.resolver.resolve_id(Some(session));
		let params = Properties::new()
			.insert("method", "google")
			.insert("user_id", user_id.as_str())
			.insert(
				"login_timestamp",
				Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
			);

		self.track("user_login", params, Some(session));
		self.set_user_context(Some(session));

		debug!(user_id = %user_id, "Identified analytics user");
	}

	/// Mirror of [`EventEnricher::identify_user`] for sign-out: emits a
	/// `user_logout` event, then resets the session-scoped context.
	pub fn track_logout(&self, session: Option<&Session>) {
		if self.sink.is_none() {
			return;
		}

		let user_id = self.resolver.resolve_id(session);
		let params = Properties::new().insert("user_id", user_id.as_str()).insert(
			"logout_timestamp",
			Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
		);

		self.track("user_logout", params, session);
		self.set_user_context(None);

		debug!(user_id = %user_id, "Analytics user logged out");
	}

	/// Emits a `page_view` event for the given page, enriched with the
	/// visitor's identity attributes.
	pub fn track_page_view(&self, session: Option<&Session>, page: &PageView) {
		let title = page
			.title
			.as_deref()
			.or(self.config.default_page_title.as_deref());

		let mut params = Properties::new().insert("page_location", page.location.as_str());
		if let Some(title) = title {
			params.set("page_title", title);
		}

		self.track("page_view", params, session);
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use beacon_analytics_core::{MeasurementId, SessionUser};
	use serde_json::Value;

	use super::*;
	use crate::sink::test_support::RecordingSink;
	use crate::store::{GuestIdStore, MemoryGuestIdStore};

	fn config() -> AnalyticsConfig {
		AnalyticsConfig::new("G-TV7JCEY4DV".parse::<MeasurementId>().unwrap())
	}

	fn session() -> Session {
		Session::for_user(
			SessionUser::new("u1")
				.with_email("a.b@x.com")
				.with_name("Alice")
				.with_google_id("g-123"),
		)
	}

	fn enricher_with(
		config: AnalyticsConfig,
	) -> (EventEnricher, Arc<RecordingSink>, Arc<MemoryGuestIdStore>) {
		let sink = Arc::new(RecordingSink::new());
		let store = Arc::new(MemoryGuestIdStore::new());
		let shared: SharedAnalyticsSink = sink.clone();
		let enricher = EventEnricher::new(config, Some(shared), IdentityResolver::new(store.clone()));
		(enricher, sink, store)
	}

	#[test]
	fn track_merges_identity_over_caller_params() {
		let (enricher, sink, _) = enricher_with(config());

		enricher.track(
			"click",
			Properties::new().insert("label", "X"),
			Some(&session()),
		);

		let (name, params) = sink.last_event().unwrap();
		assert_eq!(name, "click");
		assert_eq!(params.get_str("label"), Some("X"));
		assert_eq!(params.get_str("user_type"), Some("authenticated"));
		assert_eq!(params.get_str("user_id"), Some("u1"));
		assert_eq!(params.get_str("user_email"), Some("a.b@x.com"));
		assert_eq!(params.get_str("session_id"), Some("u1"));
	}

	#[test]
	fn track_user_type_cannot_be_spoofed() {
		let (enricher, sink, _) = enricher_with(config());

		enricher.track(
			"click",
			Properties::new().insert("user_type", "authenticated"),
			None,
		);

		let (_, params) = sink.last_event().unwrap();
		assert_eq!(params.get_str("user_type"), Some("guest"));
	}

	#[test]
	fn track_without_sink_is_a_silent_noop() {
		let enricher = EventEnricher::new(config(), None, IdentityResolver::without_store());
		enricher.track("click", Properties::new(), Some(&session()));
		assert!(!enricher.is_enabled());
	}

	#[test]
	fn set_user_context_pushes_identity_fields() {
		let (enricher, sink, _) = enricher_with(config());

		enricher.set_user_context(Some(&session()));

		let (target, params) = sink.last_config().unwrap();
		assert_eq!(target.as_str(), "G-TV7JCEY4DV");
		assert_eq!(params.get_str("user_id"), Some("u1"));
		assert_eq!(params.get_str("user_email"), Some("a.b@x.com"));
		assert_eq!(params.get_str("user_name"), Some("Alice"));
		assert_eq!(params.get_str("user_type"), Some("authenticated"));
		assert_eq!(params.get_str("google_id"), Some("g-123"));
	}

	#[test]
	fn set_user_context_without_session_resets_identity() {
		let (enricher, sink, _) = enricher_with(config());

		enricher.set_user_context(Some(&session()));
		enricher.set_user_context(None);

		let (_, params) = sink.last_config().unwrap();
		assert_eq!(params.get("user_id"), Some(&Value::Null));
		assert_eq!(params.get("user_email"), Some(&Value::Null));
		assert_eq!(params.get("user_name"), Some(&Value::Null));
		assert_eq!(params.get_str("user_type"), Some("guest"));
	}

	#[test]
	fn no_stale_identity_after_context_reset() {
		let (enricher, sink, _) = enricher_with(config());

		enricher.set_user_context(Some(&session()));
		enricher.set_user_context(None);
		enricher.track("click", Properties::new(), None);

		let (_, params) = sink.last_event().unwrap();
		assert!(!params.contains_key("user_id"));
		assert_eq!(params.get_str("user_type"), Some("guest"));
	}

	#[test]
	fn identify_user_emits_login_event_then_context() {
		let (enricher, sink, _) = enricher_with(config());

		enricher.identify_user(&session());

		let events = sink.events();
		assert_eq!(events.len(), 1);
		let (name, params) = &events[0];
		assert_eq!(name, "user_login");
		assert_eq!(params.get_str("method"), Some("google"));
		assert!(params.get_str("login_timestamp").unwrap().ends_with('Z'));
		// Identity fields overwrite the passed-in resolved id.
		assert_eq!(params.get_str("user_id"), Some("u1"));

		assert_eq!(sink.configs().len(), 1);
		let (_, config_params) = sink.last_config().unwrap();
		assert_eq!(config_params.get_str("user_type"), Some("authenticated"));
	}

	#[test]
	fn identify_user_keeps_resolved_id_when_subject_is_empty() {
		let (enricher, sink, _) = enricher_with(config());
		let session = Session::for_user(SessionUser::new("").with_email("a@x.com"));

		enricher.identify_user(&session);

		let (_, params) = sink.last_event().unwrap();
		// best_id falls back to the raw email; the resolved auth_ form was
		// supplied by identify but overwritten by the identity merge.
		assert_eq!(params.get_str("user_id"), Some("a@x.com"));
	}

	#[test]
	fn track_logout_emits_event_and_resets_context() {
		let (enricher, sink, _) = enricher_with(config());

		enricher.track_logout(Some(&session()));

		let (name, params) = sink.last_event().unwrap();
		assert_eq!(name, "user_logout");
		assert!(params.get_str("logout_timestamp").unwrap().ends_with('Z'));

		let (_, config_params) = sink.last_config().unwrap();
		assert_eq!(config_params.get("user_id"), Some(&Value::Null));
		assert_eq!(config_params.get_str("user_type"), Some("guest"));
	}

	#[test]
	fn track_logout_for_guest_uses_guest_id() {
		let (enricher, sink, store) = enricher_with(config());

		enricher.track_logout(None);

		let minted = store.get("ga_guest_user_id").unwrap();
		let (_, params) = sink.last_event().unwrap();
		assert_eq!(params.get_str("user_id"), Some(minted.as_str()));
	}

	#[test]
	fn lifecycle_without_sink_touches_nothing() {
		let store = Arc::new(MemoryGuestIdStore::new());
		let enricher = EventEnricher::new(config(), None, IdentityResolver::new(store.clone()));

		enricher.identify_user(&session());
		enricher.track_logout(None);
		enricher.set_user_context(None);

		// Early return happens before any guest id is minted.
		assert_eq!(store.get("ga_guest_user_id"), None);
	}

	#[test]
	fn page_view_carries_location_title_and_identity() {
		let (enricher, sink, _) = enricher_with(config());

		enricher.track_page_view(
			Some(&session()),
			&PageView::new("https://example.com/pricing").with_title("Pricing"),
		);

		let (name, params) = sink.last_event().unwrap();
		assert_eq!(name, "page_view");
		assert_eq!(
			params.get_str("page_location"),
			Some("https://example.com/pricing")
		);
		assert_eq!(params.get_str("page_title"), Some("Pricing"));
		assert_eq!(params.get_str("user_type"), Some("authenticated"));
	}

	#[test]
	fn page_view_title_falls_back_to_configured_default() {
		let (enricher, sink, _) = enricher_with(config().with_default_page_title("Beacon"));

		enricher.track_page_view(None, &PageView::new("https://example.com/"));

		let (_, params) = sink.last_event().unwrap();
		assert_eq!(params.get_str("page_title"), Some("Beacon"));
	}

	#[test]
	fn page_view_title_omitted_when_nowhere_to_come_from() {
		let (enricher, sink, _) = enricher_with(config());

		enricher.track_page_view(None, &PageView::new("https://example.com/"));

		let (_, params) = sink.last_event().unwrap();
		assert!(!params.contains_key("page_title"));
	}

	#[test]
	fn google_id_switch_strips_field_everywhere() {
		let (enricher, sink, _) = enricher_with(config().without_google_id());

		enricher.track("click", Properties::new(), Some(&session()));
		enricher.set_user_context(Some(&session()));

		let (_, event_params) = sink.last_event().unwrap();
		assert!(!event_params.contains_key("google_id"));

		let (_, config_params) = sink.last_config().unwrap();
		assert!(!config_params.contains_key("google_id"));
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stable analytics identity resolution.
//!
//! Resolution never fails and never blocks rendering: a signed-in session
//! derives its identifier from the email, an anonymous visitor reuses (or
//! mints and persists) a guest id, and a context without storage resolves
//! to the empty string.

use tracing::debug;

use beacon_analytics_core::{new_guest_id, AnalyticsIdentity, Session, GUEST_ID_KEY};

use crate::store::SharedGuestIdStore;

/// Resolves the stable analytics identifier for the current visitor.
#[derive(Clone, Default)]
pub struct IdentityResolver {
	store: Option<SharedGuestIdStore>,
}

impl IdentityResolver {
	/// A resolver backed by persistent client storage.
	pub fn new(store: SharedGuestIdStore) -> Self {
		Self { store: Some(store) }
	}

	/// A resolver with no persistent storage.
	///
	/// Guest sessions resolve to no identity here; callers treat the
	/// empty id as "no stable id available in this context".
	#[must_use]
	pub fn without_store() -> Self {
		Self { store: None }
	}

	/// Resolves the identity for the given session, if one is available.
	///
	/// A non-empty email wins and is derived without touching storage.
	/// Otherwise the persisted guest id is reused; a missing one is
	/// minted and persisted before this returns, so repeated calls on
	/// the same store always agree.
	pub fn resolve(&self, session: Option<&Session>) -> Option<AnalyticsIdentity> {
		let email = session
			.and_then(Session::user)
			.and_then(|user| user.email.as_deref())
			.filter(|email| !email.is_empty());
		if let Some(email) = email {
			return Some(AnalyticsIdentity::authenticated(email));
		}

		let store = self.store.as_ref()?;
		if let Some(existing) = store.get(GUEST_ID_KEY).filter(|id| !id.is_empty()) {
			return Some(AnalyticsIdentity::guest(existing));
		}

		let minted = new_guest_id();
		store.set(GUEST_ID_KEY, &minted);
		debug!(guest_id = %minted, "Minted guest analytics identity");
		Some(AnalyticsIdentity::guest(minted))
	}

	/// Resolves the identifier string for the given session.
	///
	/// Returns the empty string when no stable id is available (guest
	/// session with no storage). Never errors.
	pub fn resolve_id(&self, session: Option<&Session>) -> String {
		self
			.resolve(session)
			.map(|identity| identity.id)
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use beacon_analytics_core::{IdentityKind, SessionUser};

	use super::*;
	use crate::store::{GuestIdStore, MemoryGuestIdStore};

	fn authenticated_session(email: &str) -> Session {
		Session::for_user(SessionUser::new("u1").with_email(email))
	}

	#[test]
	fn authenticated_session_derives_from_email() {
		let resolver = IdentityResolver::without_store();
		let session = authenticated_session("a.b+c@x.com");

		assert_eq!(resolver.resolve_id(Some(&session)), "auth_a_b_c_x_com");
	}

	#[test]
	fn authenticated_resolution_is_idempotent() {
		let resolver = IdentityResolver::new(Arc::new(MemoryGuestIdStore::new()));
		let session = authenticated_session("a@x.com");

		let first = resolver.resolve_id(Some(&session));
		let second = resolver.resolve_id(Some(&session));
		assert_eq!(first, second);
		assert_eq!(first, "auth_a_x_com");
	}

	#[test]
	fn authenticated_path_does_not_touch_storage() {
		let store = Arc::new(MemoryGuestIdStore::new());
		let resolver = IdentityResolver::new(store.clone());

		resolver.resolve_id(Some(&authenticated_session("a@x.com")));
		assert_eq!(store.get(GUEST_ID_KEY), None);
	}

	#[test]
	fn empty_email_takes_guest_path() {
		let resolver = IdentityResolver::new(Arc::new(MemoryGuestIdStore::new()));
		let session = Session::for_user(SessionUser::new("u1").with_email(""));

		let id = resolver.resolve_id(Some(&session));
		assert!(id.starts_with("guest_"));
	}

	#[test]
	fn guest_id_is_minted_once_and_reused() {
		let resolver = IdentityResolver::new(Arc::new(MemoryGuestIdStore::new()));

		let first = resolver.resolve_id(None);
		let second = resolver.resolve_id(None);

		assert!(first.starts_with("guest_"));
		assert_eq!(first.len(), "guest_".len() + 36);
		assert_eq!(first, second);
	}

	#[test]
	fn guest_id_is_persisted_before_returning() {
		let store = Arc::new(MemoryGuestIdStore::new());
		let resolver = IdentityResolver::new(store.clone());

		let id = resolver.resolve_id(None);
		assert_eq!(store.get(GUEST_ID_KEY).as_deref(), Some(id.as_str()));
	}

	#[test]
	fn guest_id_survives_across_resolvers_sharing_a_store() {
		let store: Arc<MemoryGuestIdStore> = Arc::new(MemoryGuestIdStore::new());

		let first = IdentityResolver::new(store.clone()).resolve_id(None);
		let second = IdentityResolver::new(store).resolve_id(None);
		assert_eq!(first, second);
	}

	#[test]
	fn no_store_resolves_to_empty_id() {
		let resolver = IdentityResolver::without_store();
		assert_eq!(resolver.resolve_id(None), "");
		assert!(resolver.resolve(None).is_none());
	}

	#[test]
	fn resolve_reports_identity_kind() {
		let store = Arc::new(MemoryGuestIdStore::new());
		let resolver = IdentityResolver::new(store);

		let guest = resolver.resolve(None).unwrap();
		assert_eq!(guest.kind, IdentityKind::Guest);

		let auth = resolver
			.resolve(Some(&authenticated_session("a@x.com")))
			.unwrap();
		assert_eq!(auth.kind, IdentityKind::Authenticated);
	}
}

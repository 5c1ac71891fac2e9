// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derived analytics identities.
//!
//! Every visitor maps to a single stable identifier usable as an analytics
//! dimension, without any server-side identity store:
//!
//! - Authenticated visitors get `auth_<sanitized email>`, recomputed on
//!   every call. The derivation is pure, so the same email always yields
//!   the same identifier.
//! - Anonymous visitors get `guest_<uuid>`, minted once per client storage
//!   scope and persisted by the resolver in `beacon-analytics`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage key under which the persisted guest identifier lives.
pub const GUEST_ID_KEY: &str = "ga_guest_user_id";

/// Prefix for identifiers derived from an email address.
pub const AUTH_ID_PREFIX: &str = "auth_";

/// Prefix for minted anonymous identifiers.
pub const GUEST_ID_PREFIX: &str = "guest_";

/// Derives the stable analytics identifier for an authenticated email.
///
/// Every character outside `[A-Za-z0-9]` is replaced with `_`, then the
/// result is prefixed with `auth_`. Total over any input string.
pub fn derived_auth_id(email: &str) -> String {
	let sanitized: String = email
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
		.collect();
	format!("{AUTH_ID_PREFIX}{sanitized}")
}

/// Mints a fresh anonymous identifier.
pub fn new_guest_id() -> String {
	format!("{GUEST_ID_PREFIX}{}", Uuid::new_v4())
}

/// Which kind of visitor an identity describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKind {
	/// Signed in; identifier derived from the email address.
	Authenticated,
	/// Anonymous; identifier minted and persisted client-side.
	Guest,
}

/// A derived analytics identity.
///
/// Recomputed per call and never persisted as an entity. Guest identities
/// are stable for as long as the backing client storage survives;
/// authenticated identities are stable as long as the email is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsIdentity {
	pub kind: IdentityKind,
	pub id: String,
}

impl AnalyticsIdentity {
	/// The identity for an authenticated visitor with the given email.
	pub fn authenticated(email: &str) -> Self {
		Self {
			kind: IdentityKind::Authenticated,
			id: derived_auth_id(email),
		}
	}

	/// The identity for an anonymous visitor with an already-minted id.
	pub fn guest(id: impl Into<String>) -> Self {
		Self {
			kind: IdentityKind::Guest,
			id: id.into(),
		}
	}

	/// Returns `true` for anonymous identities.
	#[must_use]
	pub fn is_guest(&self) -> bool {
		self.kind == IdentityKind::Guest
	}
}

impl std::fmt::Display for AnalyticsIdentity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.id)
	}
}

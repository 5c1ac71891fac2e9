// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session construction from verified token claims.
//!
//! This is the session half of the auth callback chain: given claims
//! already verified by the OAuth layer, produce the application session
//! the analytics side reads. Pure and synchronous; the only failure mode
//! is a token with no subject.

use tracing::debug;

use beacon_analytics_core::{Session, SessionUser};

use crate::claims::IdTokenClaims;
use crate::error::AuthSessionError;

/// Builds the application session for a signed-in user.
///
/// The token subject becomes both the session user id and the Google
/// account id; email, name, and login time are copied through when
/// present.
pub fn build_session(claims: &IdTokenClaims) -> Result<Session, AuthSessionError> {
	if claims.sub.trim().is_empty() {
		return Err(AuthSessionError::MissingSubject);
	}

	let user = SessionUser {
		id: claims.sub.clone(),
		email: claims.email.clone(),
		name: claims.name.clone(),
		google_id: Some(claims.sub.clone()),
		login_time: claims.login_time,
	};

	debug!(user_id = %user.id, "Built session from Google claims");
	Ok(Session::for_user(user))
}

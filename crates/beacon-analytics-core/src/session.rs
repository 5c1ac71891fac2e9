// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The authenticated-session view read by the instrumentation layer.
//!
//! Sessions are owned by the external auth provider. The analytics side
//! only ever reads them: a present [`SessionUser`] means "authenticated",
//! an absent one means "guest".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The session for the current browsing context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
	/// The signed-in user, absent for anonymous visitors.
	pub user: Option<SessionUser>,
}

impl Session {
	/// An anonymous session with no signed-in user.
	#[must_use]
	pub fn anonymous() -> Self {
		Self { user: None }
	}

	/// A session for a signed-in user.
	#[must_use]
	pub fn for_user(user: SessionUser) -> Self {
		Self { user: Some(user) }
	}

	/// Returns `true` if a user is signed in.
	#[must_use]
	pub fn is_authenticated(&self) -> bool {
		self.user.is_some()
	}

	/// Returns the signed-in user, if any.
	pub fn user(&self) -> Option<&SessionUser> {
		self.user.as_ref()
	}
}

/// The signed-in user record carried by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
	/// Provider-issued subject identifier.
	pub id: String,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,

	/// Google account identifier, present when the session came from
	/// Google sign-in.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub google_id: Option<String>,

	/// When this user last signed in.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub login_time: Option<DateTime<Utc>>,
}

impl SessionUser {
	/// Creates a user record carrying only the subject identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			email: None,
			name: None,
			google_id: None,
			login_time: None,
		}
	}

	/// Sets the email address (builder pattern).
	#[must_use]
	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());
		self
	}

	/// Sets the display name (builder pattern).
	#[must_use]
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Sets the Google account identifier (builder pattern).
	#[must_use]
	pub fn with_google_id(mut self, google_id: impl Into<String>) -> Self {
		self.google_id = Some(google_id.into());
		self
	}

	/// Sets the login timestamp (builder pattern).
	#[must_use]
	pub fn with_login_time(mut self, at: DateTime<Utc>) -> Self {
		self.login_time = Some(at);
		self
	}

	/// The best available identifier: the subject id, falling back to the
	/// email address when the subject is empty.
	pub fn best_id(&self) -> Option<&str> {
		if !self.id.is_empty() {
			return Some(&self.id);
		}
		self.email.as_deref().filter(|e| !e.is_empty())
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity and user attributes merged into every outgoing event.
//!
//! [`UserData`] is recomputed from the session for each tracked
//! interaction and applied on top of the caller-supplied parameters, so
//! event-specific data can never override who the visitor is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalyticsCoreError;
use crate::properties::Properties;
use crate::session::Session;

/// Whether the current visitor is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
	Authenticated,
	Guest,
}

impl UserType {
	/// Returns the string representation ("authenticated" or "guest").
	pub fn as_str(&self) -> &'static str {
		match self {
			UserType::Authenticated => "authenticated",
			UserType::Guest => "guest",
		}
	}
}

impl std::fmt::Display for UserType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for UserType {
	type Err = AnalyticsCoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"authenticated" => Ok(UserType::Authenticated),
			"guest" => Ok(UserType::Guest),
			_ => Err(AnalyticsCoreError::InvalidUserType(s.to_string())),
		}
	}
}

/// The identity fields attached to every event and page view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
	pub user_type: UserType,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_email: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_name: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub session_id: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub google_id: Option<String>,
}

impl UserData {
	/// The attributes of an anonymous visitor: `user_type` only.
	#[must_use]
	pub fn guest() -> Self {
		Self {
			user_type: UserType::Guest,
			user_id: None,
			user_email: None,
			user_name: None,
			session_id: None,
			google_id: None,
		}
	}

	/// Derives the attributes for the given session.
	///
	/// A present user record means authenticated: `user_id` is the
	/// provider subject (falling back to the email when the subject is
	/// empty), `session_id` is the subject, and the remaining fields are
	/// copied through when present. Anything else degrades to
	/// [`UserData::guest`].
	pub fn from_session(session: Option<&Session>) -> Self {
		let Some(user) = session.and_then(Session::user) else {
			return Self::guest();
		};

		Self {
			user_type: UserType::Authenticated,
			user_id: user.best_id().map(str::to_string),
			user_email: user.email.clone().filter(|e| !e.is_empty()),
			user_name: user.name.clone().filter(|n| !n.is_empty()),
			session_id: Some(user.id.clone()).filter(|id| !id.is_empty()),
			google_id: user.google_id.clone().filter(|g| !g.is_empty()),
		}
	}

	/// Drops the `google_id` field.
	///
	/// Whether the provider subject travels on events is a single
	/// configuration point; the enricher calls this when it is switched
	/// off.
	#[must_use]
	pub fn without_google_id(mut self) -> Self {
		self.google_id = None;
		self
	}

	/// The property-map form of these attributes; absent fields are
	/// omitted entirely rather than serialized as null.
	pub fn to_properties(&self) -> Properties {
		let mut params = Properties::new().insert("user_type", self.user_type.as_str());
		if let Some(user_id) = &self.user_id {
			params.set("user_id", user_id.as_str());
		}
		if let Some(user_email) = &self.user_email {
			params.set("user_email", user_email.as_str());
		}
		if let Some(user_name) = &self.user_name {
			params.set("user_name", user_name.as_str());
		}
		if let Some(session_id) = &self.session_id {
			params.set("session_id", session_id.as_str());
		}
		if let Some(google_id) = &self.google_id {
			params.set("google_id", google_id.as_str());
		}
		params
	}

	/// The property-map form of an explicit context reset: identity
	/// fields present but null, `user_type` forced to guest.
	pub fn reset_properties() -> Properties {
		Properties::new()
			.insert("user_id", Value::Null)
			.insert("user_email", Value::Null)
			.insert("user_name", Value::Null)
			.insert("user_type", UserType::Guest.as_str())
	}
}

impl Default for UserData {
	fn default() -> Self {
		Self::guest()
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provider-issued identity claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The Google ID-token claims that survive the OAuth exchange.
///
/// Only the fields the application reads are modeled; everything else in
/// the token is dropped at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdTokenClaims {
	/// Provider-issued subject identifier.
	pub sub: String,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub picture: Option<String>,

	/// When this token's user signed in. Stamped once at issuance and
	/// carried through refreshes unchanged.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub login_time: Option<DateTime<Utc>>,
}

impl IdTokenClaims {
	/// Creates a claim set carrying only the subject.
	pub fn new(sub: impl Into<String>) -> Self {
		Self {
			sub: sub.into(),
			email: None,
			name: None,
			picture: None,
			login_time: None,
		}
	}

	/// Sets the email claim (builder pattern).
	#[must_use]
	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());
		self
	}

	/// Sets the display name claim (builder pattern).
	#[must_use]
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Sets the picture claim (builder pattern).
	#[must_use]
	pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
		self.picture = Some(picture.into());
		self
	}

	/// Stamps the login time if not already set. First login wins for
	/// the lifetime of the token.
	pub fn stamp_login_time(&mut self, at: DateTime<Utc>) {
		if self.login_time.is_none() {
			self.login_time = Some(at);
		}
	}
}

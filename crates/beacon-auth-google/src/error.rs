// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for session enrichment.

use thiserror::Error;

/// Errors that can occur while building a session from token claims.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthSessionError {
	/// ID token carried no usable subject
	#[error("ID token has no subject")]
	MissingSubject,
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the analytics core.

use thiserror::Error;

/// Errors that can occur when parsing analytics core types.
///
/// Identity resolution and event enrichment themselves never fail; these
/// errors exist only for the parsing edges (user type strings, measurement
/// identifiers).
#[derive(Debug, Error)]
pub enum AnalyticsCoreError {
	/// Invalid user type string
	#[error("invalid user type: {0}")]
	InvalidUserType(String),

	/// Invalid measurement ID
	#[error("invalid measurement ID: {0}")]
	InvalidMeasurementId(String),
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the analytics SDK.
//!
//! Nothing on the instrumentation path surfaces these to callers; they
//! exist for the dispatch internals, where a failed delivery is logged
//! and dropped.

use thiserror::Error;

/// Errors from the Measurement Protocol dispatch path.
#[derive(Debug, Error)]
pub enum AnalyticsError {
	/// HTTP request failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Collect endpoint rejected the payload.
	#[error("collect endpoint rejected hit ({status})")]
	Rejected { status: u16 },
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejected_display_includes_status() {
		let err = AnalyticsError::Rejected { status: 403 };
		assert_eq!(err.to_string(), "collect endpoint rejected hit (403)");
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Web analytics instrumentation SDK for Beacon.
//!
//! This crate turns an optional authenticated session into stable
//! analytics identity and enriched events:
//!
//! - [`IdentityResolver`] derives a single stable identifier for the
//!   current visitor — email-derived for signed-in users, a persisted
//!   random id for guests.
//! - [`EventEnricher`] attaches identity and user attributes to every
//!   tracked interaction and pushes session-scoped config to the sink on
//!   login and logout.
//! - [`MeasurementProtocolSink`] ships enriched events to the Google
//!   Analytics Measurement Protocol via a background dispatch task.
//!
//! Instrumentation is best-effort by design: every operation is a silent
//! no-op when the sink or storage capability is absent, and nothing on
//! the tracking path blocks, retries, or returns an error.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use beacon_analytics::{
//!     AnalyticsConfig, EventEnricher, IdentityResolver, MemoryGuestIdStore,
//!     NoOpAnalyticsSink, SharedAnalyticsSink,
//! };
//! use beacon_analytics_core::{MeasurementId, Properties};
//!
//! let config = AnalyticsConfig::new("G-TV7JCEY4DV".parse::<MeasurementId>().unwrap());
//! let resolver = IdentityResolver::new(Arc::new(MemoryGuestIdStore::new()));
//! let sink: SharedAnalyticsSink = Arc::new(NoOpAnalyticsSink);
//! let enricher = EventEnricher::new(config, Some(sink), resolver);
//!
//! enricher.track("cta_clicked", Properties::new().insert("label", "Sign up"), None);
//! enricher.set_user_context(None);
//! ```

pub mod config;
pub mod dispatch;
pub mod enrich;
pub mod error;
pub mod identity;
pub mod sink;
pub mod store;

pub use config::AnalyticsConfig;
pub use dispatch::{
	Dispatcher, HitTransport, HttpTransport, MeasurementProtocolConfig, MeasurementProtocolSink,
	OutboundHit,
};
pub use enrich::{EventEnricher, PageView};
pub use error::{AnalyticsError, Result};
pub use identity::IdentityResolver;
pub use sink::{AnalyticsSink, NoOpAnalyticsSink, SharedAnalyticsSink};
pub use store::{GuestIdStore, MemoryGuestIdStore, SharedGuestIdStore};

// Re-export core types for convenience
pub use beacon_analytics_core::*;

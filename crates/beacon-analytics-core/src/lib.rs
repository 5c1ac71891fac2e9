// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Beacon web analytics instrumentation.
//!
//! This crate holds the pure data model shared by the instrumentation SDK
//! and the auth integration: the read-only session view, derived analytics
//! identities, the user attributes merged into every outgoing event, event
//! parameter maps, and the measurement target identifier.
//!
//! Nothing in this crate performs I/O. Identity derivation is deterministic
//! and total; the capability traits that touch storage and the network live
//! in `beacon-analytics`.

pub mod error;
pub mod identity;
pub mod measurement;
pub mod properties;
pub mod session;
pub mod user_data;

pub use error::AnalyticsCoreError;
pub use identity::{derived_auth_id, new_guest_id, AnalyticsIdentity, IdentityKind, GUEST_ID_KEY};
pub use measurement::MeasurementId;
pub use properties::Properties;
pub use session::{Session, SessionUser};
pub use user_data::{UserData, UserType};

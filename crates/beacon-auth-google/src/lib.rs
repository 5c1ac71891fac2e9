// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Google sign-in session enrichment for Beacon.
//!
//! The OAuth exchange itself happens elsewhere; this crate owns the
//! callback chain that turns verified ID-token claims into the
//! application [`Session`](beacon_analytics_core::Session) the rest of
//! the system reads: subject id copied onto the session user, the Google
//! account id carried alongside, and the login time stamped once per
//! token.

pub mod claims;
pub mod error;
pub mod session;

pub use claims::IdTokenClaims;
pub use error::AuthSessionError;
pub use session::build_session;

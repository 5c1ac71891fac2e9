// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The persistent client-storage capability for guest identifiers.
//!
//! Storage is scoped per client and optional: server-side evaluation
//! paths have none, and identity resolution degrades to an empty id
//! there. Reads and writes are unlocked across processes; concurrent
//! writers racing on the same slot resolve as last-write-wins, which is
//! acceptable for an analytics guest id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Persistent string storage scoped to the current client.
pub trait GuestIdStore: Send + Sync {
	/// Returns the stored value for `key`, if any.
	fn get(&self, key: &str) -> Option<String>;

	/// Stores `value` under `key`, replacing any previous value.
	fn set(&self, key: &str, value: &str);
}

/// Type alias for a shared guest-id store.
pub type SharedGuestIdStore = Arc<dyn GuestIdStore>;

/// An in-process store backed by a mutexed map.
///
/// Suitable for single-process reuse and tests; a browser-embedded
/// deployment would back this trait with its local storage instead.
#[derive(Debug, Default)]
pub struct MemoryGuestIdStore {
	inner: Mutex<HashMap<String, String>>,
}

impl MemoryGuestIdStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}
}

impl GuestIdStore for MemoryGuestIdStore {
	fn get(&self, key: &str) -> Option<String> {
		let map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
		map.get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
		map.insert(key.to_string(), value.to_string());
	}
}

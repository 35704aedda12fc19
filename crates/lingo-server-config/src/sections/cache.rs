// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User cache configuration.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_USER_TTL_SECS: u64 = 300;

/// User cache configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct CacheConfig {
	/// How long a cached user record is served before it is re-read.
	/// Zero disables caching.
	pub user_ttl_secs: u64,
}

impl CacheConfig {
	pub fn user_ttl(&self) -> Duration {
		Duration::from_secs(self.user_ttl_secs)
	}
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			user_ttl_secs: DEFAULT_USER_TTL_SECS,
		}
	}
}

/// Cache configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfigLayer {
	#[serde(default)]
	pub user_ttl_secs: Option<u64>,
}

impl CacheConfigLayer {
	pub fn merge(&mut self, other: CacheConfigLayer) {
		if other.user_ttl_secs.is_some() {
			self.user_ttl_secs = other.user_ttl_secs;
		}
	}

	pub fn finalize(self) -> CacheConfig {
		CacheConfig {
			user_ttl_secs: self.user_ttl_secs.unwrap_or(DEFAULT_USER_TTL_SECS),
		}
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User directory with a read-through cache.
//!
//! Handlers resolve users through the [`UserDirectory`] trait. The production
//! implementation is [`UserCache`], which sits in front of a [`UserStore`] and
//! keeps recently fetched records in memory for a configurable TTL.
//!
//! # Cache Semantics
//!
//! - Keys are lowercased, matching the store's case-insensitive lookup
//! - Only found users are cached; a miss is re-read on the next request
//! - Store failures are surfaced as [`DirectoryError::Unavailable`] and never cached
//! - A zero TTL disables caching entirely
//!
//! # Cleanup
//!
//! Stale entries are replaced on the next lookup.
//! [`crate::cleanup::spawn_user_cache_cleanup`] runs
//! [`UserCache::cleanup_expired`] periodically to bound memory for usernames
//! that are never requested again.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lingo_server_auth::User;
use lingo_server_db::UserStore;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::instrument;

/// Errors returned by a [`UserDirectory`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
	/// No user record exists for the username.
	#[error("user not found: {0}")]
	NotFound(String),

	/// The backing store could not be read.
	#[error("user directory unavailable: {0}")]
	Unavailable(String),
}

/// Looks up user records by username.
#[async_trait]
pub trait UserDirectory: Send + Sync {
	async fn get_by_username(&self, username: &str) -> Result<User, DirectoryError>;
}

#[derive(Debug, Clone)]
struct CacheEntry {
	user: User,
	fetched_at: Instant,
}

/// Read-through cache over a [`UserStore`].
pub struct UserCache<S> {
	store: S,
	ttl: Duration,
	entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl<S: UserStore> UserCache<S> {
	/// Create a cache that serves entries for up to `ttl` after they were read.
	pub fn new(store: S, ttl: Duration) -> Self {
		Self {
			store,
			ttl,
			entries: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Remove every entry older than the TTL. Returns the number removed.
	#[instrument(skip(self))]
	pub async fn cleanup_expired(&self) -> usize {
		let mut entries = self.entries.write().await;
		let before = entries.len();
		let ttl = self.ttl;
		entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);
		let removed = before - entries.len();
		if removed > 0 {
			tracing::debug!(removed, remaining = entries.len(), "expired user cache entries removed");
		}
		removed
	}

	/// Number of cached entries, including stale ones not yet cleaned up.
	pub(crate) async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	async fn cached(&self, key: &str) -> Option<User> {
		let entries = self.entries.read().await;
		entries
			.get(key)
			.filter(|entry| entry.fetched_at.elapsed() < self.ttl)
			.map(|entry| entry.user.clone())
	}
}

#[async_trait]
impl<S: UserStore> UserDirectory for UserCache<S> {
	#[instrument(skip(self), fields(cache_hit = tracing::field::Empty))]
	async fn get_by_username(&self, username: &str) -> Result<User, DirectoryError> {
		let key = cache_key(username);
		let span = tracing::Span::current();

		if let Some(user) = self.cached(&key).await {
			span.record("cache_hit", true);
			return Ok(user);
		}
		span.record("cache_hit", false);

		let user = match self.store.get_user_by_username(username).await {
			Ok(Some(user)) => user,
			Ok(None) => {
				tracing::debug!("user not found in store");
				return Err(DirectoryError::NotFound(username.to_string()));
			}
			Err(e) => {
				tracing::error!(error = %e, "failed to read user from store");
				return Err(DirectoryError::Unavailable(e.to_string()));
			}
		};

		if !self.ttl.is_zero() {
			self.entries.write().await.insert(
				key,
				CacheEntry {
					user: user.clone(),
					fetched_at: Instant::now(),
				},
			);
		}

		Ok(user)
	}
}

fn cache_key(username: &str) -> String {
	username.to_lowercase()
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Periodic background cleanup.
//!
//! - Expired sessions are deleted from the database
//! - Stale user cache entries are dropped from memory

use std::sync::Arc;
use std::time::Duration;

use lingo_server_db::{DbError, SessionStore, UserStore};
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::directory::UserCache;

/// Delete expired sessions once. Returns the number removed.
#[instrument(skip(sessions), fields(job_id = "session-cleanup"))]
pub async fn run_session_cleanup(sessions: &dyn SessionStore) -> Result<u64, DbError> {
	let sessions_deleted = sessions.cleanup_expired_sessions().await?;
	tracing::info!(sessions_deleted, "Session cleanup completed");
	Ok(sessions_deleted)
}

/// Spawn a task that runs [`run_session_cleanup`] every `interval`.
///
/// Returns `None` when `interval` is zero. Failures are logged and the loop
/// keeps running.
pub fn spawn_session_cleanup<S>(sessions: S, interval: Duration) -> Option<JoinHandle<()>>
where
	S: SessionStore + 'static,
{
	if interval.is_zero() {
		tracing::info!("session cleanup disabled");
		return None;
	}

	Some(tokio::spawn(async move {
		let mut ticker = tokio::time::interval(interval);
		ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
		loop {
			ticker.tick().await;
			if let Err(e) = run_session_cleanup(&sessions).await {
				tracing::warn!(error = %e, "session cleanup failed");
			}
		}
	}))
}

/// Spawn a task that sweeps stale entries out of `cache` every `interval`.
///
/// Returns `None` when `interval` is zero. A zero cache TTL never stores
/// entries, so callers pass the TTL itself as the interval.
pub fn spawn_user_cache_cleanup<S>(
	cache: Arc<UserCache<S>>,
	interval: Duration,
) -> Option<JoinHandle<()>>
where
	S: UserStore + 'static,
{
	if interval.is_zero() {
		tracing::info!("user cache cleanup disabled");
		return None;
	}

	Some(tokio::spawn(async move {
		let mut ticker = tokio::time::interval(interval);
		ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
		loop {
			ticker.tick().await;
			cache.cleanup_expired().await;
		}
	}))
}

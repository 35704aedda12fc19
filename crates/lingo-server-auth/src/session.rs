// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sessions bind an opaque token to a username.
//!
//! # Security Model
//!
//! - Session tokens are generated using 32 bytes of cryptographic randomness
//! - Only the SHA-256 hash of a token is persisted (see [`crate::hash_token`])
//! - Sessions have a fixed expiry; there is no sliding extension

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::SessionId;

/// Default session lifetime in hours (30 days).
pub const SESSION_EXPIRY_HOURS: i64 = 24 * 30;

/// A session issued to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	pub id: SessionId,
	pub username: String,
	pub created_at: DateTime<Utc>,
	pub expires_at: DateTime<Utc>,
}

impl Session {
	/// Create a new session for `username` that expires after `ttl_hours`.
	///
	/// Returns `None` when the expiry is not representable.
	#[instrument(level = "debug", fields(username = %username))]
	pub fn new(username: &str, ttl_hours: i64) -> Option<Self> {
		let now = Utc::now();
		let expires_at = now.checked_add_signed(Duration::try_hours(ttl_hours)?)?;
		Some(Self {
			id: SessionId::generate(),
			username: username.to_string(),
			created_at: now,
			expires_at,
		})
	}

	/// Check if the session is expired.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(Utc::now())
	}

	/// Check expiry against an explicit instant.
	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		now >= self.expires_at
	}
}

/// Generates a cryptographically secure random session token.
pub fn generate_session_token() -> String {
	use rand::Rng;
	let mut rng = rand::thread_rng();
	let bytes: [u8; 32] = rng.gen();
	hex::encode(bytes)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_session_expires_after_ttl() {
		let session = Session::new("alice", 2).unwrap();
		assert_eq!(session.username, "alice");
		assert_eq!(session.expires_at - session.created_at, Duration::hours(2));
		assert!(!session.is_expired());
	}

	#[test]
	fn session_is_expired_at_boundary() {
		let session = Session::new("alice", 1).unwrap();
		assert!(session.is_expired_at(session.expires_at));
		assert!(!session.is_expired_at(session.expires_at - Duration::seconds(1)));
	}

	#[test]
	fn zero_ttl_session_is_immediately_expired() {
		assert!(Session::new("alice", 0).unwrap().is_expired());
	}

	#[test]
	fn unrepresentable_ttl_is_rejected() {
		assert!(Session::new("alice", i64::MAX).is_none());
		assert!(Session::new("alice", 3_000_000_000).is_none());
		assert!(Session::new("alice", i64::MIN).is_none());
	}

	#[test]
	fn generated_tokens_are_64_hex_chars_and_unique() {
		let a = generate_session_token();
		let b = generate_session_token();
		assert_eq!(a.len(), 64);
		assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
		assert_ne!(a, b);
	}
}

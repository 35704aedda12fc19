// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity types for the Lingo server.
//!
//! This crate provides:
//! - [`User`] - directory record carrying the stored language preference
//! - [`Session`] - a credential bound to a username
//! - [`middleware`] - request-level auth context and header extraction helpers
//! - [`hash_token`] - one-way hashing applied to every credential before lookup

pub mod error;
pub mod middleware;
pub mod session;
pub mod types;
pub mod user;

pub use error::AuthError;
pub use session::{generate_session_token, Session, SESSION_EXPIRY_HOURS};
pub use types::*;
pub use user::{validate_language, validate_username, User};

/// Hash a token using SHA-256 and return the hex-encoded result.
///
/// Raw tokens are never stored; the sessions table only ever sees this hash.
pub fn hash_token(token: &str) -> String {
	use sha2::{Digest, Sha256};
	let mut hasher = Sha256::new();
	hasher.update(token.as_bytes());
	hex::encode(hasher.finalize())
}

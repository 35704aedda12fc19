// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User directory records.
//!
//! A [`User`] is keyed by its unique `username` and carries the caller's stored
//! language preference. Records are created by operators (see the `user create`
//! CLI command) and are read-only from the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A user in the directory.
///
/// # PII Handling
///
/// `display_name` is user-provided PII and should not be logged. Log the
/// `id` or `username` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// Unique identifier for this user.
	pub id: UserId,

	/// Unique login name. Lookups are case-insensitive.
	pub username: String,

	/// Display name shown in the UI.
	pub display_name: String,

	/// Preferred language code (e.g., "en", "fr", "pt-BR").
	/// Never empty; enforced by [`validate_language`] on creation.
	pub language: String,

	/// When the user was created.
	pub created_at: DateTime<Utc>,

	/// When the user was last updated.
	pub updated_at: DateTime<Utc>,
}

impl User {
	/// Create a new user record with a fresh ID and timestamps.
	pub fn new(
		username: impl Into<String>,
		display_name: impl Into<String>,
		language: impl Into<String>,
	) -> Self {
		let now = Utc::now();
		Self {
			id: UserId::generate(),
			username: username.into(),
			display_name: display_name.into(),
			language: language.into(),
			created_at: now,
			updated_at: now,
		}
	}

	/// Validate both the username and the language of this record.
	pub fn validate(&self) -> Result<(), &'static str> {
		validate_username(&self.username)?;
		validate_language(&self.language)
	}
}

/// Validates a username.
///
/// Rules:
/// - 2-64 characters
/// - ASCII letters, digits, `_`, `.` and `-` only
/// - Must start with a letter or digit
pub fn validate_username(username: &str) -> Result<(), &'static str> {
	if username.len() < 2 {
		return Err("Username must be at least 2 characters");
	}
	if username.len() > 64 {
		return Err("Username must be at most 64 characters");
	}
	if !username
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
	{
		return Err("Username can only contain letters, numbers, '_', '.' and '-'");
	}
	if !username.starts_with(|c: char| c.is_ascii_alphanumeric()) {
		return Err("Username must start with a letter or number");
	}
	Ok(())
}

/// Validates a language code.
///
/// Accepts a primary language subtag of 2-3 ASCII letters followed by any
/// number of `-`-separated subtags of 2-8 ASCII alphanumerics, e.g. `en`,
/// `fr`, `pt-BR`, `zh-Hant-TW`.
pub fn validate_language(language: &str) -> Result<(), &'static str> {
	if language.is_empty() {
		return Err("Language must not be empty");
	}

	let mut subtags = language.split('-');
	let primary = subtags.next().unwrap_or_default();
	if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
		return Err("Language must start with a 2 or 3 letter code");
	}

	for subtag in subtags {
		if !(2..=8).contains(&subtag.len()) || !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
			return Err("Language subtags must be 2-8 letters or digits");
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_user_has_matching_timestamps() {
		let user = User::new("alice", "Alice", "fr");
		assert_eq!(user.username, "alice");
		assert_eq!(user.language, "fr");
		assert_eq!(user.created_at, user.updated_at);
	}

	#[test]
	fn validate_accepts_well_formed_record() {
		assert!(User::new("alice", "Alice", "fr").validate().is_ok());
	}

	#[test]
	fn validate_rejects_empty_language() {
		assert!(User::new("alice", "Alice", "").validate().is_err());
	}

	mod username {
		use super::*;

		#[test]
		fn accepts_common_forms() {
			assert!(validate_username("bob").is_ok());
			assert!(validate_username("jane.doe").is_ok());
			assert!(validate_username("svc-reporting_2").is_ok());
		}

		#[test]
		fn rejects_too_short_and_too_long() {
			assert!(validate_username("a").is_err());
			assert!(validate_username(&"a".repeat(65)).is_err());
		}

		#[test]
		fn rejects_leading_punctuation() {
			assert!(validate_username("_alice").is_err());
			assert!(validate_username(".alice").is_err());
		}

		#[test]
		fn rejects_whitespace_and_symbols() {
			assert!(validate_username("alice smith").is_err());
			assert!(validate_username("alice@example.com").is_err());
		}
	}

	mod language {
		use super::*;

		#[test]
		fn accepts_primary_codes() {
			assert!(validate_language("en").is_ok());
			assert!(validate_language("fr").is_ok());
			assert!(validate_language("fil").is_ok());
		}

		#[test]
		fn accepts_region_and_script_subtags() {
			assert!(validate_language("pt-BR").is_ok());
			assert!(validate_language("zh-Hant-TW").is_ok());
			assert!(validate_language("es-419").is_ok());
		}

		#[test]
		fn rejects_empty() {
			assert_eq!(validate_language(""), Err("Language must not be empty"));
		}

		#[test]
		fn rejects_malformed_primary() {
			assert!(validate_language("e").is_err());
			assert!(validate_language("engl").is_err());
			assert!(validate_language("e1").is_err());
		}

		#[test]
		fn rejects_malformed_subtags() {
			assert!(validate_language("en-").is_err());
			assert!(validate_language("en-B").is_err());
			assert!(validate_language("en_US").is_err());
		}
	}
}

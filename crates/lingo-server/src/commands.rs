// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operator commands run from the `lingo-server` CLI.

use lingo_server_auth::{generate_session_token, hash_token, Session, User};
use lingo_server_db::{DbError, SessionStore, UserStore};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
	#[error(transparent)]
	Db(#[from] DbError),

	#[error("User not found: {0}")]
	UserNotFound(String),

	#[error("Session TTL out of range: {0} hours")]
	InvalidTtl(i64),
}

/// A freshly minted session. `token` is the only copy of the raw credential.
#[derive(Debug)]
pub struct IssuedSession {
	pub token: String,
	pub session: Session,
}

/// Insert a user. The display name defaults to the username.
#[instrument(skip(users, display_name))]
pub async fn create_user(
	users: &dyn UserStore,
	username: &str,
	language: &str,
	display_name: Option<&str>,
) -> Result<User, CommandError> {
	let user = User::new(username, display_name.unwrap_or(username), language);
	users.create_user(&user).await?;
	tracing::info!(user_id = %user.id, "user created");
	Ok(user)
}

/// Issue a session for an existing user.
///
/// The session is bound to the stored username so later lookups match the
/// record exactly, whatever casing the operator typed.
#[instrument(skip(users, sessions))]
pub async fn issue_session(
	users: &dyn UserStore,
	sessions: &dyn SessionStore,
	username: &str,
	ttl_hours: i64,
) -> Result<IssuedSession, CommandError> {
	if ttl_hours <= 0 {
		return Err(CommandError::InvalidTtl(ttl_hours));
	}

	let user = users
		.get_user_by_username(username)
		.await?
		.ok_or_else(|| CommandError::UserNotFound(username.to_string()))?;

	let token = generate_session_token();
	let session =
		Session::new(&user.username, ttl_hours).ok_or(CommandError::InvalidTtl(ttl_hours))?;
	sessions.create_session(&session, &hash_token(&token)).await?;

	tracing::info!(session_id = %session.id, expires_at = %session.expires_at, "session issued");
	Ok(IssuedSession { token, session })
}

#[cfg(test)]
mod tests {
	use super::*;
	use lingo_server_db::{testing::create_test_pool, SessionRepository, UserRepository};

	async fn repos() -> (UserRepository, SessionRepository) {
		let pool = create_test_pool().await;
		(UserRepository::new(pool.clone()), SessionRepository::new(pool))
	}

	#[tokio::test]
	async fn create_user_defaults_display_name() {
		let (users, _) = repos().await;
		let user = create_user(&users, "alice", "fr", None).await.unwrap();
		assert_eq!(user.display_name, "alice");
		assert!(users.get_user_by_username("ALICE").await.unwrap().is_some());
	}

	#[tokio::test]
	async fn create_user_rejects_bad_language() {
		let (users, _) = repos().await;
		let err = create_user(&users, "alice", "", Some("Alice"))
			.await
			.unwrap_err();
		assert!(matches!(err, CommandError::Db(DbError::Validation(_))));
	}

	#[tokio::test]
	async fn issue_session_stores_only_the_hash() {
		let (users, sessions) = repos().await;
		create_user(&users, "Alice", "fr", None).await.unwrap();

		let issued = issue_session(&users, &sessions, "alice", 24).await.unwrap();
		assert_eq!(issued.session.username, "Alice");

		let found = sessions
			.get_session_by_token_hash(&hash_token(&issued.token))
			.await
			.unwrap()
			.unwrap();
		assert_eq!(found.id, issued.session.id);
		assert!(sessions
			.get_session_by_token_hash(&issued.token)
			.await
			.unwrap()
			.is_none());
	}

	#[tokio::test]
	async fn issue_session_requires_existing_user() {
		let (users, sessions) = repos().await;
		let err = issue_session(&users, &sessions, "bob", 24)
			.await
			.unwrap_err();
		assert!(matches!(err, CommandError::UserNotFound(name) if name == "bob"));
	}

	#[tokio::test]
	async fn issue_session_rejects_non_positive_ttl() {
		let (users, sessions) = repos().await;
		assert!(matches!(
			issue_session(&users, &sessions, "alice", 0).await,
			Err(CommandError::InvalidTtl(0))
		));
	}

	#[tokio::test]
	async fn issue_session_rejects_out_of_range_ttl() {
		let (users, sessions) = repos().await;
		create_user(&users, "alice", "fr", None).await.unwrap();

		for ttl in [i64::MAX, 3_000_000_000] {
			assert!(matches!(
				issue_session(&users, &sessions, "alice", ttl).await,
				Err(CommandError::InvalidTtl(t)) if t == ttl
			));
		}
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use lingo_server_auth::{Session, SessionId};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;
use crate::user::parse_timestamp;

#[async_trait]
pub trait SessionStore: Send + Sync {
	async fn create_session(&self, session: &Session, token_hash: &str) -> Result<(), DbError>;
	async fn get_session_by_token_hash(&self, token_hash: &str)
		-> Result<Option<Session>, DbError>;
	async fn cleanup_expired_sessions(&self) -> Result<u64, DbError>;
}

#[async_trait]
impl SessionStore for SessionRepository {
	async fn create_session(&self, session: &Session, token_hash: &str) -> Result<(), DbError> {
		self.create_session(session, token_hash).await
	}

	async fn get_session_by_token_hash(
		&self,
		token_hash: &str,
	) -> Result<Option<Session>, DbError> {
		self.get_session_by_token_hash(token_hash).await
	}

	async fn cleanup_expired_sessions(&self) -> Result<u64, DbError> {
		self.cleanup_expired_sessions().await
	}
}

/// Repository for session database operations.
///
/// Only token hashes are stored. Looking a session up never tells the caller
/// whether it has expired; that check belongs to the auth layer.
#[derive(Clone)]
pub struct SessionRepository {
	pool: SqlitePool,
}

impl SessionRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Persist a session under the hash of its token.
	///
	/// # Errors
	/// `DbError::Conflict` if the token hash is already in use.
	#[tracing::instrument(skip(self, session, token_hash), fields(session_id = %session.id, username = %session.username))]
	pub async fn create_session(&self, session: &Session, token_hash: &str) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			INSERT INTO sessions (id, username, token_hash, created_at, expires_at)
			VALUES (?, ?, ?, ?, ?)
			"#,
		)
		.bind(session.id.to_string())
		.bind(&session.username)
		.bind(token_hash)
		.bind(session.created_at.to_rfc3339())
		.bind(session.expires_at.to_rfc3339())
		.execute(&self.pool)
		.await;

		match result {
			Ok(_) => {
				tracing::debug!("session created");
				Ok(())
			}
			Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
				Err(DbError::Conflict("session token already in use".to_string()))
			}
			Err(e) => Err(e.into()),
		}
	}

	/// Look up a session by token hash.
	///
	/// # Returns
	/// `None` if no session matches. Expired sessions are still returned.
	#[tracing::instrument(skip(self, token_hash))]
	pub async fn get_session_by_token_hash(
		&self,
		token_hash: &str,
	) -> Result<Option<Session>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, username, created_at, expires_at
			FROM sessions
			WHERE token_hash = ?
			"#,
		)
		.bind(token_hash)
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_session(&r)).transpose()
	}

	/// Delete every session whose expiry has passed. Returns the number removed.
	#[tracing::instrument(skip(self))]
	pub async fn cleanup_expired_sessions(&self) -> Result<u64, DbError> {
		let now = chrono::Utc::now().to_rfc3339();
		let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
			.bind(&now)
			.execute(&self.pool)
			.await?;

		let removed = result.rows_affected();
		if removed > 0 {
			tracing::info!(removed, "expired sessions deleted");
		}
		Ok(removed)
	}
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<Session, DbError> {
	let id_str: String = row.get("id");
	let id = Uuid::parse_str(&id_str)
		.map_err(|e| DbError::Internal(format!("Invalid session ID: {e}")))?;

	let created_at: String = row.get("created_at");
	let expires_at: String = row.get("expires_at");

	Ok(Session {
		id: SessionId::new(id),
		username: row.get("username"),
		created_at: parse_timestamp("created_at", &created_at)?,
		expires_at: parse_timestamp("expires_at", &expires_at)?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_test_pool;
	use chrono::{Duration, Utc};
	use lingo_server_auth::{generate_session_token, hash_token};

	async fn make_repo() -> SessionRepository {
		SessionRepository::new(create_test_pool().await)
	}

	#[tokio::test]
	async fn test_create_and_lookup_by_hash() {
		let repo = make_repo().await;
		let session = Session::new("alice", 1).unwrap();
		let token = generate_session_token();
		repo
			.create_session(&session, &hash_token(&token))
			.await
			.unwrap();

		let found = repo
			.get_session_by_token_hash(&hash_token(&token))
			.await
			.unwrap()
			.unwrap();
		assert_eq!(found.id, session.id);
		assert_eq!(found.username, "alice");
		assert!(!found.is_expired());
	}

	#[tokio::test]
	async fn test_lookup_with_raw_token_misses() {
		let repo = make_repo().await;
		let token = generate_session_token();
		repo
			.create_session(&Session::new("alice", 1).unwrap(), &hash_token(&token))
			.await
			.unwrap();

		assert!(repo
			.get_session_by_token_hash(&token)
			.await
			.unwrap()
			.is_none());
	}

	#[tokio::test]
	async fn test_duplicate_token_hash_is_conflict() {
		let repo = make_repo().await;
		let hash = hash_token("same-token");
		repo
			.create_session(&Session::new("alice", 1).unwrap(), &hash)
			.await
			.unwrap();

		let result = repo.create_session(&Session::new("bob", 1).unwrap(), &hash).await;
		assert!(matches!(result, Err(DbError::Conflict(_))));
	}

	#[tokio::test]
	async fn test_expired_session_is_returned_and_then_purged() {
		let repo = make_repo().await;
		let mut session = Session::new("alice", 1).unwrap();
		session.expires_at = Utc::now() - Duration::minutes(5);
		let hash = hash_token("expired-token");
		repo.create_session(&session, &hash).await.unwrap();

		let found = repo.get_session_by_token_hash(&hash).await.unwrap().unwrap();
		assert!(found.is_expired());

		assert_eq!(repo.cleanup_expired_sessions().await.unwrap(), 1);
		assert!(repo.get_session_by_token_hash(&hash).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_purge_keeps_live_sessions() {
		let repo = make_repo().await;
		let hash = hash_token("live-token");
		repo
			.create_session(&Session::new("alice", 1).unwrap(), &hash)
			.await
			.unwrap();

		assert_eq!(repo.cleanup_expired_sessions().await.unwrap(), 0);
		assert!(repo.get_session_by_token_hash(&hash).await.unwrap().is_some());
	}
}

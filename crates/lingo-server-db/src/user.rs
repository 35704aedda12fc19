// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User repository for database operations.
//!
//! Users are keyed by a case-insensitive unique username. The HTTP surface only
//! reads them; creation happens through the operator CLI.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lingo_server_auth::{User, UserId};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

#[async_trait]
pub trait UserStore: Send + Sync {
	async fn create_user(&self, user: &User) -> Result<(), DbError>;
	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError>;
}

#[async_trait]
impl UserStore for UserRepository {
	async fn create_user(&self, user: &User) -> Result<(), DbError> {
		self.create_user(user).await
	}

	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		self.get_user_by_username(username).await
	}
}

/// Repository for user database operations.
///
/// All user IDs are UUIDs stored as strings in SQLite; timestamps are RFC 3339.
#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	/// Create a new repository with the given connection pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a new user in the database.
	///
	/// # Errors
	/// - `DbError::Validation` if the username or language is malformed
	/// - `DbError::Conflict` if the username is already taken (case-insensitive)
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id, username = %user.username))]
	pub async fn create_user(&self, user: &User) -> Result<(), DbError> {
		user
			.validate()
			.map_err(|msg| DbError::Validation(msg.to_string()))?;

		let result = sqlx::query(
			r#"
			INSERT INTO users (id, username, display_name, language, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.to_string())
		.bind(&user.username)
		.bind(&user.display_name)
		.bind(&user.language)
		.bind(user.created_at.to_rfc3339())
		.bind(user.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await;

		match result {
			Ok(_) => {
				tracing::debug!("user created");
				Ok(())
			}
			Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(DbError::Conflict(
				format!("username '{}' is already taken", user.username),
			)),
			Err(e) => Err(e.into()),
		}
	}

	/// Get a user by username (case-insensitive).
	///
	/// # Returns
	/// `None` if no user has this username. Callers decide whether absence is
	/// an error.
	#[tracing::instrument(skip(self))]
	pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, username, display_name, language, created_at, updated_at
			FROM users
			WHERE LOWER(username) = LOWER(?)
			"#,
		)
		.bind(username)
		.fetch_optional(&self.pool)
		.await?;

		let result = row.map(|r| row_to_user(&r)).transpose()?;
		if let Some(ref user) = result {
			tracing::debug!(user_id = %user.id, "user found by username");
		}
		Ok(result)
	}
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	let id_str: String = row.get("id");
	let id =
		Uuid::parse_str(&id_str).map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))?;

	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(User {
		id: UserId::new(id),
		username: row.get("username"),
		display_name: row.get("display_name"),
		language: row.get("language"),
		created_at: parse_timestamp("created_at", &created_at)?,
		updated_at: parse_timestamp("updated_at", &updated_at)?,
	})
}

pub(crate) fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::directory::DirectoryError;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// No credentials, or the credentials did not resolve to a user.
	#[error("Unauthorized: {0}")]
	Unauthorized(String),

	/// The authenticated username has no directory record.
	#[error("User not found: {0}")]
	UserNotFound(String),

	/// The user directory could not be read.
	#[error("User directory unavailable: {0}")]
	DirectoryUnavailable(String),
}

impl From<DirectoryError> for ServerError {
	fn from(e: DirectoryError) -> Self {
		match e {
			DirectoryError::NotFound(username) => ServerError::UserNotFound(username),
			DirectoryError::Unavailable(reason) => ServerError::DirectoryUnavailable(reason),
		}
	}
}

/// Error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
	/// Machine-readable error code, e.g. `user_not_found`.
	pub error: String,
	/// Human-readable description.
	pub message: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			message: message.into(),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error_response) = match &self {
			ServerError::Unauthorized(msg) => (
				StatusCode::UNAUTHORIZED,
				ErrorResponse::new("unauthorized", msg.clone()),
			),
			ServerError::UserNotFound(username) => {
				tracing::debug!(username = %username, "user not found");
				(
					StatusCode::NOT_FOUND,
					ErrorResponse::new("user_not_found", format!("User not found: {username}")),
				)
			}
			ServerError::DirectoryUnavailable(reason) => {
				tracing::error!(error = %reason, "user directory unavailable");
				(
					StatusCode::SERVICE_UNAVAILABLE,
					ErrorResponse::new(
						"directory_unavailable",
						"The user directory is temporarily unavailable",
					),
				)
			}
		};

		(status, Json(error_response)).into_response()
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request-level authentication context.
//!
//! This module provides:
//! - [`CurrentUser`] - the resolved principal for a request
//! - [`AuthContext`] - auth state stored in request extensions
//! - [`AuthConfig`] - configuration for credential extraction
//! - Helper functions for extracting session cookies and bearer tokens
//!
//! # Authentication Flow
//!
//! ```text
//! Request → Extract Cookie/Bearer → hash_token → Session lookup → AuthContext
//!                                                      │
//!                                                      └── none valid → dev user (dev mode only)
//! ```
//!
//! Token values are never logged.

use http::header::{AUTHORIZATION, COOKIE};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::SessionId;

/// Default name for the session cookie.
pub const SESSION_COOKIE_NAME: &str = "lingo_session";

/// Username used for dev mode authentication when none is configured.
pub const DEFAULT_DEV_USERNAME: &str = "dev";

/// The principal of the current request.
///
/// Handlers receive this explicitly through an extractor rather than reading
/// ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
	/// Username of the authenticated caller.
	pub username: String,
	/// Session ID if authenticated via a session token.
	pub session_id: Option<SessionId>,
}

impl CurrentUser {
	/// Create a CurrentUser from a validated session.
	pub fn from_session(username: impl Into<String>, session_id: SessionId) -> Self {
		Self {
			username: username.into(),
			session_id: Some(session_id),
		}
	}

	/// Create a CurrentUser for dev mode (no backing session).
	pub fn from_dev_mode(username: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			session_id: None,
		}
	}

	/// The username to resolve against the user directory.
	pub fn username(&self) -> &str {
		&self.username
	}
}

/// Authentication context for request processing.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
	/// The current user, if authenticated.
	pub current_user: Option<CurrentUser>,
}

impl AuthContext {
	/// Create a new unauthenticated context.
	pub fn unauthenticated() -> Self {
		Self { current_user: None }
	}

	/// Create a new authenticated context.
	pub fn authenticated(current_user: CurrentUser) -> Self {
		Self {
			current_user: Some(current_user),
		}
	}

	/// Require authentication, returning the current user or an error.
	pub fn require_user(&self) -> Result<&CurrentUser, crate::AuthError> {
		self
			.current_user
			.as_ref()
			.ok_or(crate::AuthError::AuthenticationRequired)
	}
}

/// Configuration for authentication middleware.
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Authenticate credential-less requests as `dev_username`.
	pub dev_mode: bool,
	/// Username assumed in dev mode.
	pub dev_username: String,
	/// Name of the session cookie.
	pub session_cookie_name: String,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			dev_mode: false,
			dev_username: DEFAULT_DEV_USERNAME.to_string(),
			session_cookie_name: SESSION_COOKIE_NAME.to_string(),
		}
	}
}

impl AuthConfig {
	/// Create a new AuthConfig with default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set dev mode.
	pub fn with_dev_mode(mut self, enabled: bool) -> Self {
		self.dev_mode = enabled;
		self
	}

	/// Set the username used in dev mode.
	pub fn with_dev_username(mut self, username: impl Into<String>) -> Self {
		self.dev_username = username.into();
		self
	}

	/// Set the session cookie name.
	pub fn with_session_cookie_name(mut self, name: impl Into<String>) -> Self {
		self.session_cookie_name = name.into();
		self
	}
}

/// Extract the session token from the Cookie header with a custom cookie name.
///
/// Returns `None` if the header is missing, not valid UTF-8, or has no cookie
/// called `cookie_name`.
pub fn extract_session_cookie_with_name(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
	headers
		.get(COOKIE)?
		.to_str()
		.ok()?
		.split(';')
		.find_map(|cookie| {
			let cookie = cookie.trim();
			let (name, value) = cookie.split_once('=')?;

			if name == cookie_name {
				Some(value.to_string())
			} else {
				None
			}
		})
}

/// Extract bearer token from the Authorization header.
///
/// Expects the format: `Authorization: Bearer <token>`. The prefix is
/// case-sensitive.
#[instrument(level = "trace", skip_all)]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	let auth_header = headers.get(AUTHORIZATION)?;
	let auth_str = auth_header.to_str().ok()?;
	auth_str
		.strip_prefix("Bearer ")
		.map(|token| token.to_string())
}

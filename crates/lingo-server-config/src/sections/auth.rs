// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication configuration.

use serde::Deserialize;

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_DEV_USERNAME: &str = "dev";
const DEFAULT_SESSION_COOKIE_NAME: &str = "lingo_session";
const DEFAULT_SESSION_CLEANUP_INTERVAL_SECS: u64 = 3600;

/// Authentication configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Authenticate credential-less requests as `dev_username`.
	pub dev_mode: bool,
	pub dev_username: String,
	/// Deployment environment name. Dev mode is refused in `production`.
	pub environment: String,
	pub session_cookie_name: String,
	/// Interval between purges of expired sessions. Zero disables the purge.
	pub session_cleanup_interval_secs: u64,
}

impl AuthConfig {
	pub fn is_production(&self) -> bool {
		self.environment.eq_ignore_ascii_case("production")
	}
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			dev_mode: false,
			dev_username: DEFAULT_DEV_USERNAME.to_string(),
			environment: DEFAULT_ENVIRONMENT.to_string(),
			session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
			session_cleanup_interval_secs: DEFAULT_SESSION_CLEANUP_INTERVAL_SECS,
		}
	}
}

/// Authentication configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub dev_mode: Option<bool>,
	#[serde(default)]
	pub dev_username: Option<String>,
	#[serde(default)]
	pub environment: Option<String>,
	#[serde(default)]
	pub session_cookie_name: Option<String>,
	#[serde(default)]
	pub session_cleanup_interval_secs: Option<u64>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.dev_mode.is_some() {
			self.dev_mode = other.dev_mode;
		}
		if other.dev_username.is_some() {
			self.dev_username = other.dev_username;
		}
		if other.environment.is_some() {
			self.environment = other.environment;
		}
		if other.session_cookie_name.is_some() {
			self.session_cookie_name = other.session_cookie_name;
		}
		if other.session_cleanup_interval_secs.is_some() {
			self.session_cleanup_interval_secs = other.session_cleanup_interval_secs;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			dev_mode: self.dev_mode.unwrap_or(false),
			dev_username: self
				.dev_username
				.unwrap_or_else(|| DEFAULT_DEV_USERNAME.to_string()),
			environment: self
				.environment
				.unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
			session_cookie_name: self
				.session_cookie_name
				.unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string()),
			session_cleanup_interval_secs: self
				.session_cleanup_interval_secs
				.unwrap_or(DEFAULT_SESSION_CLEANUP_INTERVAL_SECS),
		}
	}
}

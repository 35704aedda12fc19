// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use lingo_server_auth::middleware::AuthConfig;
use lingo_server_config::ServerConfig;
use lingo_server_db::{SessionRepository, UserRepository};
use sqlx::sqlite::SqlitePool;

use crate::{
	auth_middleware::auth_layer,
	directory::{UserCache, UserDirectory},
	routes,
};

/// Shared state for every request.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	/// Directory consulted by handlers.
	pub user_directory: Arc<dyn UserDirectory>,
	/// The cache behind `user_directory`, kept typed for background cleanup.
	pub user_cache: Arc<UserCache<UserRepository>>,
	pub session_repo: Arc<SessionRepository>,
	pub auth_config: AuthConfig,
}

/// Build application state from a migrated pool and resolved configuration.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let user_cache = Arc::new(UserCache::new(
		UserRepository::new(pool.clone()),
		config.cache.user_ttl(),
	));
	let user_directory: Arc<dyn UserDirectory> = user_cache.clone();
	let session_repo = Arc::new(SessionRepository::new(pool.clone()));

	let auth_config = AuthConfig::new()
		.with_dev_mode(config.auth.dev_mode)
		.with_dev_username(config.auth.dev_username.clone())
		.with_session_cookie_name(config.auth.session_cookie_name.clone());

	if auth_config.dev_mode {
		tracing::warn!(
			dev_username = %auth_config.dev_username,
			"dev mode enabled: unauthenticated requests will act as the dev user"
		);
	}

	AppState {
		pool,
		user_directory,
		user_cache,
		session_repo,
		auth_config,
	}
}

/// Build the HTTP router.
///
/// `/health` and `/api/openapi.json` are public. `/user/language` requires an
/// authenticated caller.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/api/openapi.json", get(routes::docs::openapi_json))
		.route("/user/language", get(routes::users::get_language))
		.layer(from_fn_with_state(state.clone(), auth_layer))
		.with_state(state)
}

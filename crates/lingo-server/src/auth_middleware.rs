// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication middleware for Axum.
//!
//! Resolves the caller's username from a session cookie or a bearer token and
//! hands it to handlers through the [`RequireAuth`] extractor.
//!
//! # Security Properties
//!
//! - **Token Protection**: Tokens are hashed with SHA-256 before database lookup;
//!   raw tokens are never stored or logged.
//! - **Session Expiry**: Sessions are validated against their expiry on every request.
//! - **Dev Mode Bypass**: In development mode (`LINGO_SERVER_AUTH_DEV_MODE=1`),
//!   requests without valid credentials authenticate as the configured dev
//!   username. Configuration loading refuses this in production.
//!
//! # Usage
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/user/language", get(get_language))
//!     .layer(from_fn_with_state(state.clone(), auth_layer));
//!
//! async fn get_language(RequireAuth(user): RequireAuth) -> impl IntoResponse {
//!     user.username().to_string()
//! }
//! ```

use axum::{
	body::Body,
	extract::{FromRequestParts, State},
	http::{request::Parts, Request},
	middleware::Next,
	response::{IntoResponse, Response},
};
use lingo_server_auth::{
	hash_token,
	middleware::{extract_bearer_token, extract_session_cookie_with_name, AuthContext, CurrentUser},
	AuthError,
};
use lingo_server_db::SessionStore;
use tracing::instrument;

use crate::{api::AppState, error::ServerError};

/// Authentication middleware that stores an [`AuthContext`] in request extensions.
///
/// # Token Priority
///
/// 1. Session cookie
/// 2. Bearer token
/// 3. Dev user (dev mode only)
///
/// An invalid cookie does not stop a valid bearer token from being tried.
#[instrument(
	name = "auth_layer",
	skip(state, request, next),
	fields(
		auth_method = tracing::field::Empty,
		username = tracing::field::Empty,
	)
)]
pub async fn auth_layer(
	State(state): State<AppState>,
	mut request: Request<Body>,
	next: Next,
) -> Response {
	let span = tracing::Span::current();
	let headers = request.headers();

	let candidates = [
		(
			"session_cookie",
			extract_session_cookie_with_name(headers, &state.auth_config.session_cookie_name),
		),
		("bearer", extract_bearer_token(headers)),
	];

	for (method, token) in candidates {
		let Some(token) = token else { continue };
		match authenticate_session(&token, state.session_repo.as_ref()).await {
			Ok(current_user) => {
				span.record("auth_method", method);
				span.record("username", current_user.username());
				request
					.extensions_mut()
					.insert(AuthContext::authenticated(current_user));
				return next.run(request).await;
			}
			Err(e) => {
				tracing::debug!(auth_method = method, reason = %e, "credential rejected");
			}
		}
	}

	if state.auth_config.dev_mode {
		let username = state.auth_config.dev_username.clone();
		span.record("auth_method", "dev_mode");
		span.record("username", username.as_str());
		tracing::warn!("DEV MODE AUTHENTICATION ENABLED - DO NOT USE IN PRODUCTION");
		request
			.extensions_mut()
			.insert(AuthContext::authenticated(CurrentUser::from_dev_mode(
				username,
			)));
		return next.run(request).await;
	}

	span.record("auth_method", "none");
	request
		.extensions_mut()
		.insert(AuthContext::unauthenticated());
	next.run(request).await
}

/// Resolve a raw session token to the user it was issued for.
///
/// The token is hashed before lookup. Store failures are logged and treated as
/// an authentication failure.
#[instrument(skip_all, fields(session_id = tracing::field::Empty))]
pub async fn authenticate_session(
	token: &str,
	sessions: &dyn SessionStore,
) -> Result<CurrentUser, AuthError> {
	let token_hash = hash_token(token);

	let session = match sessions.get_session_by_token_hash(&token_hash).await {
		Ok(Some(session)) => session,
		Ok(None) => return Err(AuthError::SessionNotFound),
		Err(e) => {
			tracing::error!(error = %e, "Failed to look up session");
			return Err(AuthError::AuthenticationRequired);
		}
	};

	tracing::Span::current().record("session_id", tracing::field::display(&session.id));

	if session.is_expired() {
		tracing::debug!(session_id = %session.id, "Session expired");
		return Err(AuthError::SessionExpired);
	}

	Ok(CurrentUser::from_session(session.username, session.id))
}

/// Extractor that requires authentication.
///
/// Returns 401 with `{"error":"unauthorized","message":"Authentication required"}`
/// when the request carries no valid credentials. The handler body never runs
/// in that case.
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
	S: Send + Sync,
{
	type Rejection = Response;

	#[instrument(name = "RequireAuth::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let auth_ctx = parts
			.extensions
			.get::<AuthContext>()
			.cloned()
			.unwrap_or_else(AuthContext::unauthenticated);

		match auth_ctx.require_user() {
			Ok(user) => {
				tracing::debug!(username = %user.username(), "Authentication required: success");
				Ok(RequireAuth(user.clone()))
			}
			Err(_) => {
				tracing::debug!("Authentication required: no valid credentials");
				Err(ServerError::Unauthorized("Authentication required".to_string()).into_response())
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use chrono::{Duration, Utc};
	use lingo_server_auth::Session;
	use lingo_server_db::DbError;
	use std::collections::HashMap;
	use std::sync::Mutex;

	#[derive(Default)]
	struct MemorySessions {
		by_hash: Mutex<HashMap<String, Session>>,
		fail: bool,
	}

	impl MemorySessions {
		fn insert(&self, token: &str, session: Session) {
			self
				.by_hash
				.lock()
				.unwrap()
				.insert(hash_token(token), session);
		}
	}

	#[async_trait]
	impl SessionStore for MemorySessions {
		async fn create_session(&self, session: &Session, token_hash: &str) -> Result<(), DbError> {
			self
				.by_hash
				.lock()
				.unwrap()
				.insert(token_hash.to_string(), session.clone());
			Ok(())
		}

		async fn get_session_by_token_hash(
			&self,
			token_hash: &str,
		) -> Result<Option<Session>, DbError> {
			if self.fail {
				return Err(DbError::Internal("offline".to_string()));
			}
			Ok(self.by_hash.lock().unwrap().get(token_hash).cloned())
		}

		async fn cleanup_expired_sessions(&self) -> Result<u64, DbError> {
			Ok(0)
		}
	}

	#[tokio::test]
	async fn valid_session_resolves_username() {
		let sessions = MemorySessions::default();
		let session = Session::new("alice", 1).unwrap();
		sessions.insert("tok", session.clone());

		let user = authenticate_session("tok", &sessions).await.unwrap();
		assert_eq!(user.username(), "alice");
		assert_eq!(user.session_id, Some(session.id));
	}

	#[tokio::test]
	async fn unknown_token_is_rejected() {
		let sessions = MemorySessions::default();
		assert_eq!(
			authenticate_session("nope", &sessions).await.unwrap_err(),
			AuthError::SessionNotFound
		);
	}

	#[tokio::test]
	async fn expired_session_is_rejected() {
		let sessions = MemorySessions::default();
		let mut session = Session::new("alice", 1).unwrap();
		session.expires_at = Utc::now() - Duration::seconds(1);
		sessions.insert("old", session);

		assert_eq!(
			authenticate_session("old", &sessions).await.unwrap_err(),
			AuthError::SessionExpired
		);
	}

	#[tokio::test]
	async fn store_failure_is_rejected() {
		let sessions = MemorySessions {
			fail: true,
			..Default::default()
		};
		assert_eq!(
			authenticate_session("tok", &sessions).await.unwrap_err(),
			AuthError::AuthenticationRequired
		);
	}

	mod require_auth_extractor {
		use super::*;
		use axum::{http::StatusCode, routing::get, Router};
		use tower::ServiceExt;

		async fn whoami(RequireAuth(user): RequireAuth) -> String {
			user.username().to_string()
		}

		fn app(ctx: Option<AuthContext>) -> Router {
			Router::new()
				.route("/whoami", get(whoami))
				.layer(axum::middleware::from_fn(
					move |mut req: Request<Body>, next: Next| {
						let ctx = ctx.clone();
						async move {
							if let Some(ctx) = ctx {
								req.extensions_mut().insert(ctx);
							}
							next.run(req).await
						}
					},
				))
		}

		#[tokio::test]
		async fn missing_context_is_401() {
			let response = app(None)
				.oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
				.await
				.unwrap();

			assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
			let body = axum::body::to_bytes(response.into_body(), usize::MAX)
				.await
				.unwrap();
			let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
			assert_eq!(
				json,
				serde_json::json!({"error": "unauthorized", "message": "Authentication required"})
			);
		}

		#[tokio::test]
		async fn authenticated_context_reaches_handler() {
			let ctx = AuthContext::authenticated(CurrentUser::from_dev_mode("alice"));
			let response = app(Some(ctx))
				.oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
				.await
				.unwrap();

			assert_eq!(response.status(), StatusCode::OK);
			let body = axum::body::to_bytes(response.into_body(), usize::MAX)
				.await
				.unwrap();
			assert_eq!(&body[..], b"alice");
		}
	}
}

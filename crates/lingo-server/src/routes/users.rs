// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-user HTTP handlers.

use axum::{
	extract::State,
	http::header::CONTENT_TYPE,
	response::IntoResponse,
};

use crate::{api::AppState, auth_middleware::RequireAuth, error::ServerError};

#[utoipa::path(
    get,
    path = "/user/language",
    responses(
        (status = 200, description = "Caller's preferred language code", body = String, content_type = "text/plain"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Caller has no user record", body = crate::error::ErrorResponse),
        (status = 503, description = "User directory unavailable", body = crate::error::ErrorResponse)
    ),
    tag = "users"
)]
/// GET /user/language - Return the authenticated caller's stored language.
#[tracing::instrument(skip(state, current_user), fields(username = %current_user.username()))]
pub async fn get_language(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> Result<impl IntoResponse, ServerError> {
	let user = state
		.user_directory
		.get_by_username(current_user.username())
		.await?;

	tracing::debug!(language = %user.language, "language resolved");
	Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], user.language))
}

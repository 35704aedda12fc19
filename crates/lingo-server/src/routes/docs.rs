// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::api_docs::ApiDoc;

/// GET /api/openapi.json - Generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
	Json(ApiDoc::openapi())
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for public routes.

use axum::{
	body::Body,
	http::{Request, StatusCode},
};
use lingo_server::api::{create_app_state, create_router, AppState};
use lingo_server::db::{create_pool, run_migrations};
use lingo_server::ServerConfig;
use tempfile::tempdir;
use tower::ServiceExt;

async fn setup_test_app() -> (AppState, tempfile::TempDir) {
	let dir = tempdir().unwrap();
	let db_url = format!("sqlite:{}?mode=rwc", dir.path().join("health.db").display());
	let pool = create_pool(&db_url).await.unwrap();
	run_migrations(&pool).await.unwrap();
	(create_app_state(pool, &ServerConfig::default()), dir)
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
	let response = create_router(state)
		.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
		.await
		.unwrap();
	let status = response.status();
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	(status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_is_public_and_healthy() {
	let (state, _dir) = setup_test_app().await;

	let (status, json) = get_json(state, "/health").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["status"], "healthy");
	assert_eq!(json["components"]["database"]["status"], "healthy");
	assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_reports_closed_database() {
	let (state, _dir) = setup_test_app().await;
	state.pool.close().await;

	let (status, json) = get_json(state, "/health").await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(json["status"], "unhealthy");
}

#[tokio::test]
async fn test_openapi_document_is_public() {
	let (state, _dir) = setup_test_app().await;

	let (status, json) = get_json(state, "/api/openapi.json").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["info"]["title"], "Lingo Server API");
	assert!(json["paths"]["/user/language"].is_object());
}

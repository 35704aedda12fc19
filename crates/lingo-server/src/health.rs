// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check types and component probes.

use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use tokio::time::Instant;
use utoipa::ToSchema;

/// Overall or per-component health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
	Healthy,
	Unhealthy,
}

/// Result of probing a single dependency.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComponentHealth {
	pub status: HealthStatus,
	pub latency_ms: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Dependencies probed by `/health`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthComponents {
	pub database: ComponentHealth,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
	pub status: HealthStatus,
	/// RFC 3339 time the check completed.
	pub timestamp: String,
	pub duration_ms: u64,
	pub version: String,
	pub components: HealthComponents,
}

/// Probe the database with `SELECT 1`.
#[tracing::instrument(skip(pool))]
pub async fn check_database(pool: &SqlitePool) -> ComponentHealth {
	let start = Instant::now();
	let result = sqlx::query("SELECT 1").execute(pool).await;
	let latency_ms = start.elapsed().as_millis() as u64;

	match result {
		Ok(_) => ComponentHealth {
			status: HealthStatus::Healthy,
			latency_ms,
			error: None,
		},
		Err(e) => {
			tracing::warn!(error = %e, "database health check failed");
			ComponentHealth {
				status: HealthStatus::Unhealthy,
				latency_ms,
				error: Some("database unreachable".to_string()),
			}
		}
	}
}

/// The worst status among `components`.
pub fn aggregate_status(components: &HealthComponents) -> HealthStatus {
	components.database.status
}

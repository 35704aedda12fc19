// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for lingo-server.

use utoipa::OpenApi;

/// OpenAPI document served at `/api/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lingo Server API",
        version = "1.0.0",
        description = "Returns the stored language preference of the authenticated user.",
        license(name = "Proprietary")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health checks"),
        (name = "users", description = "Per-user preferences")
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::users::get_language,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::health::HealthResponse,
        crate::health::HealthComponents,
        crate::health::ComponentHealth,
        crate::health::HealthStatus,
    ))
)]
pub struct ApiDoc;

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lingo user language preference server.
//!
//! This crate provides an HTTP server that answers `GET /user/language` with
//! the stored language of the authenticated caller.

pub mod api;
pub mod api_docs;
pub mod auth_middleware;
pub mod cleanup;
pub mod commands;
pub mod directory;
pub mod error;
pub mod health;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use directory::{DirectoryError, UserCache, UserDirectory};
pub use error::ServerError;
pub use lingo_server_config::ServerConfig;
pub use lingo_server_db as db;

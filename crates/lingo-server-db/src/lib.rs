// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite persistence for Lingo users and sessions.

pub mod error;
pub mod pool;
pub mod session;
pub mod testing;
pub mod user;

pub use error::{DbError, Result};
pub use pool::{create_pool, run_migrations};
pub use session::{SessionRepository, SessionStore};
pub use user::{UserRepository, UserStore};

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication error types.

use thiserror::Error;

/// Errors that can occur while resolving the caller's identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
	/// No credentials were presented, or none of them were valid.
	#[error("authentication required")]
	AuthenticationRequired,

	/// The session exists but is past its expiry.
	#[error("session expired")]
	SessionExpired,

	/// No session matches the presented token.
	#[error("session not found")]
	SessionNotFound,
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lingo server binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use lingo_server::{
	commands, create_app_state, create_router,
	db::{create_pool, run_migrations, SessionRepository, UserRepository},
	cleanup::{spawn_session_cleanup, spawn_user_cache_cleanup},
};
use lingo_server_auth::SESSION_EXPIRY_HOURS;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// Lingo server - answers user language preference lookups.
#[derive(Parser, Debug)]
#[command(name = "lingo-server", about = "Lingo language preference server", version)]
struct Args {
	/// Config file to use instead of /etc/lingo/server.toml
	#[arg(long, short = 'c', env = "LINGO_SERVER_CONFIG", global = true)]
	config: Option<PathBuf>,

	/// Subcommands for lingo-server; without one the HTTP server starts
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
	/// Manage users
	#[command(subcommand)]
	User(UserCommand),
	/// Manage sessions
	#[command(subcommand)]
	Session(SessionCommand),
}

#[derive(Subcommand, Debug)]
enum UserCommand {
	/// Create a user with a language preference
	Create {
		#[arg(long)]
		username: String,
		/// Language code, e.g. "en" or "pt-BR"
		#[arg(long)]
		language: String,
		#[arg(long)]
		display_name: Option<String>,
	},
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
	/// Issue a session token for an existing user and print it once
	Issue {
		#[arg(long)]
		username: String,
		#[arg(long, default_value_t = SESSION_EXPIRY_HOURS)]
		ttl_hours: i64,
	},
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => lingo_server_config::load_config_with_file(path)?,
		None => lingo_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let pool = create_pool(&config.database.url).await?;
	run_migrations(&pool).await?;

	match args.command {
		Some(Command::User(UserCommand::Create {
			username,
			language,
			display_name,
		})) => {
			let users = UserRepository::new(pool.clone());
			let user =
				commands::create_user(&users, &username, &language, display_name.as_deref()).await?;
			println!("created user {} ({}) language={}", user.username, user.id, user.language);
			return Ok(());
		}
		Some(Command::Session(SessionCommand::Issue {
			username,
			ttl_hours,
		})) => {
			let users = UserRepository::new(pool.clone());
			let sessions = SessionRepository::new(pool.clone());
			let issued = commands::issue_session(&users, &sessions, &username, ttl_hours).await?;
			eprintln!(
				"session {} for {} expires {}",
				issued.session.id,
				issued.session.username,
				issued.session.expires_at.to_rfc3339()
			);
			println!("{}", issued.token);
			return Ok(());
		}
		Some(Command::Version) | None => {}
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting lingo-server"
	);

	let session_cleanup = spawn_session_cleanup(
		SessionRepository::new(pool.clone()),
		Duration::from_secs(config.auth.session_cleanup_interval_secs),
	);

	let state = create_app_state(pool, &config);
	let cache_cleanup = spawn_user_cache_cleanup(state.user_cache.clone(), config.cache.user_ttl());
	let app = create_router(state).layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);
	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	for handle in [session_cleanup, cache_cleanup].into_iter().flatten() {
		handle.abort();
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}

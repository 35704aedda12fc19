// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	AuthConfigLayer, CacheConfigLayer, DatabaseConfigLayer, HttpConfigLayer, LoggingConfigLayer,
};

/// Default system-wide config file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/lingo/server.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file yields an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new(SYSTEM_CONFIG_PATH)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: LINGO_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_layer(&|name| std::env::var(name).ok())
	}
}

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub(crate) fn load_layer(lookup: Lookup<'_>) -> Result<ServerConfigLayer, ConfigError> {
	let env = Env(lookup);
	Ok(ServerConfigLayer {
		http: Some(HttpConfigLayer {
			host: env.var("LINGO_SERVER_HOST"),
			port: env.parsed("LINGO_SERVER_PORT")?,
		}),
		database: Some(DatabaseConfigLayer {
			url: env.var("LINGO_SERVER_DATABASE_URL"),
		}),
		auth: Some(AuthConfigLayer {
			dev_mode: env.bool("LINGO_SERVER_AUTH_DEV_MODE"),
			dev_username: env.var("LINGO_SERVER_AUTH_DEV_USERNAME"),
			environment: env.var("LINGO_SERVER_ENV"),
			session_cookie_name: env.var("LINGO_SERVER_SESSION_COOKIE_NAME"),
			session_cleanup_interval_secs: env.parsed("LINGO_SERVER_SESSION_CLEANUP_INTERVAL_SECS")?,
		}),
		cache: Some(CacheConfigLayer {
			user_ttl_secs: env.parsed("LINGO_SERVER_CACHE_USER_TTL_SECS")?,
		}),
		logging: Some(LoggingConfigLayer {
			level: env.var("LINGO_SERVER_LOG_LEVEL"),
		}),
	})
}

struct Env<'a>(Lookup<'a>);

impl Env<'_> {
	fn var(&self, name: &str) -> Option<String> {
		(self.0)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Option<bool> {
		self
			.var(name)
			.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
	}

	fn parsed<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>, ConfigError> {
		match self.var(name) {
			Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("invalid {} value '{v}'", std::any::type_name::<T>()),
			}),
			None => Ok(None),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::collections::HashMap;
	use std::io::Write;

	fn layer_from(vars: &[(&str, &str)]) -> Result<ServerConfigLayer, ConfigError> {
		let map: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		load_layer(&|name| map.get(name).cloned())
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.http.is_none());
		assert!(layer.auth.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let layer = TomlSource::new("/nonexistent/lingo.toml").load().unwrap();
		assert!(layer.http.is_none());
	}

	#[test]
	fn test_toml_source_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[database]\nurl = \"sqlite:/tmp/lingo.db\"").unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		assert_eq!(
			layer.database.unwrap().url,
			Some("sqlite:/tmp/lingo.db".to_string())
		);
	}

	#[test]
	fn test_toml_source_reports_parse_errors() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[http\nport = ").unwrap();

		let result = TomlSource::new(file.path()).load();
		assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
	}

	#[test]
	fn test_env_reads_lingo_variables() {
		let layer = layer_from(&[
			("LINGO_SERVER_PORT", "9000"),
			("LINGO_SERVER_AUTH_DEV_MODE", "1"),
			("LINGO_SERVER_AUTH_DEV_USERNAME", "alice"),
			("LINGO_SERVER_CACHE_USER_TTL_SECS", "15"),
		])
		.unwrap();

		assert_eq!(layer.http.unwrap().port, Some(9000));
		let auth = layer.auth.unwrap();
		assert_eq!(auth.dev_mode, Some(true));
		assert_eq!(auth.dev_username, Some("alice".to_string()));
		assert_eq!(layer.cache.unwrap().user_ttl_secs, Some(15));
	}

	#[test]
	fn test_env_empty_values_are_ignored() {
		let layer = layer_from(&[("LINGO_SERVER_HOST", ""), ("LINGO_SERVER_PORT", "")]).unwrap();
		let http = layer.http.unwrap();
		assert!(http.host.is_none());
		assert!(http.port.is_none());
	}

	#[test]
	fn test_env_invalid_number_is_an_error() {
		let result = layer_from(&[("LINGO_SERVER_PORT", "not-a-port")]);
		match result {
			Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "LINGO_SERVER_PORT"),
			other => panic!("expected InvalidValue, got {other:?}"),
		}
	}

	#[test]
	fn test_env_bool_false_values() {
		let layer = layer_from(&[("LINGO_SERVER_AUTH_DEV_MODE", "no")]).unwrap();
		assert_eq!(layer.auth.unwrap().dev_mode, Some(false));
	}

	proptest! {
		#[test]
		fn env_port_roundtrips(port in any::<u16>()) {
			let value = port.to_string();
			let layer = layer_from(&[("LINGO_SERVER_PORT", value.as_str())]).unwrap();
			prop_assert_eq!(layer.http.unwrap().port, Some(port));
		}
	}
}

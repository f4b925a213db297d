//! Settings for schema autoconfiguration
//!
//! Settings are read from TOML and then overridden by environment
//! variables (environment > file > defaults).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default prefix of environment variable overrides.
pub const DEFAULT_ENV_PREFIX: &str = "GRAPHQL_TOOLS_";

/// Default pattern for schema documents, relative to the schema root.
pub const DEFAULT_SCHEMA_LOCATION_PATTERN: &str = "**/*.graphqls";

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid value for {key}: {value:?}")]
	InvalidValue { key: String, value: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings consumed by [`GraphQLToolsAutoConfiguration`](crate::GraphQLToolsAutoConfiguration).
///
/// # Examples
///
/// ```
/// use graphql_boot_tools::ToolsSettings;
///
/// let settings = ToolsSettings::from_toml_str(r#"
/// schema_location_pattern = "graphql/*.graphqls"
/// introspection_enabled = false
///
/// [parser_options]
/// max_depth = 12
/// "#).unwrap();
///
/// assert!(!settings.introspection_enabled);
/// assert_eq!(settings.parser_options.max_depth, Some(12));
/// // unspecified keys keep their defaults
/// assert!(settings.error_handlers_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsSettings {
	/// Directory searched for schema documents
	pub schema_root: PathBuf,
	/// Glob matched against paths relative to `schema_root`
	pub schema_location_pattern: String,
	pub introspection_enabled: bool,
	/// Whether executed responses are passed through the error mapper
	pub error_handlers_enabled: bool,
	pub parser_options: ParserOptionsSettings,
}

impl Default for ToolsSettings {
	fn default() -> Self {
		Self {
			schema_root: PathBuf::from("."),
			schema_location_pattern: DEFAULT_SCHEMA_LOCATION_PATTERN.to_string(),
			introspection_enabled: true,
			error_handlers_enabled: true,
			parser_options: ParserOptionsSettings::default(),
		}
	}
}

/// Parser and execution limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptionsSettings {
	/// Accept root fields that have no resolver; they fail when queried
	pub allow_unimplemented_resolvers: bool,
	pub max_depth: Option<usize>,
	pub max_complexity: Option<usize>,
	/// Maximum query document size in bytes
	pub max_query_size: Option<usize>,
}

impl ToolsSettings {
	pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
		Ok(toml::from_str(source)?)
	}

	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let content = fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&content)
	}

	/// Apply overrides from the process environment using [`DEFAULT_ENV_PREFIX`].
	pub fn with_env_overrides(self) -> SettingsResult<Self> {
		self.with_env_prefix(DEFAULT_ENV_PREFIX)
	}

	/// Apply overrides from the process environment using `prefix`.
	pub fn with_env_prefix(self, prefix: &str) -> SettingsResult<Self> {
		self.with_vars(std::env::vars(), prefix)
	}

	/// Apply overrides from `vars`, considering only keys starting with `prefix`.
	///
	/// The remainder of each key is matched case-insensitively against the
	/// setting names, e.g. `GRAPHQL_TOOLS_MAX_DEPTH` sets
	/// `parser_options.max_depth`.
	pub fn with_vars<I, K, V>(mut self, vars: I, prefix: &str) -> SettingsResult<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		for (key, value) in vars {
			let Some(name) = key.as_ref().strip_prefix(prefix) else {
				continue;
			};
			let name = name.to_lowercase();
			let value = value.as_ref();
			let options = &mut self.parser_options;

			match name.as_str() {
				"schema_root" => self.schema_root = PathBuf::from(value),
				"schema_location_pattern" => self.schema_location_pattern = value.to_string(),
				"introspection_enabled" => self.introspection_enabled = parse_bool(&name, value)?,
				"error_handlers_enabled" => {
					self.error_handlers_enabled = parse_bool(&name, value)?
				}
				"allow_unimplemented_resolvers" => {
					options.allow_unimplemented_resolvers = parse_bool(&name, value)?
				}
				"max_depth" => options.max_depth = Some(parse_usize(&name, value)?),
				"max_complexity" => options.max_complexity = Some(parse_usize(&name, value)?),
				"max_query_size" => options.max_query_size = Some(parse_usize(&name, value)?),
				_ => {
					tracing::debug!(key = key.as_ref(), "ignoring unknown settings override");
					continue;
				}
			}
			tracing::debug!(setting = %name, "applied environment override");
		}
		Ok(self)
	}
}

fn parse_bool(key: &str, value: &str) -> SettingsResult<bool> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(invalid(key, value)),
	}
}

fn parse_usize(key: &str, value: &str) -> SettingsResult<usize> {
	value.trim().parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> SettingsError {
	SettingsError::InvalidValue {
		key: key.to_string(),
		value: value.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::env;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[rstest]
	fn test_defaults() {
		let settings = ToolsSettings::default();
		assert_eq!(settings.schema_root, PathBuf::from("."));
		assert_eq!(settings.schema_location_pattern, "**/*.graphqls");
		assert!(settings.introspection_enabled);
		assert!(!settings.parser_options.allow_unimplemented_resolvers);
		assert_eq!(settings.parser_options.max_query_size, None);
	}

	#[rstest]
	fn test_empty_toml_is_default() {
		assert_eq!(ToolsSettings::from_toml_str("").unwrap(), ToolsSettings::default());
	}

	#[rstest]
	fn test_from_file() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
schema_root = "resources"
error_handlers_enabled = false

[parser_options]
allow_unimplemented_resolvers = true
"#
		)
		.unwrap();

		let settings = ToolsSettings::from_file(file.path()).unwrap();
		assert_eq!(settings.schema_root, PathBuf::from("resources"));
		assert!(!settings.error_handlers_enabled);
		assert!(settings.parser_options.allow_unimplemented_resolvers);
	}

	#[rstest]
	fn test_invalid_toml_type() {
		let result = ToolsSettings::from_toml_str("introspection_enabled = \"maybe\"");
		assert!(matches!(result, Err(SettingsError::Toml(_))));
	}

	#[rstest]
	fn test_vars_override_file_values() {
		let vars = [
			("GRAPHQL_TOOLS_INTROSPECTION_ENABLED", "off"),
			("GRAPHQL_TOOLS_MAX_DEPTH", "7"),
			("GRAPHQL_TOOLS_SCHEMA_LOCATION_PATTERN", "schema/*.graphql"),
			("OTHER_MAX_DEPTH", "99"),
		];
		let settings = ToolsSettings::default()
			.with_vars(vars, DEFAULT_ENV_PREFIX)
			.unwrap();

		assert!(!settings.introspection_enabled);
		assert_eq!(settings.parser_options.max_depth, Some(7));
		assert_eq!(settings.schema_location_pattern, "schema/*.graphql");
	}

	#[rstest]
	#[case("GRAPHQL_TOOLS_INTROSPECTION_ENABLED", "sometimes")]
	#[case("GRAPHQL_TOOLS_MAX_COMPLEXITY", "-1")]
	fn test_invalid_override(#[case] key: &str, #[case] value: &str) {
		let result = ToolsSettings::default().with_vars([(key, value)], DEFAULT_ENV_PREFIX);
		assert!(matches!(result, Err(SettingsError::InvalidValue { .. })));
	}

	#[rstest]
	#[serial(graphql_tools_env)]
	fn test_process_env_override() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::set_var("GBT_TEST_ERROR_HANDLERS_ENABLED", "0");
		}

		let settings = ToolsSettings::default().with_env_prefix("GBT_TEST_").unwrap();
		assert!(!settings.error_handlers_enabled);

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::remove_var("GBT_TEST_ERROR_HANDLERS_ENABLED");
		}
	}
}

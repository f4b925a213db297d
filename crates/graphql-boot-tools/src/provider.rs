//! Schema string providers

use crate::settings::ToolsSettings;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
	#[error("Invalid schema location pattern: {0}")]
	Pattern(#[from] glob::PatternError),

	#[error("Failed to scan schema root: {0}")]
	Walk(#[from] walkdir::Error),

	#[error("Failed to read schema file {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("No schema files found under {root} matching {pattern}")]
	NoSchemaFiles { root: PathBuf, pattern: String },
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Source of the SDL documents a schema is parsed from.
pub trait SchemaStringProvider: Send + Sync {
	fn schema_strings(&self) -> ProviderResult<Vec<String>>;
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
	case_sensitive: true,
	require_literal_separator: true,
	require_literal_leading_dot: false,
};

/// Reads every file under a root directory whose relative path matches a
/// glob pattern.
///
/// # Example
///
/// ```rust,no_run
/// use graphql_boot_tools::{FileSchemaStringProvider, SchemaStringProvider};
///
/// let provider = FileSchemaStringProvider::new("resources", "graphql/**/*.graphqls")?;
/// let documents = provider.schema_strings()?;
/// # Ok::<(), graphql_boot_tools::ProviderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileSchemaStringProvider {
	root: PathBuf,
	pattern: Pattern,
}

impl FileSchemaStringProvider {
	pub fn new(root: impl Into<PathBuf>, pattern: &str) -> ProviderResult<Self> {
		Ok(Self {
			root: root.into(),
			pattern: Pattern::new(pattern)?,
		})
	}

	pub fn from_settings(settings: &ToolsSettings) -> ProviderResult<Self> {
		Self::new(&settings.schema_root, &settings.schema_location_pattern)
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn pattern(&self) -> &str {
		self.pattern.as_str()
	}

	/// Matching files, sorted by path.
	pub fn schema_files(&self) -> ProviderResult<Vec<PathBuf>> {
		let mut files = Vec::new();

		for entry in WalkDir::new(&self.root).sort_by_file_name() {
			let entry = entry?;
			if !entry.file_type().is_file() {
				continue;
			}

			let path = entry.path();
			let Ok(relative) = path.strip_prefix(&self.root) else {
				continue;
			};
			if self.pattern.matches_path_with(relative, MATCH_OPTIONS) {
				files.push(path.to_path_buf());
			}
		}

		files.sort();
		Ok(files)
	}
}

impl SchemaStringProvider for FileSchemaStringProvider {
	fn schema_strings(&self) -> ProviderResult<Vec<String>> {
		let files = self.schema_files()?;
		if files.is_empty() {
			return Err(ProviderError::NoSchemaFiles {
				root: self.root.clone(),
				pattern: self.pattern.to_string(),
			});
		}
		tracing::debug!(
			root = %self.root.display(),
			pattern = %self.pattern,
			count = files.len(),
			"found schema files"
		);

		files
			.into_iter()
			.map(|path| {
				fs::read_to_string(&path).map_err(|source| ProviderError::Read { path, source })
			})
			.collect()
	}
}

/// Fixed, in-memory schema documents.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaStringProvider {
	documents: Vec<String>,
}

impl StaticSchemaStringProvider {
	pub fn new<I, S>(documents: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			documents: documents.into_iter().map(Into::into).collect(),
		}
	}
}

impl SchemaStringProvider for StaticSchemaStringProvider {
	fn schema_strings(&self) -> ProviderResult<Vec<String>> {
		Ok(self.documents.clone())
	}
}

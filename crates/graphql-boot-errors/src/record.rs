//! Protocol-level error records

use crate::class::ClassifiedError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message used when an error has no message of its own.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error(s) while executing query";

/// Extension key under which [`ErrorRecord::with_classification`] stores its tag.
pub const CLASSIFICATION_KEY: &str = "classification";

/// One error entry of a GraphQL response.
///
/// Serializes to the standard response shape, `{"message": ..., "extensions": {...}}`,
/// with `extensions` omitted when no structured data was attached.
///
/// # Examples
///
/// ```
/// use graphql_boot_errors::ErrorRecord;
/// use serde_json::json;
///
/// let record = ErrorRecord::new("name is required")
///     .with_classification("ValidationError")
///     .with_extension("field", "name");
///
/// assert_eq!(
///     serde_json::to_value(&record).unwrap(),
///     json!({
///         "message": "name is required",
///         "extensions": { "classification": "ValidationError", "field": "name" }
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
	message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	extensions: Option<Map<String, Value>>,
}

impl ErrorRecord {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			extensions: None,
		}
	}

	/// Build the record returned when no handler applies to `error` or the
	/// handler failed.
	pub fn fallback(error: &dyn ClassifiedError) -> Self {
		let message = error.to_string();
		if message.trim().is_empty() {
			Self::new(INTERNAL_ERROR_MESSAGE)
		} else {
			Self::new(message)
		}
	}

	pub fn with_classification(self, classification: impl Into<String>) -> Self {
		let classification: String = classification.into();
		self.with_extension(CLASSIFICATION_KEY, classification)
	}

	pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.extensions
			.get_or_insert_with(Map::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn classification(&self) -> Option<&str> {
		self.extensions
			.as_ref()?
			.get(CLASSIFICATION_KEY)
			.and_then(Value::as_str)
	}

	pub fn extensions(&self) -> Option<&Map<String, Value>> {
		self.extensions.as_ref()
	}
}

/// Conversion of a handler's return value into records.
///
/// Handlers may return a single record, a collection, an optional record,
/// or a `Result` of any of these; an `Err` marks the handler as failed.
pub trait IntoErrorRecords {
	fn into_error_records(self) -> Result<Vec<ErrorRecord>, String>;
}

impl IntoErrorRecords for ErrorRecord {
	fn into_error_records(self) -> Result<Vec<ErrorRecord>, String> {
		Ok(vec![self])
	}
}

impl IntoErrorRecords for Vec<ErrorRecord> {
	fn into_error_records(self) -> Result<Vec<ErrorRecord>, String> {
		Ok(self)
	}
}

impl IntoErrorRecords for Option<ErrorRecord> {
	fn into_error_records(self) -> Result<Vec<ErrorRecord>, String> {
		Ok(self.into_iter().collect())
	}
}

impl<T, E> IntoErrorRecords for Result<T, E>
where
	T: IntoErrorRecords,
	E: std::fmt::Display,
{
	fn into_error_records(self) -> Result<Vec<ErrorRecord>, String> {
		self.map_err(|e| e.to_string())?.into_error_records()
	}
}

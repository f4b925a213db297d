//! Custom scalar types

use async_graphql::Value;
use async_graphql::dynamic::Scalar;
use std::fmt;
use std::sync::Arc;

type ScalarValidator = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A custom scalar declared in the schema with `scalar Name`.
///
/// # Examples
///
/// ```
/// use async_graphql::Value;
/// use graphql_boot_tools::GraphQLScalar;
///
/// let date = GraphQLScalar::new("Date")
///     .description("Calendar date, YYYY-MM-DD")
///     .validator(|value| matches!(value, Value::String(s) if s.len() == 10));
///
/// assert!(date.is_valid(&Value::from("2024-02-29")));
/// assert!(!date.is_valid(&Value::from(20240229)));
/// ```
#[derive(Clone)]
pub struct GraphQLScalar {
	name: String,
	description: Option<String>,
	validator: Option<ScalarValidator>,
}

impl GraphQLScalar {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description: None,
			validator: None,
		}
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Check input literals and variables of this scalar.
	pub fn validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&Value) -> bool + Send + Sync + 'static,
	{
		self.validator = Some(Arc::new(validator));
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is_valid(&self, value: &Value) -> bool {
		self.validator.as_ref().is_none_or(|validator| validator(value))
	}

	pub(crate) fn to_dynamic(&self, schema_description: Option<&str>) -> Scalar {
		let mut scalar = Scalar::new(self.name.as_str());
		if let Some(description) = self.description.as_deref().or(schema_description) {
			scalar = scalar.description(description);
		}
		if let Some(validator) = &self.validator {
			let validator = Arc::clone(validator);
			scalar = scalar.validator(move |value| validator(value));
		}
		scalar
	}
}

impl fmt::Debug for GraphQLScalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GraphQLScalar")
			.field("name", &self.name)
			.field("description", &self.description)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

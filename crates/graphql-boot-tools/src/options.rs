//! Schema parser options

use crate::factory::TypeDefinitionFactory;
use crate::settings::{ParserOptionsSettings, ToolsSettings};
use std::fmt;
use std::sync::Arc;

/// Query protection limits applied to an executable schema.
///
/// Unset limits are not enforced.
///
/// # Examples
///
/// ```
/// use graphql_boot_tools::QueryLimits;
///
/// let limits = QueryLimits::default().with_max_query_size(16);
/// assert!(limits.check_query_size("{ a }").is_ok());
/// assert!(limits.check_query_size("{ a b c d e f g h }").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryLimits {
	/// Maximum allowed query depth
	pub max_depth: Option<usize>,
	/// Maximum allowed query complexity
	pub max_complexity: Option<usize>,
	/// Maximum allowed query string size in bytes
	pub max_query_size: Option<usize>,
}

impl QueryLimits {
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = Some(max_depth);
		self
	}

	pub fn with_max_complexity(mut self, max_complexity: usize) -> Self {
		self.max_complexity = Some(max_complexity);
		self
	}

	pub fn with_max_query_size(mut self, max_query_size: usize) -> Self {
		self.max_query_size = Some(max_query_size);
		self
	}

	/// Reject `query` when it is larger than `max_query_size`.
	pub fn check_query_size(&self, query: &str) -> Result<(), String> {
		match self.max_query_size {
			Some(max) if query.len() > max => Err(format!(
				"Query size {} bytes exceeds maximum of {} bytes",
				query.len(),
				max
			)),
			_ => Ok(()),
		}
	}
}

impl From<&ParserOptionsSettings> for QueryLimits {
	fn from(settings: &ParserOptionsSettings) -> Self {
		Self {
			max_depth: settings.max_depth,
			max_complexity: settings.max_complexity,
			max_query_size: settings.max_query_size,
		}
	}
}

/// Options controlling how a schema parser builds its schema.
#[derive(Clone)]
pub struct SchemaParserOptions {
	introspection_enabled: bool,
	allow_unimplemented_resolvers: bool,
	limits: QueryLimits,
	type_definition_factories: Vec<Arc<dyn TypeDefinitionFactory>>,
}

impl SchemaParserOptions {
	pub fn builder() -> SchemaParserOptionsBuilder {
		SchemaParserOptionsBuilder::default()
	}

	pub fn introspection_enabled(&self) -> bool {
		self.introspection_enabled
	}

	pub fn allow_unimplemented_resolvers(&self) -> bool {
		self.allow_unimplemented_resolvers
	}

	pub fn limits(&self) -> QueryLimits {
		self.limits
	}

	pub fn type_definition_factories(&self) -> &[Arc<dyn TypeDefinitionFactory>] {
		&self.type_definition_factories
	}
}

impl Default for SchemaParserOptions {
	fn default() -> Self {
		SchemaParserOptionsBuilder::default().build()
	}
}

impl fmt::Debug for SchemaParserOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let factories: Vec<_> = self
			.type_definition_factories
			.iter()
			.map(|factory| factory.name())
			.collect();
		f.debug_struct("SchemaParserOptions")
			.field("introspection_enabled", &self.introspection_enabled)
			.field("allow_unimplemented_resolvers", &self.allow_unimplemented_resolvers)
			.field("limits", &self.limits)
			.field("type_definition_factories", &factories)
			.finish()
	}
}

/// Builder for [`SchemaParserOptions`].
///
/// # Examples
///
/// ```
/// use graphql_boot_tools::{RelayConnectionFactory, SchemaParserOptions};
///
/// let options = SchemaParserOptions::builder()
///     .introspection_enabled(false)
///     .max_depth(8)
///     .type_definition_factory(RelayConnectionFactory)
///     .build();
///
/// assert!(!options.introspection_enabled());
/// assert_eq!(options.limits().max_depth, Some(8));
/// assert_eq!(options.type_definition_factories().len(), 1);
/// ```
#[derive(Clone)]
pub struct SchemaParserOptionsBuilder {
	options: SchemaParserOptions,
}

impl Default for SchemaParserOptionsBuilder {
	fn default() -> Self {
		Self {
			options: SchemaParserOptions {
				introspection_enabled: true,
				allow_unimplemented_resolvers: false,
				limits: QueryLimits::default(),
				type_definition_factories: Vec::new(),
			},
		}
	}
}

impl SchemaParserOptionsBuilder {
	/// Start from the parser options of `settings`.
	pub fn from_settings(settings: &ToolsSettings) -> Self {
		Self::default()
			.introspection_enabled(settings.introspection_enabled)
			.allow_unimplemented_resolvers(settings.parser_options.allow_unimplemented_resolvers)
			.limits(QueryLimits::from(&settings.parser_options))
	}

	pub fn introspection_enabled(mut self, enabled: bool) -> Self {
		self.options.introspection_enabled = enabled;
		self
	}

	/// Accept root fields without a resolver; querying them fails at
	/// execution time instead of at build time.
	pub fn allow_unimplemented_resolvers(mut self, allow: bool) -> Self {
		self.options.allow_unimplemented_resolvers = allow;
		self
	}

	pub fn limits(mut self, limits: QueryLimits) -> Self {
		self.options.limits = limits;
		self
	}

	pub fn max_depth(mut self, max_depth: usize) -> Self {
		self.options.limits.max_depth = Some(max_depth);
		self
	}

	pub fn max_complexity(mut self, max_complexity: usize) -> Self {
		self.options.limits.max_complexity = Some(max_complexity);
		self
	}

	pub fn max_query_size(mut self, max_query_size: usize) -> Self {
		self.options.limits.max_query_size = Some(max_query_size);
		self
	}

	pub fn type_definition_factory(mut self, factory: impl TypeDefinitionFactory + 'static) -> Self {
		self.options.type_definition_factories.push(Arc::new(factory));
		self
	}

	pub fn type_definition_factories<I>(mut self, factories: I) -> Self
	where
		I: IntoIterator<Item = Arc<dyn TypeDefinitionFactory>>,
	{
		self.options.type_definition_factories.extend(factories);
		self
	}

	pub fn build(self) -> SchemaParserOptions {
		self.options
	}
}

impl fmt::Debug for SchemaParserOptionsBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SchemaParserOptionsBuilder")
			.field(&self.options)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::factory::RelayConnectionFactory;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let options = SchemaParserOptions::default();
		assert!(options.introspection_enabled());
		assert!(!options.allow_unimplemented_resolvers());
		assert_eq!(options.limits(), QueryLimits::default());
		assert!(options.type_definition_factories().is_empty());
	}

	#[rstest]
	fn test_from_settings() {
		let mut settings = ToolsSettings::default();
		settings.introspection_enabled = false;
		settings.parser_options.allow_unimplemented_resolvers = true;
		settings.parser_options.max_complexity = Some(50);

		let options = SchemaParserOptionsBuilder::from_settings(&settings)
			.type_definition_factory(RelayConnectionFactory)
			.build();

		assert!(!options.introspection_enabled());
		assert!(options.allow_unimplemented_resolvers());
		assert_eq!(options.limits().max_complexity, Some(50));
		assert_eq!(options.limits().max_depth, None);
		assert_eq!(options.type_definition_factories()[0].name(), "relay-connection");
	}

	#[rstest]
	#[case(None, 10_000, true)]
	#[case(Some(10), 10, true)]
	#[case(Some(10), 11, false)]
	fn test_check_query_size(#[case] max: Option<usize>, #[case] size: usize, #[case] accepted: bool) {
		let limits = QueryLimits {
			max_query_size: max,
			..QueryLimits::default()
		};
		let query = "a".repeat(size);
		assert_eq!(limits.check_query_size(&query).is_ok(), accepted);
	}
}

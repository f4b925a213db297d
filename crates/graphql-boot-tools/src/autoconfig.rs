//! Schema autoconfiguration
//!
//! Assembles the schema components from [`ToolsSettings`] and whatever the
//! application registered. Every component can be supplied directly, in
//! which case the default construction is skipped.

use crate::directive::{SchemaDirective, SchemaDirectiveWiring};
use crate::error::SchemaError;
use crate::executable::ExecutableSchema;
use crate::factory::TypeDefinitionFactory;
use crate::options::{SchemaParserOptions, SchemaParserOptionsBuilder};
use crate::parser::{SchemaParser, SchemaParserBuilder};
use crate::provider::{FileSchemaStringProvider, ProviderError, SchemaStringProvider};
use crate::resolver::GraphQLResolver;
use crate::scalar::GraphQLScalar;
use crate::settings::ToolsSettings;
use crate::subscription::SubscriptionResolver;
use graphql_boot_errors::ErrorMapper;
use std::sync::Arc;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum AutoConfigError {
	#[error("Schema provider error: {0}")]
	Provider(#[from] ProviderError),

	#[error("Schema error: {0}")]
	Schema(#[from] SchemaError),
}

pub type AutoConfigResult<T> = Result<T, AutoConfigError>;

/// The components produced by [`GraphQLToolsAutoConfiguration::configure`].
#[derive(Debug)]
pub struct GraphQLToolsComponents {
	pub options: SchemaParserOptions,
	/// `None` when no resolver was registered and no parser supplied
	pub parser: Option<SchemaParser>,
	pub schema: Option<ExecutableSchema>,
}

/// Explicit construction of the schema components.
///
/// - schema strings come from the supplied provider, or from a
///   [`FileSchemaStringProvider`] built from the settings;
/// - parser options come from the supplied builder, or from the settings,
///   with the registered type definition factories appended;
/// - a schema parser is built only when resolvers or subscription resolvers
///   are registered, unless
///   one is supplied;
/// - an executable schema is built from the parser, unless one is supplied;
/// - the error mapper is attached when `error_handlers_enabled` is set.
///
/// # Examples
///
/// ```
/// use async_graphql::Value;
/// use async_graphql::dynamic::FieldFuture;
/// use graphql_boot_tools::{
///     GraphQLToolsAutoConfiguration, ObjectResolver, StaticSchemaStringProvider, ToolsSettings,
/// };
///
/// let components = GraphQLToolsAutoConfiguration::new(ToolsSettings::default())
///     .schema_string_provider(StaticSchemaStringProvider::new(["type Query { ping: String }"]))
///     .resolver(ObjectResolver::query().field("ping", |_| {
///         FieldFuture::from_value(Some(Value::from("pong")))
///     }))
///     .configure()
///     .unwrap();
///
/// assert!(components.parser.is_some());
/// assert!(components.schema.is_some());
/// ```
#[derive(Default)]
pub struct GraphQLToolsAutoConfiguration {
	settings: ToolsSettings,
	schema_string_provider: Option<Arc<dyn SchemaStringProvider>>,
	options_builder: Option<SchemaParserOptionsBuilder>,
	schema_parser: Option<SchemaParser>,
	executable_schema: Option<ExecutableSchema>,
	resolvers: Vec<Arc<dyn GraphQLResolver>>,
	subscription_resolvers: Vec<SubscriptionResolver>,
	scalars: Vec<GraphQLScalar>,
	directives: Vec<SchemaDirective>,
	directive_wirings: Vec<Arc<dyn SchemaDirectiveWiring>>,
	type_definition_factories: Vec<Arc<dyn TypeDefinitionFactory>>,
	error_mapper: Option<ErrorMapper>,
}

impl GraphQLToolsAutoConfiguration {
	pub fn new(settings: ToolsSettings) -> Self {
		Self {
			settings,
			..Self::default()
		}
	}

	pub fn settings(&self) -> &ToolsSettings {
		&self.settings
	}

	pub fn schema_string_provider(mut self, provider: impl SchemaStringProvider + 'static) -> Self {
		self.schema_string_provider = Some(Arc::new(provider));
		self
	}

	pub fn options_builder(mut self, builder: SchemaParserOptionsBuilder) -> Self {
		self.options_builder = Some(builder);
		self
	}

	pub fn schema_parser(mut self, parser: SchemaParser) -> Self {
		self.schema_parser = Some(parser);
		self
	}

	pub fn executable_schema(mut self, schema: ExecutableSchema) -> Self {
		self.executable_schema = Some(schema);
		self
	}

	pub fn resolver(mut self, resolver: impl GraphQLResolver + 'static) -> Self {
		self.resolvers.push(Arc::new(resolver));
		self
	}

	pub fn subscription_resolver(mut self, resolver: SubscriptionResolver) -> Self {
		self.subscription_resolvers.push(resolver);
		self
	}

	pub fn scalar(mut self, scalar: GraphQLScalar) -> Self {
		self.scalars.push(scalar);
		self
	}

	pub fn directive(mut self, directive: SchemaDirective) -> Self {
		self.directives.push(directive);
		self
	}

	pub fn directive_wiring(mut self, wiring: impl SchemaDirectiveWiring + 'static) -> Self {
		self.directive_wirings.push(Arc::new(wiring));
		self
	}

	pub fn type_definition_factory(mut self, factory: impl TypeDefinitionFactory + 'static) -> Self {
		self.type_definition_factories.push(Arc::new(factory));
		self
	}

	pub fn error_mapper(mut self, mapper: ErrorMapper) -> Self {
		self.error_mapper = Some(mapper);
		self
	}

	pub fn configure(self) -> AutoConfigResult<GraphQLToolsComponents> {
		let options = self.options();

		let parser = match self.schema_parser {
			Some(parser) => {
				tracing::debug!("using supplied schema parser");
				Some(parser)
			}
			None if self.resolvers.is_empty() && self.subscription_resolvers.is_empty() => {
				tracing::debug!("no resolvers registered, skipping schema parser");
				None
			}
			None => {
				let provider = match self.schema_string_provider {
					Some(provider) => provider,
					None => Arc::new(FileSchemaStringProvider::from_settings(&self.settings)?),
				};
				let parser = SchemaParserBuilder::new()
					.schema_strings(provider.schema_strings()?)
					.scalars(self.scalars)
					.options(options.clone())
					.schema_directives(self.directives)
					.directive_wirings(self.directive_wirings)
					.resolvers(self.resolvers)
					.subscription_resolvers(self.subscription_resolvers)
					.build()?;
				Some(parser)
			}
		};

		let schema = match (self.executable_schema, &parser) {
			(Some(schema), _) => {
				tracing::debug!("using supplied executable schema");
				Some(schema)
			}
			(None, Some(parser)) => Some(parser.make_executable_schema()?),
			(None, None) => None,
		};

		let schema = match (schema, self.error_mapper) {
			(Some(schema), Some(mapper)) if self.settings.error_handlers_enabled => {
				tracing::debug!(
					classes = mapper.bound_classes().count(),
					"attaching error mapper"
				);
				Some(schema.with_error_mapper(mapper))
			}
			(Some(schema), Some(_)) => {
				tracing::debug!("error handlers disabled, error mapper not attached");
				Some(schema)
			}
			(schema, _) => schema,
		};

		Ok(GraphQLToolsComponents {
			options,
			parser,
			schema,
		})
	}

	fn options(&self) -> SchemaParserOptions {
		let builder = match &self.options_builder {
			Some(builder) => builder.clone(),
			None => SchemaParserOptionsBuilder::from_settings(&self.settings),
		};
		builder
			.type_definition_factories(self.type_definition_factories.iter().cloned())
			.build()
	}
}

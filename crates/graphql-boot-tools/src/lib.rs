//! # graphql-boot tools
//!
//! Builds an executable GraphQL schema from SDL documents and resolvers.
//!
//! Schema documents are collected by a [`SchemaStringProvider`], merged into
//! [`SchemaDefinitions`], bound to [`GraphQLResolver`]s, scalars and
//! directive wirings by a [`SchemaParserBuilder`], and executed through the
//! `async-graphql` dynamic schema. [`GraphQLToolsAutoConfiguration`] does the
//! whole assembly from [`ToolsSettings`].
//!
//! ## Example
//!
//! ```
//! use async_graphql::Value;
//! use async_graphql::dynamic::FieldFuture;
//! use graphql_boot_tools::{
//!     GraphQLToolsAutoConfiguration, ObjectResolver, StaticSchemaStringProvider, ToolsSettings,
//! };
//!
//! # tokio_test::block_on(async {
//! let components = GraphQLToolsAutoConfiguration::new(ToolsSettings::default())
//!     .schema_string_provider(StaticSchemaStringProvider::new([
//!         "type Query { book: Book }",
//!         "type Book { title: String }",
//!     ]))
//!     .resolver(ObjectResolver::query().field("book", |_| {
//!         FieldFuture::new(async move {
//!             Ok(Some(Value::from_json(serde_json::json!({ "title": "Dune" }))?))
//!         })
//!     }))
//!     .configure()
//!     .unwrap();
//!
//! let schema = components.schema.unwrap();
//! let response = schema.execute("{ book { title } }").await;
//! assert_eq!(response.data.into_json().unwrap()["book"]["title"], "Dune");
//! # });
//! ```

pub mod autoconfig;
pub mod definitions;
pub mod directive;
pub mod error;
pub mod executable;
pub mod factory;
pub mod options;
pub mod parser;
pub mod provider;
pub mod resolver;
pub mod scalar;
pub mod settings;
pub mod subscription;

pub use autoconfig::{
	AutoConfigError, AutoConfigResult, GraphQLToolsAutoConfiguration, GraphQLToolsComponents,
};
pub use definitions::{
	BUILTIN_SCALARS, DefinitionKind, DirectiveDefinition, DirectiveUse, EnumValueDefinition,
	FieldDefinition, InputValueDefinition, SchemaDefinitions, TypeDefinition, named_type,
};
pub use directive::{DirectiveEnvironment, SchemaDirective, SchemaDirectiveWiring};
pub use error::{SchemaError, SchemaResult};
pub use executable::ExecutableSchema;
pub use factory::{CONNECTION_DIRECTIVE, RelayConnectionFactory, TypeDefinitionFactory};
pub use options::{QueryLimits, SchemaParserOptions, SchemaParserOptionsBuilder};
pub use parser::{SchemaParser, SchemaParserBuilder};
pub use provider::{
	FileSchemaStringProvider, ProviderError, ProviderResult, SchemaStringProvider,
	StaticSchemaStringProvider,
};
pub use resolver::{
	FieldResolver, FieldResolverFn, GraphQLResolver, ObjectResolver, ResolverTarget,
	resolve_field, resolver_fn, to_field_value,
};
pub use scalar::GraphQLScalar;
pub use settings::{
	DEFAULT_ENV_PREFIX, DEFAULT_SCHEMA_LOCATION_PATTERN, ParserOptionsSettings, SettingsError,
	SettingsResult, ToolsSettings,
};
pub use subscription::{
	SubscriptionFieldResolver, SubscriptionResolver, SubscriptionResolverFn, subscription_fn,
};

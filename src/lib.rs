//! # graphql-boot
//!
//! Schema-first GraphQL for applications built on `async-graphql`.
//!
//! The facade re-exports two crates:
//!
//! - [`errors`] maps application errors to GraphQL response errors through
//!   handlers bound to error classes;
//! - [`tools`] assembles an executable schema from SDL documents, resolvers,
//!   scalars and directive wirings.
//!
//! ## Feature Flags
//!
//! - `errors` - error mapping only
//! - `tools` - schema assembly, includes `errors`
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use graphql_boot::prelude::*;
//!
//! static NOT_FOUND: ErrorClass = ErrorClass::extends("NotFoundError", &ANY_ERROR);
//!
//! let mapper = ErrorMapper::builder()
//!     .register(&NOT_FOUND, |error: &dyn ClassifiedError| {
//!         ErrorRecord::new(error.to_string()).with_classification("NOT_FOUND")
//!     })?
//!     .build();
//!
//! let components = GraphQLToolsAutoConfiguration::new(ToolsSettings::from_file("graphql.toml")?)
//!     .resolver(ObjectResolver::query().field("book", find_book))
//!     .error_mapper(mapper)
//!     .configure()?;
//!
//! let response = components.schema.unwrap().execute("{ book(id: 1) { title } }").await;
//! ```

#[cfg(feature = "errors")]
pub use graphql_boot_errors as errors;

#[cfg(feature = "tools")]
pub use graphql_boot_tools as tools;

// Re-export error mapping
#[cfg(feature = "errors")]
pub use graphql_boot_errors::{
	ANY_ERROR, ClassifiedError, ErrorClass, ErrorHandlerSet, ErrorMapper, ErrorRecord,
	GenericError, IntoGraphQLError, TypedError,
};

// Re-export schema assembly
#[cfg(feature = "tools")]
pub use graphql_boot_tools::{
	ExecutableSchema, GraphQLToolsAutoConfiguration, ObjectResolver, SchemaParser,
	SchemaParserBuilder, ToolsSettings,
};

pub mod prelude {
	#[cfg(feature = "errors")]
	pub use graphql_boot_errors::{
		ANY_ERROR, ClassifiedError, ErrorClass, ErrorMapper, ErrorRecord, GenericError,
		IntoGraphQLError, TypedError, classified_error,
	};

	#[cfg(feature = "tools")]
	pub use graphql_boot_tools::{
		ExecutableSchema, FieldResolverFn, GraphQLResolver, GraphQLScalar,
		GraphQLToolsAutoConfiguration, ObjectResolver, SchemaDirective, SchemaParser,
		SchemaParserBuilder, SchemaParserOptions, SubscriptionResolver, ToolsSettings,
		resolver_fn,
	};
}

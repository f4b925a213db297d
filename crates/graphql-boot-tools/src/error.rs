//! Errors raised while assembling a schema

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
	#[error("Failed to parse schema document #{index}: {message}")]
	Parse { index: usize, message: String },

	#[error("Type {name} is defined as both {existing} and {duplicate}")]
	ConflictingDefinition {
		name: String,
		existing: &'static str,
		duplicate: &'static str,
	},

	#[error("{type_name}.{member} is declared more than once")]
	DuplicateMember { type_name: String, member: String },

	#[error("Type {0} is extended but never defined")]
	UndefinedExtension(String),

	#[error("Schema {operation} type is declared as both {existing} and {duplicate}")]
	ConflictingRoot {
		operation: &'static str,
		existing: String,
		duplicate: String,
	},

	#[error("Schema has no query type")]
	MissingQueryType,

	#[error("Root type {name} for {operation} is not an object type")]
	InvalidRoot {
		operation: &'static str,
		name: String,
	},

	#[error("{referenced_by} references unknown type {name}")]
	UnknownType { referenced_by: String, name: String },

	#[error("No scalar implementation registered for {0}")]
	MissingScalar(String),

	#[error("Resolver targets unknown object type {0}")]
	UnknownResolverType(String),

	#[error("Fields of subscription type {0} are resolved by a subscription resolver")]
	NotASubscriptionResolver(String),

	#[error("Resolver declares field {type_name}.{field} which is not in the schema")]
	UnknownResolverField { type_name: String, field: String },

	#[error("Field {type_name}.{field} is resolved more than once")]
	DuplicateResolver { type_name: String, field: String },

	#[error("No resolver found for field {type_name}.{field}")]
	MissingResolver { type_name: String, field: String },

	#[error("Input field {type_name}.{field} declares a default value, which is not applied to input objects; apply the default in the resolver")]
	InputFieldDefault { type_name: String, field: String },

	#[error("Failed to build executable schema: {0}")]
	Build(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;

//! Generated type definitions

use crate::definitions::{SchemaDefinitions, named_type};
use async_graphql::Value;
use std::collections::BTreeSet;

/// Contributes extra SDL documents derived from the user's schema.
///
/// Factories run in registration order; each one sees the definitions
/// produced by the factories before it.
pub trait TypeDefinitionFactory: Send + Sync {
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}

	fn create(&self, definitions: &SchemaDefinitions) -> Vec<String>;
}

/// Generates Relay connection types for fields marked with
/// `@connection(for: "Node")`.
///
/// For each node type `T` this adds `TConnection` and `TEdge`, plus a shared
/// `PageInfo` and the `@connection` directive itself when missing. Types
/// the schema already defines are left alone.
///
/// # Examples
///
/// ```
/// use graphql_boot_tools::{RelayConnectionFactory, SchemaDefinitions, TypeDefinitionFactory};
///
/// let documents = vec![
///     r#"type Query { users: UserConnection @connection(for: "User") }"#.to_string(),
///     "type User { id: ID! }".to_string(),
/// ];
/// let partial = SchemaDefinitions::parse_unvalidated(&documents).unwrap();
///
/// let mut all = documents.clone();
/// all.extend(RelayConnectionFactory.create(&partial));
///
/// let definitions = SchemaDefinitions::parse(&all).unwrap();
/// assert!(definitions.contains("UserConnection"));
/// assert!(definitions.contains("UserEdge"));
/// assert!(definitions.contains("PageInfo"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayConnectionFactory;

pub const CONNECTION_DIRECTIVE: &str = "connection";

impl RelayConnectionFactory {
	fn node_types(definitions: &SchemaDefinitions) -> BTreeSet<String> {
		definitions
			.fields_with_directive(CONNECTION_DIRECTIVE)
			.filter_map(|(ty, field, directive)| match directive.argument("for") {
				Some(Value::String(node)) => Some(node.clone()),
				_ => {
					tracing::warn!(
						field = %format!("{}.{}", ty.name, field.name),
						"@connection without a `for` argument, deriving node type from field type"
					);
					named_type(&field.ty)
						.strip_suffix("Connection")
						.map(str::to_string)
				}
			})
			.collect()
	}
}

impl TypeDefinitionFactory for RelayConnectionFactory {
	fn name(&self) -> &str {
		"relay-connection"
	}

	fn create(&self, definitions: &SchemaDefinitions) -> Vec<String> {
		let nodes = Self::node_types(definitions);
		if nodes.is_empty() {
			return Vec::new();
		}

		let mut sdl = String::new();
		if definitions.directive(CONNECTION_DIRECTIVE).is_none() {
			sdl.push_str("directive @connection(for: String!) on FIELD_DEFINITION\n");
		}
		if !definitions.contains("PageInfo") {
			sdl.push_str(
				"type PageInfo {\n\thasPreviousPage: Boolean!\n\thasNextPage: Boolean!\n\tstartCursor: String\n\tendCursor: String\n}\n",
			);
		}
		for node in &nodes {
			let connection = format!("{node}Connection");
			let edge = format!("{node}Edge");
			if !definitions.contains(&connection) {
				sdl.push_str(&format!(
					"type {connection} {{\n\tedges: [{edge}]\n\tpageInfo: PageInfo!\n}}\n"
				));
			}
			if !definitions.contains(&edge) {
				sdl.push_str(&format!("type {edge} {{\n\tcursor: String!\n\tnode: {node}\n}}\n"));
			}
		}

		tracing::debug!(nodes = ?nodes, "generated relay connection types");
		if sdl.is_empty() { Vec::new() } else { vec![sdl] }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	const QUERY: &str = r#"
		type Query {
			users: UserConnection @connection(for: "User")
			posts: PostConnection @connection(for: "Post")
		}
		type User { id: ID! }
		type Post { id: ID! }
	"#;

	#[rstest]
	fn test_schema_without_connections_generates_nothing() {
		// Arrange
		let base = SchemaDefinitions::parse(&["type Query { users: [User] } type User { id: ID! }"])
			.unwrap();

		// Act
		let generated = RelayConnectionFactory.create(&base);

		// Assert
		assert!(generated.is_empty());
	}

	#[rstest]
	fn test_generated_sdl_completes_the_schema() {
		// Arrange: the connection types are referenced but not defined yet
		assert!(SchemaDefinitions::parse(&[QUERY]).is_err());
		let partial = SchemaDefinitions::parse_unvalidated(&[QUERY]).unwrap();

		// Act
		let generated = RelayConnectionFactory.create(&partial);

		// Assert
		assert_eq!(generated.len(), 1);
		let definitions = SchemaDefinitions::parse(&[QUERY.to_string(), generated[0].clone()]).unwrap();
		for name in ["UserConnection", "UserEdge", "PostConnection", "PostEdge", "PageInfo"] {
			assert!(definitions.contains(name), "{name} missing");
		}
		let edge = definitions.get("UserEdge").unwrap().fields().unwrap();
		assert_eq!(named_type(&edge["node"].ty), "User");
		assert!(definitions.directive("connection").is_some());
	}

	#[rstest]
	fn test_existing_types_are_not_regenerated() {
		let seed = SchemaDefinitions::parse(&[
			QUERY,
			"type UserConnection { x: Int } type PostConnection { x: Int }",
			"type PageInfo { hasNextPage: Boolean! }",
		])
		.unwrap();
		assert!(seed.contains("PageInfo"));

		let generated = RelayConnectionFactory.create(&seed).join("\n");

		assert!(!generated.contains("type PageInfo"));
		assert!(!generated.contains("type UserConnection"));
		assert!(generated.contains("type UserEdge"));
	}
}

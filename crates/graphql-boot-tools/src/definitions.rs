//! Parsed and merged schema definitions
//!
//! Every SDL document is parsed with the `async-graphql` parser and folded
//! into one [`SchemaDefinitions`]. Definitions of the same type may be
//! spread over several documents (`type` or `extend type`): fields, union
//! members, enum values and interfaces are appended in document order.

use crate::error::{SchemaError, SchemaResult};
use async_graphql::Value;
use async_graphql::parser::types as ast;
use async_graphql::parser::{Positioned, parse_schema};
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Scalars every schema provides without registration.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

pub fn is_builtin_scalar(name: &str) -> bool {
	BUILTIN_SCALARS.contains(&name)
}

/// The innermost named type of a (possibly wrapped) type reference.
pub fn named_type(ty: &ast::Type) -> &str {
	match &ty.base {
		ast::BaseType::Named(name) => name.as_str(),
		ast::BaseType::List(inner) => named_type(inner),
	}
}

/// A directive applied to a schema element, with its constant arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveUse {
	pub name: String,
	pub arguments: IndexMap<String, Value>,
}

impl DirectiveUse {
	pub fn argument(&self, name: &str) -> Option<&Value> {
		self.arguments.get(name)
	}

	fn from_ast(directive: &Positioned<ast::ConstDirective>) -> Self {
		Self {
			name: directive.node.name.node.to_string(),
			arguments: directive
				.node
				.arguments
				.iter()
				.map(|(name, value)| (name.node.to_string(), value.node.clone()))
				.collect(),
		}
	}
}

#[derive(Debug, Clone)]
pub struct InputValueDefinition {
	pub name: String,
	pub description: Option<String>,
	pub ty: ast::Type,
	pub default_value: Option<Value>,
}

impl InputValueDefinition {
	fn from_ast(value: &Positioned<ast::InputValueDefinition>) -> Self {
		let value = &value.node;
		Self {
			name: value.name.node.to_string(),
			description: description(&value.description),
			ty: value.ty.node.clone(),
			default_value: value.default_value.as_ref().map(|v| v.node.clone()),
		}
	}
}

#[derive(Debug, Clone)]
pub struct FieldDefinition {
	pub name: String,
	pub description: Option<String>,
	pub arguments: IndexMap<String, InputValueDefinition>,
	pub ty: ast::Type,
	pub directives: Vec<DirectiveUse>,
}

impl FieldDefinition {
	pub fn directive(&self, name: &str) -> Option<&DirectiveUse> {
		self.directives.iter().find(|d| d.name == name)
	}
}

#[derive(Debug, Clone)]
pub struct EnumValueDefinition {
	pub name: String,
	pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub enum DefinitionKind {
	Scalar,
	Object {
		implements: Vec<String>,
		fields: IndexMap<String, FieldDefinition>,
	},
	Interface {
		implements: Vec<String>,
		fields: IndexMap<String, FieldDefinition>,
	},
	Union {
		members: Vec<String>,
	},
	Enum {
		values: IndexMap<String, EnumValueDefinition>,
	},
	InputObject {
		fields: IndexMap<String, InputValueDefinition>,
	},
}

impl DefinitionKind {
	pub fn label(&self) -> &'static str {
		match self {
			Self::Scalar => "scalar",
			Self::Object { .. } => "type",
			Self::Interface { .. } => "interface",
			Self::Union { .. } => "union",
			Self::Enum { .. } => "enum",
			Self::InputObject { .. } => "input",
		}
	}
}

/// One named type, merged from all of its definitions and extensions.
#[derive(Debug, Clone)]
pub struct TypeDefinition {
	pub name: String,
	pub description: Option<String>,
	pub kind: DefinitionKind,
	defined: bool,
}

impl TypeDefinition {
	/// Output fields of an object or interface type.
	pub fn fields(&self) -> Option<&IndexMap<String, FieldDefinition>> {
		match &self.kind {
			DefinitionKind::Object { fields, .. } | DefinitionKind::Interface { fields, .. } => {
				Some(fields)
			}
			_ => None,
		}
	}

	pub fn is_object(&self) -> bool {
		matches!(self.kind, DefinitionKind::Object { .. })
	}

	/// Interfaces and unions need a concrete type name at runtime.
	pub fn is_abstract(&self) -> bool {
		matches!(
			self.kind,
			DefinitionKind::Interface { .. } | DefinitionKind::Union { .. }
		)
	}

	fn merge(&mut self, other: DefinitionKind) -> SchemaResult<()> {
		match (&mut self.kind, other) {
			(DefinitionKind::Scalar, DefinitionKind::Scalar) => Ok(()),
			(
				DefinitionKind::Object { implements, fields },
				DefinitionKind::Object {
					implements: more,
					fields: added,
				},
			)
			| (
				DefinitionKind::Interface { implements, fields },
				DefinitionKind::Interface {
					implements: more,
					fields: added,
				},
			) => {
				append_unique(implements, more);
				append_members(&self.name, fields, added)
			}
			(DefinitionKind::Union { members }, DefinitionKind::Union { members: more }) => {
				append_unique(members, more);
				Ok(())
			}
			(DefinitionKind::Enum { values }, DefinitionKind::Enum { values: added }) => {
				append_members(&self.name, values, added)
			}
			(DefinitionKind::InputObject { fields }, DefinitionKind::InputObject { fields: added }) => {
				append_members(&self.name, fields, added)
			}
			(existing, other) => Err(SchemaError::ConflictingDefinition {
				name: self.name.clone(),
				existing: existing.label(),
				duplicate: other.label(),
			}),
		}
	}
}

#[derive(Debug, Clone)]
pub struct DirectiveDefinition {
	pub name: String,
	pub description: Option<String>,
	pub arguments: IndexMap<String, InputValueDefinition>,
	pub locations: Vec<ast::DirectiveLocation>,
}

/// All type and directive definitions of a schema, with resolved roots.
#[derive(Debug, Clone)]
pub struct SchemaDefinitions {
	types: IndexMap<String, TypeDefinition>,
	directives: IndexMap<String, DirectiveDefinition>,
	query_type: String,
	mutation_type: Option<String>,
	subscription_type: Option<String>,
}

impl SchemaDefinitions {
	/// Parse and merge `documents`.
	///
	/// # Examples
	///
	/// ```
	/// use graphql_boot_tools::SchemaDefinitions;
	///
	/// let definitions = SchemaDefinitions::parse(&[
	///     "type Query { user(id: ID!): User }",
	///     "type User { id: ID! }",
	///     "extend type User { name: String }",
	/// ]).unwrap();
	///
	/// let user = definitions.get("User").unwrap();
	/// let fields: Vec<_> = user.fields().unwrap().keys().collect();
	/// assert_eq!(fields, ["id", "name"]);
	/// assert_eq!(definitions.query_type(), "Query");
	/// assert_eq!(definitions.mutation_type(), None);
	/// ```
	pub fn parse<S: AsRef<str>>(documents: &[S]) -> SchemaResult<Self> {
		Self::merge(documents)?.finish()
	}

	/// Parse and merge `documents` without checking roots or type
	/// references.
	///
	/// Used to inspect a schema that is still incomplete, e.g. before
	/// type definition factories have contributed their types.
	pub fn parse_unvalidated<S: AsRef<str>>(documents: &[S]) -> SchemaResult<Self> {
		Ok(Self::merge(documents)?.finish_unvalidated())
	}

	fn merge<S: AsRef<str>>(documents: &[S]) -> SchemaResult<DefinitionsBuilder> {
		let mut builder = DefinitionsBuilder::default();
		for (index, document) in documents.iter().enumerate() {
			let document = parse_schema(document.as_ref()).map_err(|e| SchemaError::Parse {
				index,
				message: e.to_string(),
			})?;
			for definition in document.definitions {
				builder.add(definition)?;
			}
		}
		Ok(builder)
	}

	pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
		self.types.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.types.contains_key(name)
	}

	/// Types in order of first appearance.
	pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
		self.types.values()
	}

	pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
		self.directives.get(name)
	}

	pub fn directives(&self) -> impl Iterator<Item = &DirectiveDefinition> {
		self.directives.values()
	}

	pub fn query_type(&self) -> &str {
		&self.query_type
	}

	pub fn mutation_type(&self) -> Option<&str> {
		self.mutation_type.as_deref()
	}

	pub fn subscription_type(&self) -> Option<&str> {
		self.subscription_type.as_deref()
	}

	pub fn is_root(&self, name: &str) -> bool {
		name == self.query_type
			|| self.mutation_type.as_deref() == Some(name)
			|| self.subscription_type.as_deref() == Some(name)
	}

	/// Every object or interface field carrying `@directive`.
	pub fn fields_with_directive<'a>(
		&'a self,
		directive: &'a str,
	) -> impl Iterator<Item = (&'a TypeDefinition, &'a FieldDefinition, &'a DirectiveUse)> + 'a {
		self.types().flat_map(move |ty| {
			ty.fields().into_iter().flat_map(move |fields| {
				fields
					.values()
					.filter_map(move |field| field.directive(directive).map(|d| (ty, field, d)))
			})
		})
	}
}

#[derive(Default)]
struct DefinitionsBuilder {
	types: IndexMap<String, TypeDefinition>,
	directives: IndexMap<String, DirectiveDefinition>,
	query: Option<String>,
	mutation: Option<String>,
	subscription: Option<String>,
}

impl DefinitionsBuilder {
	fn add(&mut self, definition: ast::TypeSystemDefinition) -> SchemaResult<()> {
		match definition {
			ast::TypeSystemDefinition::Schema(schema) => self.add_schema(schema.node),
			ast::TypeSystemDefinition::Type(ty) => self.add_type(ty.node),
			ast::TypeSystemDefinition::Directive(directive) => self.add_directive(directive.node),
		}
	}

	fn add_schema(&mut self, schema: ast::SchemaDefinition) -> SchemaResult<()> {
		set_root(&mut self.query, "query", schema.query)?;
		set_root(&mut self.mutation, "mutation", schema.mutation)?;
		set_root(&mut self.subscription, "subscription", schema.subscription)
	}

	fn add_type(&mut self, definition: ast::TypeDefinition) -> SchemaResult<()> {
		let name = definition.name.node.to_string();
		let kind = convert_kind(&name, definition.kind)?;
		let description = description(&definition.description);

		match self.types.entry(name) {
			Entry::Vacant(entry) => {
				let name = entry.key().clone();
				entry.insert(TypeDefinition {
					name,
					description,
					kind,
					defined: !definition.extend,
				});
			}
			Entry::Occupied(mut entry) => {
				let existing = entry.get_mut();
				existing.merge(kind)?;
				existing.defined |= !definition.extend;
				if existing.description.is_none() {
					existing.description = description;
				}
			}
		}
		Ok(())
	}

	fn add_directive(&mut self, definition: ast::DirectiveDefinition) -> SchemaResult<()> {
		let name = definition.name.node.to_string();
		if self.directives.contains_key(&name) {
			return Err(SchemaError::DuplicateMember {
				type_name: "schema".to_string(),
				member: format!("@{name}"),
			});
		}
		let directive = DirectiveDefinition {
			name: name.clone(),
			description: description(&definition.description),
			arguments: definition
				.arguments
				.iter()
				.map(|arg| {
					let arg = InputValueDefinition::from_ast(arg);
					(arg.name.clone(), arg)
				})
				.collect(),
			locations: definition.locations.iter().map(|l| l.node.clone()).collect(),
		};
		self.directives.insert(name, directive);
		Ok(())
	}

	fn finish(self) -> SchemaResult<SchemaDefinitions> {
		if let Some(ty) = self.types.values().find(|ty| !ty.defined) {
			return Err(SchemaError::UndefinedExtension(ty.name.clone()));
		}

		let query_type = match &self.query {
			Some(query) => query.clone(),
			None if self.types.contains_key("Query") => "Query".to_string(),
			None => return Err(SchemaError::MissingQueryType),
		};
		self.check_root("query", &query_type)?;

		let mutation_type = match &self.mutation {
			Some(mutation) => Some(mutation.clone()),
			None => self
				.types
				.get("Mutation")
				.filter(|ty| ty.is_object())
				.map(|ty| ty.name.clone()),
		};
		if let Some(mutation) = &mutation_type {
			self.check_root("mutation", mutation)?;
		}

		let subscription_type = match &self.subscription {
			Some(subscription) => Some(subscription.clone()),
			None => self
				.types
				.get("Subscription")
				.filter(|ty| ty.is_object())
				.map(|ty| ty.name.clone()),
		};
		if let Some(subscription) = &subscription_type {
			self.check_root("subscription", subscription)?;
		}

		self.check_references()?;

		Ok(SchemaDefinitions {
			types: self.types,
			directives: self.directives,
			query_type,
			mutation_type,
			subscription_type,
		})
	}

	fn finish_unvalidated(self) -> SchemaDefinitions {
		let mutation_type = self
			.mutation
			.or_else(|| self.types.contains_key("Mutation").then(|| "Mutation".to_string()));
		let subscription_type = self.subscription.or_else(|| {
			self.types
				.contains_key("Subscription")
				.then(|| "Subscription".to_string())
		});
		SchemaDefinitions {
			query_type: self.query.unwrap_or_else(|| "Query".to_string()),
			mutation_type,
			subscription_type,
			types: self.types,
			directives: self.directives,
		}
	}

	fn check_root(&self, operation: &'static str, name: &str) -> SchemaResult<()> {
		match self.types.get(name) {
			Some(ty) if ty.is_object() => Ok(()),
			Some(_) => Err(SchemaError::InvalidRoot {
				operation,
				name: name.to_string(),
			}),
			None => Err(SchemaError::UnknownType {
				referenced_by: "schema".to_string(),
				name: name.to_string(),
			}),
		}
	}

	fn check_references(&self) -> SchemaResult<()> {
		for ty in self.types.values() {
			match &ty.kind {
				DefinitionKind::Scalar | DefinitionKind::Enum { .. } => {}
				DefinitionKind::Object { implements, fields }
				| DefinitionKind::Interface { implements, fields } => {
					for interface in implements {
						self.expect_kind(&ty.name, interface, |k| {
							matches!(k, DefinitionKind::Interface { .. })
						})?;
					}
					for field in fields.values() {
						let coordinate = format!("{}.{}", ty.name, field.name);
						self.expect_type(&coordinate, named_type(&field.ty))?;
						for argument in field.arguments.values() {
							let coordinate = format!("{coordinate}({}:)", argument.name);
							self.expect_type(&coordinate, named_type(&argument.ty))?;
						}
					}
				}
				DefinitionKind::Union { members } => {
					for member in members {
						self.expect_kind(&ty.name, member, |k| {
							matches!(k, DefinitionKind::Object { .. })
						})?;
					}
				}
				DefinitionKind::InputObject { fields } => {
					for field in fields.values() {
						let coordinate = format!("{}.{}", ty.name, field.name);
						self.expect_type(&coordinate, named_type(&field.ty))?;
					}
				}
			}
		}
		for directive in self.directives.values() {
			for argument in directive.arguments.values() {
				let coordinate = format!("@{}({}:)", directive.name, argument.name);
				self.expect_type(&coordinate, named_type(&argument.ty))?;
			}
		}
		Ok(())
	}

	fn expect_type(&self, referenced_by: &str, name: &str) -> SchemaResult<()> {
		if is_builtin_scalar(name) || self.types.contains_key(name) {
			return Ok(());
		}
		Err(SchemaError::UnknownType {
			referenced_by: referenced_by.to_string(),
			name: name.to_string(),
		})
	}

	fn expect_kind(
		&self,
		referenced_by: &str,
		name: &str,
		accepts: impl Fn(&DefinitionKind) -> bool,
	) -> SchemaResult<()> {
		match self.types.get(name) {
			Some(ty) if accepts(&ty.kind) => Ok(()),
			_ => Err(SchemaError::UnknownType {
				referenced_by: referenced_by.to_string(),
				name: name.to_string(),
			}),
		}
	}
}

fn set_root(
	slot: &mut Option<String>,
	operation: &'static str,
	name: Option<Positioned<async_graphql::Name>>,
) -> SchemaResult<()> {
	let Some(name) = name else {
		return Ok(());
	};
	let name = name.node.to_string();
	match slot {
		Some(existing) if *existing != name => Err(SchemaError::ConflictingRoot {
			operation,
			existing: existing.clone(),
			duplicate: name,
		}),
		_ => {
			*slot = Some(name);
			Ok(())
		}
	}
}

fn convert_kind(type_name: &str, kind: ast::TypeKind) -> SchemaResult<DefinitionKind> {
	Ok(match kind {
		ast::TypeKind::Scalar => DefinitionKind::Scalar,
		ast::TypeKind::Object(object) => DefinitionKind::Object {
			implements: names(&object.implements),
			fields: convert_fields(type_name, &object.fields)?,
		},
		ast::TypeKind::Interface(interface) => DefinitionKind::Interface {
			implements: names(&interface.implements),
			fields: convert_fields(type_name, &interface.fields)?,
		},
		ast::TypeKind::Union(union) => DefinitionKind::Union {
			members: names(&union.members),
		},
		ast::TypeKind::Enum(enumeration) => {
			let mut values = IndexMap::new();
			for value in &enumeration.values {
				let value = EnumValueDefinition {
					name: value.node.value.node.to_string(),
					description: description(&value.node.description),
				};
				insert_member(type_name, &mut values, value.name.clone(), value)?;
			}
			DefinitionKind::Enum { values }
		}
		ast::TypeKind::InputObject(input) => {
			let mut fields = IndexMap::new();
			for field in &input.fields {
				let field = InputValueDefinition::from_ast(field);
				insert_member(type_name, &mut fields, field.name.clone(), field)?;
			}
			DefinitionKind::InputObject { fields }
		}
	})
}

fn convert_fields(
	type_name: &str,
	fields: &[Positioned<ast::FieldDefinition>],
) -> SchemaResult<IndexMap<String, FieldDefinition>> {
	let mut converted = IndexMap::new();
	for field in fields {
		let field = &field.node;
		let definition = FieldDefinition {
			name: field.name.node.to_string(),
			description: description(&field.description),
			arguments: field
				.arguments
				.iter()
				.map(|arg| {
					let arg = InputValueDefinition::from_ast(arg);
					(arg.name.clone(), arg)
				})
				.collect(),
			ty: field.ty.node.clone(),
			directives: field.directives.iter().map(DirectiveUse::from_ast).collect(),
		};
		insert_member(type_name, &mut converted, definition.name.clone(), definition)?;
	}
	Ok(converted)
}

fn insert_member<T>(
	type_name: &str,
	members: &mut IndexMap<String, T>,
	name: String,
	member: T,
) -> SchemaResult<()> {
	match members.entry(name) {
		Entry::Vacant(entry) => {
			entry.insert(member);
			Ok(())
		}
		Entry::Occupied(entry) => Err(SchemaError::DuplicateMember {
			type_name: type_name.to_string(),
			member: entry.key().clone(),
		}),
	}
}

fn append_members<T>(
	type_name: &str,
	members: &mut IndexMap<String, T>,
	added: IndexMap<String, T>,
) -> SchemaResult<()> {
	for (name, member) in added {
		insert_member(type_name, members, name, member)?;
	}
	Ok(())
}

fn append_unique(target: &mut Vec<String>, added: Vec<String>) {
	for name in added {
		if !target.contains(&name) {
			target.push(name);
		}
	}
}

fn names(names: &[Positioned<async_graphql::Name>]) -> Vec<String> {
	names.iter().map(|name| name.node.to_string()).collect()
}

fn description(description: &Option<Positioned<String>>) -> Option<String> {
	description.as_ref().map(|d| d.node.clone())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_extension_appends_fields_in_order() {
		let definitions = SchemaDefinitions::parse(&[
			"type Query { a: Int }",
			"extend type Query { b: String }",
			"type Query { c: Boolean }",
		])
		.unwrap();

		let fields: Vec<_> = definitions
			.get("Query")
			.unwrap()
			.fields()
			.unwrap()
			.keys()
			.cloned()
			.collect();
		assert_eq!(fields, ["a", "b", "c"]);
	}

	#[rstest]
	fn test_extension_may_precede_definition() {
		let definitions = SchemaDefinitions::parse(&[
			"extend type Query { b: Int }",
			"type Query { a: Int }",
		])
		.unwrap();
		assert_eq!(definitions.get("Query").unwrap().fields().unwrap().len(), 2);
	}

	#[rstest]
	fn test_extension_of_undefined_type() {
		let result = SchemaDefinitions::parse(&["type Query { a: Int }", "extend type User { b: Int }"]);
		assert!(matches!(result, Err(SchemaError::UndefinedExtension(name)) if name == "User"));
	}

	#[rstest]
	fn test_duplicate_field_is_rejected() {
		let result = SchemaDefinitions::parse(&[
			"type Query { a: Int }",
			"extend type Query { a: String }",
		]);
		assert!(matches!(
			result,
			Err(SchemaError::DuplicateMember { type_name, member }) if type_name == "Query" && member == "a"
		));
	}

	#[rstest]
	fn test_conflicting_kinds() {
		let result = SchemaDefinitions::parse(&["type Query { a: Int }", "enum Query { A }"]);
		assert!(matches!(
			result,
			Err(SchemaError::ConflictingDefinition { existing: "type", duplicate: "enum", .. })
		));
	}

	#[rstest]
	fn test_parse_error_reports_document_index() {
		let result = SchemaDefinitions::parse(&["type Query { a: Int }", "type {"]);
		assert!(matches!(result, Err(SchemaError::Parse { index: 1, .. })));
	}

	#[rstest]
	fn test_unvalidated_parse_accepts_dangling_references() {
		let documents = ["type Query { users: UserConnection }"];
		assert!(SchemaDefinitions::parse(&documents).is_err());

		let definitions = SchemaDefinitions::parse_unvalidated(&documents).unwrap();
		assert_eq!(definitions.query_type(), "Query");
		assert!(!definitions.contains("UserConnection"));
	}

	#[rstest]
	fn test_subscription_root() {
		let definitions = SchemaDefinitions::parse(&[
			"type Query { a: Int }",
			"type Subscription { tick: Int }",
		])
		.unwrap();
		assert_eq!(definitions.subscription_type(), Some("Subscription"));
		assert!(definitions.is_root("Subscription"));
	}

	#[rstest]
	fn test_schema_definition_selects_roots() {
		let definitions = SchemaDefinitions::parse(&[
			"schema { query: RootQuery mutation: RootMutation }",
			"type RootQuery { a: Int } type RootMutation { b: Int }",
		])
		.unwrap();
		assert_eq!(definitions.query_type(), "RootQuery");
		assert_eq!(definitions.mutation_type(), Some("RootMutation"));
		assert!(definitions.is_root("RootMutation"));
	}

	#[rstest]
	#[case::no_query(&["type User { id: ID }"])]
	#[case::query_not_object(&["schema { query: Q }", "input Q { a: Int }"])]
	#[case::subscription_not_object(&["schema { query: Query subscription: Tick }", "type Query { a: Int } enum Tick { A }"])]
	#[case::unknown_field_type(&["type Query { user: User }"])]
	#[case::union_of_scalar(&["type Query { a: Int } union Thing = String"])]
	fn test_invalid_schemas(#[case] documents: &[&str]) {
		assert!(SchemaDefinitions::parse(documents).is_err());
	}

	#[rstest]
	fn test_fields_with_directive() {
		let definitions = SchemaDefinitions::parse(&[r#"
			directive @connection(for: String!) on FIELD_DEFINITION
			type Query {
				users: UserConnection @connection(for: "User")
				me: User
			}
			type User { id: ID! }
			type UserConnection { count: Int }
		"#])
		.unwrap();

		let found: Vec<_> = definitions
			.fields_with_directive("connection")
			.map(|(ty, field, directive)| {
				(
					ty.name.as_str(),
					field.name.as_str(),
					directive.argument("for").cloned(),
				)
			})
			.collect();
		assert_eq!(found, vec![("Query", "users", Some(Value::from("User")))]);
		assert!(definitions.directive("connection").is_some());
	}

	#[rstest]
	fn test_named_type_unwraps_lists() {
		let definitions = SchemaDefinitions::parse(&["type Query { ids: [[ID!]!] }"]).unwrap();
		let field = &definitions.get("Query").unwrap().fields().unwrap()["ids"];
		assert_eq!(named_type(&field.ty), "ID");
	}
}

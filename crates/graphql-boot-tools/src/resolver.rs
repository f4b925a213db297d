//! Field resolvers
//!
//! A [`GraphQLResolver`] supplies resolver functions for the fields of one
//! schema type. Resolvers use the `async-graphql` dynamic API directly: a
//! resolver receives a [`ResolverContext`] and returns a [`FieldFuture`].

use async_graphql::Value;
use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Type-erased field resolver.
pub type FieldResolverFn =
	Arc<dyn for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync>;

/// Wrap a resolver function.
pub fn resolver_fn<F>(resolver: F) -> FieldResolverFn
where
	F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
{
	Arc::new(resolver)
}

/// Await the result of a resolver.
pub async fn resolve_field<'a>(
	future: FieldFuture<'a>,
) -> async_graphql::Result<Option<FieldValue<'a>>> {
	match future {
		FieldFuture::Value(value) => Ok(value),
		FieldFuture::Future(future) => future.await,
	}
}

/// Serialize `value` into a field value.
pub fn to_field_value<'a, T: Serialize>(value: &T) -> async_graphql::Result<FieldValue<'a>> {
	let json = serde_json::to_value(value)?;
	Ok(FieldValue::value(Value::from_json(json)?))
}

/// The schema type a resolver contributes fields to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolverTarget {
	/// The schema's query root, whatever it is named
	Query,
	/// The schema's mutation root
	Mutation,
	Type(String),
}

impl fmt::Display for ResolverTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Query => f.write_str("Query"),
			Self::Mutation => f.write_str("Mutation"),
			Self::Type(name) => f.write_str(name),
		}
	}
}

/// A resolver for one field.
#[derive(Clone)]
pub struct FieldResolver {
	name: String,
	resolver: FieldResolverFn,
}

impl FieldResolver {
	pub fn new<F>(name: impl Into<String>, resolver: F) -> Self
	where
		F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			resolver: resolver_fn(resolver),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn resolver(&self) -> &FieldResolverFn {
		&self.resolver
	}
}

impl fmt::Debug for FieldResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldResolver")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

/// Supplies field resolvers for one schema type.
///
/// Several resolvers may target the same type as long as they resolve
/// different fields.
pub trait GraphQLResolver: Send + Sync {
	fn target(&self) -> ResolverTarget;

	fn fields(&self) -> Vec<FieldResolver>;
}

/// A [`GraphQLResolver`] assembled from closures.
///
/// # Examples
///
/// ```
/// use async_graphql::Value;
/// use async_graphql::dynamic::FieldFuture;
/// use graphql_boot_tools::{GraphQLResolver, ObjectResolver, ResolverTarget};
///
/// let resolver = ObjectResolver::query()
///     .field("version", |_| FieldFuture::from_value(Some(Value::from("1.0"))))
///     .field("echo", |ctx| {
///         FieldFuture::new(async move {
///             let text = ctx.args.try_get("text")?.string()?.to_string();
///             Ok(Some(Value::from(text)))
///         })
///     });
///
/// assert_eq!(resolver.target(), ResolverTarget::Query);
/// assert_eq!(resolver.fields().len(), 2);
/// ```
#[derive(Clone)]
pub struct ObjectResolver {
	target: ResolverTarget,
	fields: Vec<FieldResolver>,
}

impl ObjectResolver {
	pub fn new(target: ResolverTarget) -> Self {
		Self {
			target,
			fields: Vec::new(),
		}
	}

	pub fn query() -> Self {
		Self::new(ResolverTarget::Query)
	}

	pub fn mutation() -> Self {
		Self::new(ResolverTarget::Mutation)
	}

	pub fn for_type(name: impl Into<String>) -> Self {
		Self::new(ResolverTarget::Type(name.into()))
	}

	pub fn field<F>(mut self, name: impl Into<String>, resolver: F) -> Self
	where
		F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
	{
		self.fields.push(FieldResolver::new(name, resolver));
		self
	}
}

impl GraphQLResolver for ObjectResolver {
	fn target(&self) -> ResolverTarget {
		self.target.clone()
	}

	fn fields(&self) -> Vec<FieldResolver> {
		self.fields.clone()
	}
}

impl fmt::Debug for ObjectResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObjectResolver")
			.field("target", &self.target)
			.field("fields", &self.fields)
			.finish()
	}
}

/// Resolver reading the same-named property of the parent value.
///
/// For interface and union fields the property must carry `__typename`
/// so that the concrete type can be selected.
pub(crate) fn property_resolver(field: String, abstract_type: bool) -> FieldResolverFn {
	resolver_fn(move |ctx| {
		let value = ctx
			.parent_value
			.as_value()
			.and_then(|parent| property(parent, &field))
			.cloned();
		FieldFuture::Value(value.map(|value| into_field_value(value, abstract_type)))
	})
}

/// Resolver for a root field accepted without an implementation.
pub(crate) fn unimplemented_resolver(type_name: &str, field: &str) -> FieldResolverFn {
	let message = format!("No resolver implemented for {type_name}.{field}");
	resolver_fn(move |_| {
		let message = message.clone();
		FieldFuture::new(async move { Err::<Option<Value>, _>(async_graphql::Error::new(message)) })
	})
}

fn property<'v>(parent: &'v Value, name: &str) -> Option<&'v Value> {
	match parent {
		Value::Object(map) => map
			.iter()
			.find(|(key, _)| key.as_str() == name)
			.map(|(_, value)| value),
		_ => None,
	}
}

fn into_field_value<'a>(value: Value, abstract_type: bool) -> FieldValue<'a> {
	if !abstract_type {
		return FieldValue::value(value);
	}
	match value {
		Value::List(items) => FieldValue::list(
			items
				.into_iter()
				.map(|item| into_field_value(item, abstract_type)),
		),
		value => {
			let type_name = match property(&value, "__typename") {
				Some(Value::String(name)) => Some(name.clone()),
				_ => None,
			};
			match type_name {
				Some(name) => FieldValue::value(value).with_type(name),
				None => FieldValue::value(value),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_graphql::dynamic::{Field, Object, Schema, TypeRef};
	use rstest::rstest;
	use serde_json::json;

	fn schema(user: FieldResolverFn, name: FieldResolverFn) -> Schema {
		let query = Object::new("Query").field(Field::new(
			"user",
			TypeRef::named("User"),
			move |ctx| user(ctx),
		));
		let user_type = Object::new("User").field(Field::new(
			"name",
			TypeRef::named(TypeRef::STRING),
			move |ctx| name(ctx),
		));
		Schema::build("Query", None, None)
			.register(query)
			.register(user_type)
			.finish()
			.unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_property_resolver_reads_parent_value() {
		// Arrange
		let user = resolver_fn(|_| {
			FieldFuture::new(async move {
				Ok(Some(to_field_value(&json!({ "name": "Ann", "age": 31 }))?))
			})
		});
		let schema = schema(user, property_resolver("name".to_string(), false));

		// Act
		let response = schema.execute("{ user { name } }").await;

		// Assert
		assert!(response.errors.is_empty(), "{:?}", response.errors);
		assert_eq!(
			response.data.into_json().unwrap(),
			json!({ "user": { "name": "Ann" } })
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_missing_property_resolves_to_null() {
		let user = resolver_fn(|_| FieldFuture::from_value(Some(Value::from_json(json!({})).unwrap())));
		let schema = schema(user, property_resolver("name".to_string(), false));

		let response = schema.execute("{ user { name } }").await;

		assert_eq!(
			response.data.into_json().unwrap(),
			json!({ "user": { "name": null } })
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_unimplemented_resolver_fails_when_queried() {
		let schema = schema(
			unimplemented_resolver("Query", "user"),
			property_resolver("name".to_string(), false),
		);

		let response = schema.execute("{ user { name } }").await;

		assert_eq!(response.errors.len(), 1);
		assert_eq!(
			response.errors[0].message,
			"No resolver implemented for Query.user"
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_resolve_field_awaits_futures() {
		let value = resolve_field(FieldFuture::new(async { Ok(Some(Value::from(3))) }))
			.await
			.unwrap()
			.unwrap();
		assert_eq!(value.as_value(), Some(&Value::from(3)));
	}

	#[rstest]
	fn test_object_resolver_collects_fields() {
		let resolver = ObjectResolver::for_type("User")
			.field("a", |_| FieldFuture::from_value(None))
			.field("b", |_| FieldFuture::from_value(None));

		let names: Vec<_> = resolver.fields().iter().map(|f| f.name().to_string()).collect();
		assert_eq!(resolver.target(), ResolverTarget::Type("User".to_string()));
		assert_eq!(names, ["a", "b"]);
	}

	#[rstest]
	fn test_property_lookup() {
		let parent = Value::from_json(json!({ "a": 1, "b": { "c": 2 } })).unwrap();
		assert_eq!(property(&parent, "a"), Some(&Value::from(1)));
		assert_eq!(property(&parent, "c"), None);
		assert_eq!(property(&Value::from(1), "a"), None);
	}
}

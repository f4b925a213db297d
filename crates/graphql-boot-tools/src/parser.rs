//! Schema parser
//!
//! [`SchemaParserBuilder`] collects schema documents, scalars, directives
//! and resolvers, checks that they fit together, and produces a
//! [`SchemaParser`]. The parser turns the merged definitions into an
//! `async-graphql` dynamic schema.

use crate::definitions::{
	DefinitionKind, FieldDefinition, InputValueDefinition, SchemaDefinitions, TypeDefinition,
	is_builtin_scalar, named_type,
};
use crate::directive::{SchemaDirective, SchemaDirectiveWiring, wire_field};
use crate::error::{SchemaError, SchemaResult};
use crate::executable::ExecutableSchema;
use crate::options::SchemaParserOptions;
use crate::resolver::{
	FieldResolverFn, GraphQLResolver, ResolverTarget, property_resolver, unimplemented_resolver,
};
use crate::scalar::GraphQLScalar;
use crate::subscription::{
	SubscriptionResolver, SubscriptionResolverFn, unimplemented_subscription,
};
use async_graphql::dynamic::{
	Enum, EnumItem, Field, InputObject, InputValue, Interface, InterfaceField, Object, Schema,
	SchemaBuilder, Subscription, SubscriptionField, TypeRef, Union,
};
use async_graphql::parser::types::{BaseType, Type};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Collects everything a schema is made of.
///
/// # Examples
///
/// ```
/// use async_graphql::Value;
/// use async_graphql::dynamic::FieldFuture;
/// use graphql_boot_tools::{ObjectResolver, SchemaParserBuilder};
///
/// # tokio_test::block_on(async {
/// let schema = SchemaParserBuilder::new()
///     .schema_string("type Query { greeting: String }")
///     .resolver(ObjectResolver::query().field("greeting", |_| {
///         FieldFuture::from_value(Some(Value::from("hello")))
///     }))
///     .build()
///     .unwrap()
///     .make_executable_schema()
///     .unwrap();
///
/// let response = schema.execute("{ greeting }").await;
/// assert_eq!(response.data.into_json().unwrap()["greeting"], "hello");
/// # });
/// ```
#[derive(Default)]
pub struct SchemaParserBuilder {
	schema_strings: Vec<String>,
	scalars: Vec<GraphQLScalar>,
	options: SchemaParserOptions,
	directives: Vec<SchemaDirective>,
	wirings: Vec<Arc<dyn SchemaDirectiveWiring>>,
	resolvers: Vec<Arc<dyn GraphQLResolver>>,
	subscriptions: Vec<SubscriptionResolver>,
}

impl SchemaParserBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn schema_string(mut self, document: impl Into<String>) -> Self {
		self.schema_strings.push(document.into());
		self
	}

	pub fn schema_strings<I, S>(mut self, documents: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.schema_strings.extend(documents.into_iter().map(Into::into));
		self
	}

	pub fn scalar(mut self, scalar: GraphQLScalar) -> Self {
		self.scalars.push(scalar);
		self
	}

	pub fn scalars(mut self, scalars: impl IntoIterator<Item = GraphQLScalar>) -> Self {
		self.scalars.extend(scalars);
		self
	}

	pub fn options(mut self, options: SchemaParserOptions) -> Self {
		self.options = options;
		self
	}

	/// Wire `@name` occurrences with `wiring`.
	pub fn directive(
		mut self,
		name: impl Into<String>,
		wiring: impl SchemaDirectiveWiring + 'static,
	) -> Self {
		self.directives.push(SchemaDirective::new(name, wiring));
		self
	}

	pub fn schema_directive(mut self, directive: SchemaDirective) -> Self {
		self.directives.push(directive);
		self
	}

	pub fn schema_directives(mut self, directives: impl IntoIterator<Item = SchemaDirective>) -> Self {
		self.directives.extend(directives);
		self
	}

	/// Register a wiring applied to every directive occurrence.
	pub fn directive_wiring(mut self, wiring: impl SchemaDirectiveWiring + 'static) -> Self {
		self.wirings.push(Arc::new(wiring));
		self
	}

	pub fn directive_wirings<I>(mut self, wirings: I) -> Self
	where
		I: IntoIterator<Item = Arc<dyn SchemaDirectiveWiring>>,
	{
		self.wirings.extend(wirings);
		self
	}

	pub fn resolver(mut self, resolver: impl GraphQLResolver + 'static) -> Self {
		self.resolvers.push(Arc::new(resolver));
		self
	}

	pub fn resolvers<I>(mut self, resolvers: I) -> Self
	where
		I: IntoIterator<Item = Arc<dyn GraphQLResolver>>,
	{
		self.resolvers.extend(resolvers);
		self
	}

	pub fn subscription_resolver(mut self, resolver: SubscriptionResolver) -> Self {
		self.subscriptions.push(resolver);
		self
	}

	pub fn subscription_resolvers(
		mut self,
		resolvers: impl IntoIterator<Item = SubscriptionResolver>,
	) -> Self {
		self.subscriptions.extend(resolvers);
		self
	}

	pub fn build(self) -> SchemaResult<SchemaParser> {
		let definitions = self.definitions()?;
		check_input_defaults(&definitions)?;
		let scalars = bind_scalars(&definitions, self.scalars)?;
		let resolvers = bind_resolvers(&definitions, &self.resolvers)?;
		check_root_resolvers(&definitions, &resolvers, &self.options)?;
		let subscriptions = bind_subscriptions(&definitions, &self.subscriptions, &self.options)?;

		tracing::debug!(
			types = definitions.types().count(),
			resolvers = self.resolvers.len(),
			"schema parser built"
		);
		Ok(SchemaParser {
			definitions,
			resolvers,
			subscriptions,
			scalars,
			directives: self.directives,
			wirings: self.wirings,
			options: self.options,
		})
	}

	fn definitions(&self) -> SchemaResult<SchemaDefinitions> {
		let mut documents = self.schema_strings.clone();
		for factory in self.options.type_definition_factories() {
			let partial = SchemaDefinitions::parse_unvalidated(&documents)?;
			let generated = factory.create(&partial);
			tracing::debug!(
				factory = factory.name(),
				documents = generated.len(),
				"applied type definition factory"
			);
			documents.extend(generated);
		}
		SchemaDefinitions::parse(&documents)
	}
}

impl fmt::Debug for SchemaParserBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SchemaParserBuilder")
			.field("schema_strings", &self.schema_strings.len())
			.field("scalars", &self.scalars)
			.field("options", &self.options)
			.field("directives", &self.directives)
			.field("wirings", &self.wirings.len())
			.field("resolvers", &self.resolvers.len())
			.field("subscriptions", &self.subscriptions)
			.finish()
	}
}

type ResolverTable = HashMap<String, IndexMap<String, FieldResolverFn>>;

fn bind_scalars(
	definitions: &SchemaDefinitions,
	scalars: Vec<GraphQLScalar>,
) -> SchemaResult<HashMap<String, GraphQLScalar>> {
	let mut registered: HashMap<String, GraphQLScalar> = HashMap::new();
	for scalar in scalars {
		let declared = definitions
			.get(scalar.name())
			.is_some_and(|ty| matches!(ty.kind, DefinitionKind::Scalar));
		if !declared {
			tracing::warn!(scalar = scalar.name(), "scalar is not declared in the schema, ignoring");
			continue;
		}
		registered.insert(scalar.name().to_string(), scalar);
	}

	for ty in definitions.types() {
		if matches!(ty.kind, DefinitionKind::Scalar)
			&& !is_builtin_scalar(&ty.name)
			&& !registered.contains_key(&ty.name)
		{
			return Err(SchemaError::MissingScalar(ty.name.clone()));
		}
	}
	Ok(registered)
}

fn bind_resolvers(
	definitions: &SchemaDefinitions,
	resolvers: &[Arc<dyn GraphQLResolver>],
) -> SchemaResult<ResolverTable> {
	let mut table = ResolverTable::new();
	for resolver in resolvers {
		let target = resolver.target();
		let type_name = match &target {
			ResolverTarget::Query => definitions.query_type(),
			ResolverTarget::Mutation => definitions
				.mutation_type()
				.ok_or_else(|| SchemaError::UnknownResolverType(target.to_string()))?,
			ResolverTarget::Type(name) => name.as_str(),
		};
		if definitions.subscription_type() == Some(type_name) {
			return Err(SchemaError::NotASubscriptionResolver(type_name.to_string()));
		}
		let fields = definitions
			.get(type_name)
			.filter(|ty| ty.is_object())
			.and_then(TypeDefinition::fields)
			.ok_or_else(|| SchemaError::UnknownResolverType(type_name.to_string()))?;

		let bound = table.entry(type_name.to_string()).or_default();
		for field in resolver.fields() {
			if !fields.contains_key(field.name()) {
				return Err(SchemaError::UnknownResolverField {
					type_name: type_name.to_string(),
					field: field.name().to_string(),
				});
			}
			if bound.contains_key(field.name()) {
				return Err(SchemaError::DuplicateResolver {
					type_name: type_name.to_string(),
					field: field.name().to_string(),
				});
			}
			bound.insert(field.name().to_string(), Arc::clone(field.resolver()));
		}
	}
	Ok(table)
}

fn check_root_resolvers(
	definitions: &SchemaDefinitions,
	resolvers: &ResolverTable,
	options: &SchemaParserOptions,
) -> SchemaResult<()> {
	let roots = std::iter::once(definitions.query_type()).chain(definitions.mutation_type());
	for root in roots {
		let Some(fields) = definitions.get(root).and_then(TypeDefinition::fields) else {
			continue;
		};
		let bound = resolvers.get(root);
		for field in fields.keys() {
			if bound.is_some_and(|bound| bound.contains_key(field)) {
				continue;
			}
			if !options.allow_unimplemented_resolvers() {
				return Err(SchemaError::MissingResolver {
					type_name: root.to_string(),
					field: field.clone(),
				});
			}
			tracing::debug!(field = %format!("{root}.{field}"), "root field has no resolver");
		}
	}
	Ok(())
}

fn bind_subscriptions(
	definitions: &SchemaDefinitions,
	resolvers: &[SubscriptionResolver],
	options: &SchemaParserOptions,
) -> SchemaResult<IndexMap<String, SubscriptionResolverFn>> {
	let Some(root) = definitions.subscription_type() else {
		if resolvers.iter().any(|resolver| !resolver.fields().is_empty()) {
			return Err(SchemaError::UnknownResolverType("Subscription".to_string()));
		}
		return Ok(IndexMap::new());
	};
	let fields = definitions
		.get(root)
		.and_then(TypeDefinition::fields)
		.ok_or_else(|| SchemaError::UnknownResolverType(root.to_string()))?;

	let mut bound = IndexMap::new();
	for field in resolvers.iter().flat_map(SubscriptionResolver::fields) {
		if !fields.contains_key(field.name()) {
			return Err(SchemaError::UnknownResolverField {
				type_name: root.to_string(),
				field: field.name().to_string(),
			});
		}
		if bound.contains_key(field.name()) {
			return Err(SchemaError::DuplicateResolver {
				type_name: root.to_string(),
				field: field.name().to_string(),
			});
		}
		bound.insert(field.name().to_string(), Arc::clone(field.resolver()));
	}

	for field in fields.keys() {
		if bound.contains_key(field) {
			continue;
		}
		if !options.allow_unimplemented_resolvers() {
			return Err(SchemaError::MissingResolver {
				type_name: root.to_string(),
				field: field.clone(),
			});
		}
		tracing::debug!(field = %format!("{root}.{field}"), "subscription field has no resolver");
		bound.insert(field.clone(), unimplemented_subscription(root, field));
	}
	Ok(bound)
}

/// Defaults on input object fields are not applied by the execution layer,
/// so they are refused instead of being silently dropped.
fn check_input_defaults(definitions: &SchemaDefinitions) -> SchemaResult<()> {
	for ty in definitions.types() {
		let DefinitionKind::InputObject { fields } = &ty.kind else {
			continue;
		};
		if let Some(field) = fields.values().find(|field| field.default_value.is_some()) {
			return Err(SchemaError::InputFieldDefault {
				type_name: ty.name.clone(),
				field: field.name.clone(),
			});
		}
	}
	Ok(())
}

/// Validated schema definitions together with their resolvers.
#[derive(Clone)]
pub struct SchemaParser {
	definitions: SchemaDefinitions,
	resolvers: ResolverTable,
	subscriptions: IndexMap<String, SubscriptionResolverFn>,
	scalars: HashMap<String, GraphQLScalar>,
	directives: Vec<SchemaDirective>,
	wirings: Vec<Arc<dyn SchemaDirectiveWiring>>,
	options: SchemaParserOptions,
}

impl SchemaParser {
	pub fn builder() -> SchemaParserBuilder {
		SchemaParserBuilder::new()
	}

	pub fn definitions(&self) -> &SchemaDefinitions {
		&self.definitions
	}

	pub fn options(&self) -> &SchemaParserOptions {
		&self.options
	}

	/// Build the executable schema.
	pub fn make_executable_schema(&self) -> SchemaResult<ExecutableSchema> {
		let definitions = &self.definitions;
		let mut builder = Schema::build(
			definitions.query_type(),
			definitions.mutation_type(),
			definitions.subscription_type(),
		);

		for ty in definitions.types() {
			builder = self.register(builder, ty)?;
		}

		if !self.options.introspection_enabled() {
			builder = builder.disable_introspection();
		}
		let limits = self.options.limits();
		if let Some(max_depth) = limits.max_depth {
			builder = builder.limit_depth(max_depth);
		}
		if let Some(max_complexity) = limits.max_complexity {
			builder = builder.limit_complexity(max_complexity);
		}

		let schema = builder
			.finish()
			.map_err(|e| SchemaError::Build(e.to_string()))?;
		tracing::info!(
			query = definitions.query_type(),
			mutation = ?definitions.mutation_type(),
			subscription = ?definitions.subscription_type(),
			introspection = self.options.introspection_enabled(),
			"executable schema created"
		);
		Ok(ExecutableSchema::new(schema, limits))
	}

	fn register(&self, builder: SchemaBuilder, ty: &TypeDefinition) -> SchemaResult<SchemaBuilder> {
		let description = ty.description.as_deref();
		Ok(match &ty.kind {
			DefinitionKind::Scalar if is_builtin_scalar(&ty.name) => builder,
			DefinitionKind::Scalar => {
				let scalar = self
					.scalars
					.get(&ty.name)
					.ok_or_else(|| SchemaError::MissingScalar(ty.name.clone()))?;
				builder.register(scalar.to_dynamic(description))
			}
			DefinitionKind::Object { fields, .. }
				if self.definitions.subscription_type() == Some(ty.name.as_str()) =>
			{
				let mut subscription = Subscription::new(ty.name.as_str());
				if let Some(description) = description {
					subscription = subscription.description(description);
				}
				for field in fields.values() {
					subscription = subscription.field(self.subscription_field(&ty.name, field)?);
				}
				builder.register(subscription)
			}
			DefinitionKind::Object { implements, fields } => {
				let mut object = Object::new(ty.name.as_str());
				if let Some(description) = description {
					object = object.description(description);
				}
				for interface in implements {
					object = object.implement(interface.as_str());
				}
				for field in fields.values() {
					object = object.field(self.field(&ty.name, field));
				}
				builder.register(object)
			}
			DefinitionKind::Interface { implements, fields } => {
				let mut interface = Interface::new(ty.name.as_str());
				if let Some(description) = description {
					interface = interface.description(description);
				}
				for parent in implements {
					interface = interface.implement(parent.as_str());
				}
				for field in fields.values() {
					let mut dynamic = InterfaceField::new(field.name.as_str(), type_ref(&field.ty));
					if let Some(description) = &field.description {
						dynamic = dynamic.description(description.as_str());
					}
					for argument in field.arguments.values() {
						dynamic = dynamic.argument(input_value(argument));
					}
					interface = interface.field(dynamic);
				}
				builder.register(interface)
			}
			DefinitionKind::Union { members } => {
				let mut union = Union::new(ty.name.as_str());
				if let Some(description) = description {
					union = union.description(description);
				}
				for member in members {
					union = union.possible_type(member.as_str());
				}
				builder.register(union)
			}
			DefinitionKind::Enum { values } => {
				let mut enumeration = Enum::new(ty.name.as_str());
				if let Some(description) = description {
					enumeration = enumeration.description(description);
				}
				for value in values.values() {
					let mut item = EnumItem::new(value.name.as_str());
					if let Some(description) = &value.description {
						item = item.description(description.as_str());
					}
					enumeration = enumeration.item(item);
				}
				builder.register(enumeration)
			}
			DefinitionKind::InputObject { fields } => {
				let mut input = InputObject::new(ty.name.as_str());
				if let Some(description) = description {
					input = input.description(description);
				}
				for field in fields.values() {
					input = input.field(input_value(field));
				}
				builder.register(input)
			}
		})
	}

	fn field(&self, type_name: &str, field: &FieldDefinition) -> Field {
		let bound = self
			.resolvers
			.get(type_name)
			.and_then(|fields| fields.get(&field.name));
		let resolver = match bound {
			Some(resolver) => Arc::clone(resolver),
			None if self.definitions.is_root(type_name) => unimplemented_resolver(type_name, &field.name),
			None => property_resolver(field.name.clone(), self.returns_abstract(field)),
		};
		let resolver = wire_field(
			type_name,
			&field.name,
			&field.directives,
			&self.directives,
			&self.wirings,
			resolver,
		);

		let mut dynamic = Field::new(field.name.as_str(), type_ref(&field.ty), move |ctx| {
			resolver(ctx)
		});
		if let Some(description) = &field.description {
			dynamic = dynamic.description(description.as_str());
		}
		for argument in field.arguments.values() {
			dynamic = dynamic.argument(input_value(argument));
		}
		if let Some(deprecated) = field.directive("deprecated") {
			let reason = match deprecated.argument("reason") {
				Some(async_graphql::Value::String(reason)) => Some(reason.as_str()),
				_ => None,
			};
			dynamic = dynamic.deprecation(reason);
		}
		dynamic
	}

	fn subscription_field(
		&self,
		type_name: &str,
		field: &FieldDefinition,
	) -> SchemaResult<SubscriptionField> {
		let resolver = self.subscriptions.get(&field.name).cloned().ok_or_else(|| {
			SchemaError::MissingResolver {
				type_name: type_name.to_string(),
				field: field.name.clone(),
			}
		})?;
		if !field.directives.is_empty() {
			tracing::debug!(
				field = %format!("{type_name}.{}", field.name),
				"directive wirings are not applied to subscription fields"
			);
		}

		let mut dynamic =
			SubscriptionField::new(field.name.as_str(), type_ref(&field.ty), move |ctx| {
				resolver(ctx)
			});
		if let Some(description) = &field.description {
			dynamic = dynamic.description(description.as_str());
		}
		for argument in field.arguments.values() {
			dynamic = dynamic.argument(input_value(argument));
		}
		Ok(dynamic)
	}

	fn returns_abstract(&self, field: &FieldDefinition) -> bool {
		self.definitions
			.get(named_type(&field.ty))
			.is_some_and(TypeDefinition::is_abstract)
	}
}

impl fmt::Debug for SchemaParser {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SchemaParser")
			.field("query_type", &self.definitions.query_type())
			.field("mutation_type", &self.definitions.mutation_type())
			.field("subscription_type", &self.definitions.subscription_type())
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}

fn type_ref(ty: &Type) -> TypeRef {
	let base = match &ty.base {
		BaseType::Named(name) => TypeRef::named(name.as_str()),
		BaseType::List(inner) => TypeRef::List(Box::new(type_ref(inner))),
	};
	if ty.nullable {
		base
	} else {
		TypeRef::NonNull(Box::new(base))
	}
}

fn input_value(definition: &InputValueDefinition) -> InputValue {
	let mut input = InputValue::new(definition.name.as_str(), type_ref(&definition.ty));
	if let Some(description) = &definition.description {
		input = input.description(description.as_str());
	}
	if let Some(default_value) = &definition.default_value {
		input = input.default_value(default_value.clone());
	}
	input
}

//! Schema directive wiring
//!
//! A wiring wraps the resolver of every field carrying a directive. Named
//! wirings ([`SchemaDirective`]) apply to one directive; unnamed wirings
//! registered with `directive_wiring` see every directive occurrence.

use crate::definitions::DirectiveUse;
use crate::resolver::FieldResolverFn;
use async_graphql::Value;
use std::fmt;
use std::sync::Arc;

/// Where a directive occurrence was found.
#[derive(Debug, Clone)]
pub struct DirectiveEnvironment {
	pub type_name: String,
	pub field_name: String,
	pub directive: DirectiveUse,
}

impl DirectiveEnvironment {
	pub fn directive_name(&self) -> &str {
		&self.directive.name
	}

	pub fn argument(&self, name: &str) -> Option<&Value> {
		self.directive.argument(name)
	}
}

/// Wraps a field resolver.
///
/// Implemented for closures taking the directive environment and the
/// resolver to wrap.
pub trait SchemaDirectiveWiring: Send + Sync {
	fn wire(&self, environment: &DirectiveEnvironment, resolver: FieldResolverFn)
	-> FieldResolverFn;
}

impl<F> SchemaDirectiveWiring for F
where
	F: Fn(&DirectiveEnvironment, FieldResolverFn) -> FieldResolverFn + Send + Sync,
{
	fn wire(
		&self,
		environment: &DirectiveEnvironment,
		resolver: FieldResolverFn,
	) -> FieldResolverFn {
		self(environment, resolver)
	}
}

/// A wiring bound to the directive `@name`.
///
/// # Examples
///
/// ```
/// use async_graphql::Value;
/// use async_graphql::dynamic::{FieldFuture, FieldValue};
/// use graphql_boot_tools::{resolve_field, resolver_fn, DirectiveEnvironment, FieldResolverFn, SchemaDirective};
/// use std::sync::Arc;
///
/// let upper = SchemaDirective::new("upper", |_: &DirectiveEnvironment, next: FieldResolverFn| {
///     resolver_fn(move |ctx| {
///         let next = Arc::clone(&next);
///         FieldFuture::new(async move {
///             let value = resolve_field(next(ctx)).await?;
///             Ok(value.map(|value| match value.as_value() {
///                 Some(Value::String(s)) => FieldValue::value(s.to_uppercase()),
///                 _ => value,
///             }))
///         })
///     })
/// });
/// assert_eq!(upper.name(), "upper");
/// ```
#[derive(Clone)]
pub struct SchemaDirective {
	name: String,
	wiring: Arc<dyn SchemaDirectiveWiring>,
}

impl SchemaDirective {
	pub fn new(name: impl Into<String>, wiring: impl SchemaDirectiveWiring + 'static) -> Self {
		Self {
			name: name.into(),
			wiring: Arc::new(wiring),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn wiring(&self) -> &Arc<dyn SchemaDirectiveWiring> {
		&self.wiring
	}
}

impl fmt::Debug for SchemaDirective {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SchemaDirective")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

/// Apply `directives` and `wirings` to the resolver of one field.
///
/// Directive occurrences are processed in declaration order. For each
/// occurrence the named directive is applied first, then every unnamed
/// wiring.
pub(crate) fn wire_field(
	type_name: &str,
	field_name: &str,
	occurrences: &[DirectiveUse],
	directives: &[SchemaDirective],
	wirings: &[Arc<dyn SchemaDirectiveWiring>],
	mut resolver: FieldResolverFn,
) -> FieldResolverFn {
	for occurrence in occurrences {
		let environment = DirectiveEnvironment {
			type_name: type_name.to_string(),
			field_name: field_name.to_string(),
			directive: occurrence.clone(),
		};
		for directive in directives.iter().filter(|d| d.name == occurrence.name) {
			tracing::debug!(
				field = %format!("{type_name}.{field_name}"),
				directive = %directive.name,
				"wiring schema directive"
			);
			resolver = directive.wiring.wire(&environment, resolver);
		}
		for wiring in wirings {
			resolver = wiring.wire(&environment, resolver);
		}
	}
	resolver
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::resolver::resolver_fn;
	use async_graphql::dynamic::FieldFuture;
	use indexmap::IndexMap;
	use rstest::rstest;
	use std::sync::Mutex;

	fn occurrence(name: &str) -> DirectiveUse {
		DirectiveUse {
			name: name.to_string(),
			arguments: IndexMap::new(),
		}
	}

	#[rstest]
	fn test_wirings_see_matching_occurrences() {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let named_seen = Arc::clone(&seen);
		let all_seen = Arc::clone(&seen);

		let directives = vec![SchemaDirective::new(
			"auth",
			move |env: &DirectiveEnvironment, next: FieldResolverFn| {
				named_seen.lock().unwrap().push(format!("named:{}", env.directive_name()));
				next
			},
		)];
		let wirings: Vec<Arc<dyn SchemaDirectiveWiring>> = vec![Arc::new(
			move |env: &DirectiveEnvironment, next: FieldResolverFn| {
				all_seen.lock().unwrap().push(format!("any:{}", env.directive_name()));
				next
			},
		)];

		wire_field(
			"Query",
			"secret",
			&[occurrence("auth"), occurrence("deprecated")],
			&directives,
			&wirings,
			resolver_fn(|_| FieldFuture::from_value(None)),
		);

		assert_eq!(
			*seen.lock().unwrap(),
			vec!["named:auth", "any:auth", "any:deprecated"]
		);
	}
}

//! Subscription resolvers
//!
//! Fields of the subscription root resolve to a stream of values instead of
//! a single value. Each item of the stream is delivered to the client as one
//! response.

use async_graphql::dynamic::{ResolverContext, SubscriptionFieldFuture};
use std::fmt;
use std::sync::Arc;

/// Type-erased subscription field resolver.
pub type SubscriptionResolverFn =
	Arc<dyn for<'a> Fn(ResolverContext<'a>) -> SubscriptionFieldFuture<'a> + Send + Sync>;

/// Wrap a subscription resolver function.
pub fn subscription_fn<F>(resolver: F) -> SubscriptionResolverFn
where
	F: for<'a> Fn(ResolverContext<'a>) -> SubscriptionFieldFuture<'a> + Send + Sync + 'static,
{
	Arc::new(resolver)
}

/// A stream resolver for one subscription field.
#[derive(Clone)]
pub struct SubscriptionFieldResolver {
	name: String,
	resolver: SubscriptionResolverFn,
}

impl SubscriptionFieldResolver {
	pub fn new<F>(name: impl Into<String>, resolver: F) -> Self
	where
		F: for<'a> Fn(ResolverContext<'a>) -> SubscriptionFieldFuture<'a> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			resolver: subscription_fn(resolver),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn resolver(&self) -> &SubscriptionResolverFn {
		&self.resolver
	}
}

impl fmt::Debug for SubscriptionFieldResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SubscriptionFieldResolver")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

/// Stream resolvers for fields of the subscription root.
///
/// # Examples
///
/// ```
/// use async_graphql::Value;
/// use async_graphql::dynamic::SubscriptionFieldFuture;
/// use futures_util::stream;
/// use graphql_boot_tools::SubscriptionResolver;
///
/// let resolver = SubscriptionResolver::new().field("ticks", |_| {
///     SubscriptionFieldFuture::new(async move {
///         Ok(stream::iter((1..=3).map(|n| Ok(Value::from(n)))))
///     })
/// });
///
/// assert_eq!(resolver.fields()[0].name(), "ticks");
/// ```
#[derive(Clone, Default)]
pub struct SubscriptionResolver {
	fields: Vec<SubscriptionFieldResolver>,
}

impl SubscriptionResolver {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn field<F>(mut self, name: impl Into<String>, resolver: F) -> Self
	where
		F: for<'a> Fn(ResolverContext<'a>) -> SubscriptionFieldFuture<'a> + Send + Sync + 'static,
	{
		self.fields.push(SubscriptionFieldResolver::new(name, resolver));
		self
	}

	pub fn fields(&self) -> &[SubscriptionFieldResolver] {
		&self.fields
	}
}

impl fmt::Debug for SubscriptionResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SubscriptionResolver")
			.field("fields", &self.fields)
			.finish()
	}
}

/// Resolver for a subscription field accepted without an implementation.
pub(crate) fn unimplemented_subscription(type_name: &str, field: &str) -> SubscriptionResolverFn {
	let message = format!("No resolver implemented for {type_name}.{field}");
	subscription_fn(move |_| {
		let message = message.clone();
		SubscriptionFieldFuture::new(async move {
			Err::<futures_util::stream::Empty<async_graphql::Result<async_graphql::Value>>, _>(
				async_graphql::Error::new(message),
			)
		})
	})
}

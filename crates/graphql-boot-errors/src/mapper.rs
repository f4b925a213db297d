//! Error-to-record mapping
//!
//! [`ErrorMapper`] selects, for each error, the binding registered for the
//! nearest class in the error's chain that accepts the error, and turns its
//! output into [`ErrorRecord`]s. Mapping never fails: unmatched errors and failing
//! handlers both yield a single fallback record.

use crate::class::{ClassifiedError, ErrorClass, TypedError};
use crate::handler::{
	ErrorHandlerSet, HandlerBinding, HandlerDeclarations, HandlerMethod, handler_fn,
	typed_accepts, typed_handler_fn,
};
use crate::record::{ErrorRecord, IntoErrorRecords};
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Errors raised while registering handlers.
///
/// These surface when the mapper is built, never while mapping.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
	#[error("handler `{handler}` declares no error class")]
	NoErrorClass { handler: String },

	#[error("error class `{class}` is bound to both `{existing}` and `{duplicate}`")]
	DuplicateBinding {
		class: &'static str,
		existing: String,
		duplicate: String,
	},

	#[error("two distinct error classes are named `{class}`")]
	AmbiguousClassName { class: &'static str },
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Builder for [`ErrorMapper`].
///
/// Registration happens here; the resulting mapper is read-only.
#[derive(Debug, Default)]
pub struct ErrorMapperBuilder {
	bindings: HashMap<&'static str, HandlerBinding>,
	order: Vec<&'static str>,
}

impl ErrorMapperBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind a class-generic handler to `class`.
	///
	/// # Examples
	///
	/// ```
	/// use graphql_boot_errors::{ErrorClass, ErrorMapper, ErrorRecord, GenericError, ANY_ERROR};
	///
	/// static RUNTIME: ErrorClass = ErrorClass::extends("RuntimeError", &ANY_ERROR);
	///
	/// let mapper = ErrorMapper::builder()
	///     .register(&RUNTIME, |error: &dyn graphql_boot_errors::ClassifiedError| {
	///         ErrorRecord::new(format!("runtime: {error}"))
	///     })
	///     .unwrap()
	///     .build();
	///
	/// let records = mapper.create(&GenericError::new(&RUNTIME, "boom"));
	/// assert_eq!(records[0].message(), "runtime: boom");
	/// ```
	pub fn register<F, R>(self, class: &'static ErrorClass, handler: F) -> RegistrationResult<Self>
	where
		F: Fn(&dyn ClassifiedError) -> R + Send + Sync + 'static,
		R: IntoErrorRecords,
	{
		let name = format!("handler for {}", class.name());
		self.bind(HandlerBinding::new(class, name.into(), handler_fn(handler)))
	}

	/// Bind a handler for the error type `E` to `E::class()`.
	///
	/// The binding only handles errors that [`TypedError::from_classified`]
	/// can view as `E`. Other errors of the class, or of its subclasses,
	/// continue up the chain to the next binding.
	pub fn register_typed<E, F, R>(self, handler: F) -> RegistrationResult<Self>
	where
		E: TypedError,
		F: Fn(&E) -> R + Send + Sync + 'static,
		R: IntoErrorRecords,
	{
		let class = E::class();
		let name = format!("typed handler for {}", class.name());
		self.bind(
			HandlerBinding::new(class, name.into(), typed_handler_fn(handler))
				.with_accepts(Some(typed_accepts::<E>())),
		)
	}

	/// Bind one class-generic handler to every class in `classes`.
	pub fn register_all<F, R>(
		self,
		classes: &[&'static ErrorClass],
		handler: F,
	) -> RegistrationResult<Self>
	where
		F: Fn(&dyn ClassifiedError) -> R + Send + Sync + 'static,
		R: IntoErrorRecords,
	{
		let names: Vec<_> = classes.iter().map(|c| c.name()).collect();
		let name = format!("handler for {}", names.join(", "));
		self.method(HandlerMethod::for_classes(name, classes, handler))
	}

	/// Bind a prepared [`HandlerMethod`] to each of its classes.
	pub fn method(mut self, method: HandlerMethod) -> RegistrationResult<Self> {
		if method.classes().is_empty() {
			return Err(RegistrationError::NoErrorClass {
				handler: method.name().to_string(),
			});
		}
		for binding in method.into_bindings() {
			self = self.bind(binding)?;
		}
		Ok(self)
	}

	/// Register every handler method declared by `handlers`.
	pub fn scan<H: ErrorHandlerSet>(mut self, handlers: Arc<H>) -> RegistrationResult<Self> {
		let methods = HandlerDeclarations::scan(handlers);
		tracing::debug!(
			handler_set = std::any::type_name::<H>(),
			methods = methods.len(),
			"scanned error handler methods"
		);
		for method in methods {
			self = self.method(method)?;
		}
		Ok(self)
	}

	fn bind(mut self, binding: HandlerBinding) -> RegistrationResult<Self> {
		let class = binding.class();
		if let Some(existing) = self.bindings.get(class.name()) {
			if existing.class() != class {
				return Err(RegistrationError::AmbiguousClassName {
					class: class.name(),
				});
			}
			return Err(RegistrationError::DuplicateBinding {
				class: class.name(),
				existing: existing.name().to_string(),
				duplicate: binding.name().to_string(),
			});
		}
		tracing::debug!(class = class.name(), handler = binding.name(), "bound error handler");
		self.order.push(class.name());
		self.bindings.insert(class.name(), binding);
		Ok(self)
	}

	pub fn build(self) -> ErrorMapper {
		ErrorMapper {
			bindings: Arc::new(self.bindings),
			order: self.order.into(),
		}
	}
}

/// Maps classified errors to protocol error records.
///
/// Cloning is cheap and clones share the same frozen registry.
#[derive(Debug, Clone)]
pub struct ErrorMapper {
	bindings: Arc<HashMap<&'static str, HandlerBinding>>,
	order: Arc<[&'static str]>,
}

impl Default for ErrorMapper {
	fn default() -> Self {
		ErrorMapperBuilder::new().build()
	}
}

impl ErrorMapper {
	pub fn builder() -> ErrorMapperBuilder {
		ErrorMapperBuilder::new()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}

	/// Bound classes, in registration order.
	pub fn bound_classes(&self) -> impl Iterator<Item = &'static ErrorClass> + '_ {
		self.order
			.iter()
			.filter_map(|name| self.bindings.get(name).map(HandlerBinding::class))
	}

	/// The nearest class in `error`'s chain whose binding accepts `error`.
	pub fn most_concrete(&self, error: &dyn ClassifiedError) -> Option<&'static ErrorClass> {
		error
			.error_class()
			.ancestors()
			.find(|class| self.binding(class, error).is_some())
	}

	fn binding(
		&self,
		class: &'static ErrorClass,
		error: &dyn ClassifiedError,
	) -> Option<&HandlerBinding> {
		self.bindings
			.get(class.name())
			.filter(|binding| binding.class() == class && binding.accepts(error))
	}

	/// Map one error to the records returned to the client.
	///
	/// Returns the handler's records unchanged, including an empty list.
	/// Without a matching binding, or when the handler fails or panics,
	/// returns exactly one fallback record.
	pub fn create(&self, error: &dyn ClassifiedError) -> Vec<ErrorRecord> {
		let Some(class) = self.most_concrete(error) else {
			return vec![ErrorRecord::fallback(error)];
		};
		let Some(binding) = self.binding(class, error) else {
			return vec![ErrorRecord::fallback(error)];
		};

		match catch_unwind(AssertUnwindSafe(|| binding.invoke(error))) {
			Ok(Ok(records)) => records,
			Ok(Err(failure)) => {
				tracing::warn!(
					class = class.name(),
					handler = binding.name(),
					error = %error,
					failure = %failure,
					"error handler failed, using fallback record"
				);
				vec![ErrorRecord::fallback(error)]
			}
			Err(panic) => {
				tracing::error!(
					class = class.name(),
					handler = binding.name(),
					error = %error,
					panic = panic_message(panic.as_ref()),
					"error handler panicked, using fallback record"
				);
				vec![ErrorRecord::fallback(error)]
			}
		}
	}

	/// Map several errors in order and concatenate the records.
	pub fn create_all<'a, I>(&self, errors: I) -> Vec<ErrorRecord>
	where
		I: IntoIterator<Item = &'a dyn ClassifiedError>,
	{
		errors
			.into_iter()
			.flat_map(|error| self.create(error))
			.collect()
	}
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
	if let Some(message) = panic.downcast_ref::<&'static str>() {
		message
	} else if let Some(message) = panic.downcast_ref::<String>() {
		message
	} else {
		"non-string panic payload"
	}
}

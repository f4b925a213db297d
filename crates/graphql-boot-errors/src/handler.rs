//! Handler bindings and declaration scanning
//!
//! Handlers can be registered one at a time on
//! [`ErrorMapperBuilder`](crate::ErrorMapperBuilder), or declared as methods
//! of a handler object implementing [`ErrorHandlerSet`]. Both paths end up
//! as [`HandlerMethod`] values bound once per error class.

use crate::class::{ClassifiedError, ErrorClass, TypedError};
use crate::record::{ErrorRecord, IntoErrorRecords};
use std::fmt;
use std::sync::Arc;

/// Type-erased handler function.
///
/// An `Err` return marks the handler as failed; the mapper substitutes a
/// fallback record.
pub type HandlerFn =
	Arc<dyn Fn(&dyn ClassifiedError) -> Result<Vec<ErrorRecord>, String> + Send + Sync>;

/// Check of whether a binding can handle a given error value.
pub type AcceptsFn = Arc<dyn Fn(&dyn ClassifiedError) -> bool + Send + Sync>;

/// Wrap a class-generic handler.
pub fn handler_fn<F, R>(handler: F) -> HandlerFn
where
	F: Fn(&dyn ClassifiedError) -> R + Send + Sync + 'static,
	R: IntoErrorRecords,
{
	Arc::new(move |error: &dyn ClassifiedError| handler(error).into_error_records())
}

/// Wrap a handler that only accepts errors viewable as `E`.
///
/// Errors that [`TypedError::from_classified`] cannot view as `E` are
/// reported as a handler failure. Bindings built from typed handlers pair
/// this with [`typed_accepts`], so the mapper skips them for such errors
/// instead of calling them.
pub fn typed_handler_fn<E, F, R>(handler: F) -> HandlerFn
where
	E: TypedError,
	F: Fn(&E) -> R + Send + Sync + 'static,
	R: IntoErrorRecords,
{
	Arc::new(move |error: &dyn ClassifiedError| {
		match E::from_classified(error) {
			Some(typed) => handler(typed).into_error_records(),
			None => Err(format!(
				"handler for `{}` cannot accept an error of class `{}`",
				E::class(),
				error.error_class()
			)),
		}
	})
}

/// The acceptance check of a typed handler for `E`.
pub fn typed_accepts<E: TypedError>() -> AcceptsFn {
	Arc::new(|error: &dyn ClassifiedError| E::from_classified(error).is_some())
}

/// A registered association between one error class and a handler.
#[derive(Clone)]
pub struct HandlerBinding {
	class: &'static ErrorClass,
	name: Arc<str>,
	handler: HandlerFn,
	accepts: Option<AcceptsFn>,
}

impl HandlerBinding {
	pub(crate) fn new(class: &'static ErrorClass, name: Arc<str>, handler: HandlerFn) -> Self {
		Self {
			class,
			name,
			handler,
			accepts: None,
		}
	}

	pub(crate) fn with_accepts(mut self, accepts: Option<AcceptsFn>) -> Self {
		self.accepts = accepts;
		self
	}

	/// Whether this binding can handle `error`.
	///
	/// Class-generic handlers accept everything in their class's subtree;
	/// typed handlers only what they can view as their parameter type.
	pub fn accepts(&self, error: &dyn ClassifiedError) -> bool {
		self.accepts.as_ref().is_none_or(|accepts| accepts(error))
	}

	pub fn class(&self) -> &'static ErrorClass {
		self.class
	}

	/// Name of the handler, used in logs.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub(crate) fn invoke(&self, error: &dyn ClassifiedError) -> Result<Vec<ErrorRecord>, String> {
		(self.handler)(error)
	}
}

impl fmt::Debug for HandlerBinding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandlerBinding")
			.field("class", &self.class.name())
			.field("name", &self.name)
			.field("typed", &self.accepts.is_some())
			.finish_non_exhaustive()
	}
}

/// A handler together with the classes it declares.
pub struct HandlerMethod {
	name: Arc<str>,
	classes: Vec<&'static ErrorClass>,
	handler: HandlerFn,
	accepts: Option<AcceptsFn>,
}

impl HandlerMethod {
	/// A handler whose class is taken from its parameter type.
	pub fn typed<E, F, R>(name: impl Into<Arc<str>>, handler: F) -> Self
	where
		E: TypedError,
		F: Fn(&E) -> R + Send + Sync + 'static,
		R: IntoErrorRecords,
	{
		Self {
			name: name.into(),
			classes: vec![E::class()],
			handler: typed_handler_fn(handler),
			accepts: Some(typed_accepts::<E>()),
		}
	}

	/// A class-generic handler bound to each of `classes`.
	pub fn for_classes<F, R>(
		name: impl Into<Arc<str>>,
		classes: &[&'static ErrorClass],
		handler: F,
	) -> Self
	where
		F: Fn(&dyn ClassifiedError) -> R + Send + Sync + 'static,
		R: IntoErrorRecords,
	{
		Self {
			name: name.into(),
			classes: classes.to_vec(),
			handler: handler_fn(handler),
			accepts: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn classes(&self) -> &[&'static ErrorClass] {
		&self.classes
	}

	pub(crate) fn into_bindings(self) -> Vec<HandlerBinding> {
		let Self {
			name,
			classes,
			handler,
			accepts,
		} = self;
		classes
			.into_iter()
			.map(|class| {
				HandlerBinding::new(class, Arc::clone(&name), Arc::clone(&handler))
					.with_accepts(accepts.clone())
			})
			.collect()
	}
}

impl fmt::Debug for HandlerMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let classes: Vec<_> = self.classes.iter().map(|c| c.name()).collect();
		f.debug_struct("HandlerMethod")
			.field("name", &self.name)
			.field("classes", &classes)
			.finish_non_exhaustive()
	}
}

/// An object whose methods handle errors.
///
/// Implementors list their handler methods once; the parameter type of
/// each method tells the mapper which class it handles.
///
/// # Examples
///
/// ```
/// use graphql_boot_errors::{
///     classified_error, ClassifiedError, ErrorClass, ErrorHandlerSet, ErrorMapper, ErrorRecord,
///     HandlerDeclarations, ANY_ERROR,
/// };
/// use std::sync::Arc;
///
/// static VALIDATION: ErrorClass = ErrorClass::extends("ValidationError", &ANY_ERROR);
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("invalid {field}")]
/// struct ValidationError {
///     field: String,
/// }
/// classified_error!(ValidationError => VALIDATION);
///
/// struct Handlers {
///     classification: &'static str,
/// }
///
/// impl Handlers {
///     fn on_validation(&self, error: &ValidationError) -> ErrorRecord {
///         ErrorRecord::new(format!("field {} invalid", error.field))
///             .with_classification(self.classification)
///     }
/// }
///
/// impl ErrorHandlerSet for Handlers {
///     fn declare(handlers: &mut HandlerDeclarations<Self>) {
///         handlers.method("on_validation", Self::on_validation);
///     }
/// }
///
/// let mapper = ErrorMapper::builder()
///     .scan(Arc::new(Handlers { classification: "BadInput" }))
///     .unwrap()
///     .build();
///
/// let records = mapper.create(&ValidationError { field: "x".into() });
/// assert_eq!(records[0].message(), "field x invalid");
/// assert_eq!(records[0].classification(), Some("BadInput"));
/// ```
pub trait ErrorHandlerSet: Send + Sync + Sized + 'static {
	fn declare(handlers: &mut HandlerDeclarations<Self>);
}

/// Collects the handler methods declared by an [`ErrorHandlerSet`].
pub struct HandlerDeclarations<H> {
	target: Arc<H>,
	methods: Vec<HandlerMethod>,
}

impl<H: ErrorHandlerSet> HandlerDeclarations<H> {
	pub(crate) fn scan(target: Arc<H>) -> Vec<HandlerMethod> {
		let mut declarations = Self {
			target,
			methods: Vec::new(),
		};
		H::declare(&mut declarations);
		declarations.methods
	}

	/// Declare a method handling the class of its parameter type.
	pub fn method<E, R>(&mut self, name: &'static str, method: fn(&H, &E) -> R) -> &mut Self
	where
		E: TypedError,
		R: IntoErrorRecords + 'static,
	{
		let target = Arc::clone(&self.target);
		self.methods.push(HandlerMethod::typed(name, move |error: &E| {
			method(&target, error)
		}));
		self
	}

	/// Declare a class-generic method handling each of `classes`.
	pub fn method_for<R>(
		&mut self,
		name: &'static str,
		classes: &[&'static ErrorClass],
		method: fn(&H, &dyn ClassifiedError) -> R,
	) -> &mut Self
	where
		R: IntoErrorRecords + 'static,
	{
		let target = Arc::clone(&self.target);
		self.methods.push(HandlerMethod::for_classes(
			name,
			classes,
			move |error: &dyn ClassifiedError| method(&target, error),
		));
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::class::{ANY_ERROR, GenericError};
	use rstest::rstest;

	static IO: ErrorClass = ErrorClass::extends("IoError", &ANY_ERROR);
	static TIMEOUT: ErrorClass = ErrorClass::extends("Timeout", &IO);

	#[derive(Debug, thiserror::Error)]
	#[error("timed out after {0}ms")]
	struct Timeout(u64);

	crate::classified_error!(Timeout => TIMEOUT);

	#[rstest]
	fn test_typed_handler_receives_concrete_error() {
		let handler = typed_handler_fn(|error: &Timeout| ErrorRecord::new(format!("{}ms", error.0)));
		let error: &dyn ClassifiedError = &Timeout(250);
		let records = handler(error).unwrap();
		assert_eq!(records, vec![ErrorRecord::new("250ms")]);
	}

	#[rstest]
	fn test_typed_handler_rejects_other_types() {
		let handler = typed_handler_fn(|_: &Timeout| ErrorRecord::new("unused"));
		let error = GenericError::new(&TIMEOUT, "generic timeout");
		let failure = handler(&error as &dyn ClassifiedError).unwrap_err();
		assert!(failure.contains("Timeout"));
	}

	#[rstest]
	fn test_typed_binding_accepts_only_viewable_errors() {
		let binding = HandlerMethod::typed("timeout", |_: &Timeout| ErrorRecord::new("typed"))
			.into_bindings()
			.remove(0);

		assert!(binding.accepts(&Timeout(1)));
		assert!(!binding.accepts(&GenericError::new(&TIMEOUT, "generic timeout")));
	}

	#[rstest]
	fn test_method_for_several_classes_yields_one_binding_each() {
		let method = HandlerMethod::for_classes("io", &[&IO, &TIMEOUT], |error: &dyn ClassifiedError| {
			ErrorRecord::new(error.to_string())
		});
		assert_eq!(method.classes().len(), 2);

		let bindings = method.into_bindings();
		let classes: Vec<_> = bindings.iter().map(|b| b.class().name()).collect();
		assert_eq!(classes, ["IoError", "Timeout"]);
		assert!(bindings.iter().all(|b| b.name() == "io"));
		assert!(bindings.iter().all(|b| b.accepts(&Timeout(1))));
	}

	struct Handlers {
		prefix: String,
	}

	impl Handlers {
		fn on_timeout(&self, error: &Timeout) -> Vec<ErrorRecord> {
			vec![
				ErrorRecord::new(format!("{}: {}", self.prefix, error)),
				ErrorRecord::new("retry later"),
			]
		}

		fn on_io(&self, error: &dyn ClassifiedError) -> Option<ErrorRecord> {
			Some(ErrorRecord::new(format!("{} io: {}", self.prefix, error)))
		}
	}

	impl ErrorHandlerSet for Handlers {
		fn declare(handlers: &mut HandlerDeclarations<Self>) {
			handlers
				.method("on_timeout", Self::on_timeout)
				.method_for("on_io", &[&IO], Self::on_io);
		}
	}

	#[rstest]
	fn test_scan_reads_parameter_types() {
		let methods = HandlerDeclarations::scan(Arc::new(Handlers {
			prefix: "svc".to_string(),
		}));
		let declared: Vec<_> = methods
			.iter()
			.map(|m| (m.name().to_string(), m.classes()[0].name()))
			.collect();
		assert_eq!(
			declared,
			vec![
				("on_timeout".to_string(), "Timeout"),
				("on_io".to_string(), "IoError"),
			]
		);
	}

	#[rstest]
	fn test_scanned_method_uses_target_state() {
		let mut methods = HandlerDeclarations::scan(Arc::new(Handlers {
			prefix: "svc".to_string(),
		}));
		let bindings = methods.remove(0).into_bindings();
		let records = bindings[0].invoke(&Timeout(5)).unwrap();
		assert_eq!(records[0].message(), "svc: timed out after 5ms");
		assert_eq!(records.len(), 2);
	}
}

//! Integration with the `async-graphql` execution layer
//!
//! Resolvers raise classified errors through [`IntoGraphQLError`], which
//! keeps the original error as the source of the `async_graphql::Error`.
//! After execution, [`ErrorMapper::process_response`] replaces every such
//! error with the records produced by its handler.

use crate::class::ClassifiedError;
use crate::mapper::ErrorMapper;
use crate::record::ErrorRecord;
use async_graphql::{ErrorExtensionValues, Response, ServerError, Value};
use std::fmt;
use std::sync::Arc;

/// Source attached to an `async_graphql::Error` raised from a classified error.
#[derive(Clone)]
pub struct ClassifiedSource(Arc<dyn ClassifiedError>);

impl ClassifiedSource {
	pub fn new<E: ClassifiedError>(error: E) -> Self {
		Self(Arc::new(error))
	}

	pub fn error(&self) -> &dyn ClassifiedError {
		self.0.as_ref()
	}
}

impl fmt::Display for ClassifiedSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self.0.as_ref(), f)
	}
}

impl fmt::Debug for ClassifiedSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ClassifiedSource")
			.field(&self.0.error_class().name())
			.field(&self.0.to_string())
			.finish()
	}
}

/// Convert a classified error into an `async_graphql::Error` that the
/// mapper can recognize after execution.
///
/// # Examples
///
/// ```
/// use graphql_boot_errors::{GenericError, IntoGraphQLError, ANY_ERROR};
///
/// let error = GenericError::new(&ANY_ERROR, "boom").into_graphql_error();
/// assert_eq!(error.message, "boom");
/// ```
pub trait IntoGraphQLError {
	fn into_graphql_error(self) -> async_graphql::Error;
}

impl<E: ClassifiedError> IntoGraphQLError for E {
	fn into_graphql_error(self) -> async_graphql::Error {
		async_graphql::Error::new_with_source(ClassifiedSource::new(self))
	}
}

impl ErrorRecord {
	/// Build a `ServerError` from this record, keeping the path and
	/// locations of the error it replaces.
	pub fn into_server_error(self, replaced: &ServerError) -> ServerError {
		let mut error = ServerError::new(self.message().to_string(), None);
		error.locations = replaced.locations.clone();
		error.path = replaced.path.clone();
		error.extensions = self.extension_values();
		error
	}

	/// Raise this record directly from a resolver.
	pub fn into_graphql_error(self) -> async_graphql::Error {
		let mut error = async_graphql::Error::new(self.message().to_string());
		error.extensions = self.extension_values();
		error
	}

	fn extension_values(&self) -> Option<ErrorExtensionValues> {
		let extensions = self.extensions()?;
		let mut values = ErrorExtensionValues::default();
		for (key, value) in extensions {
			match Value::from_json(value.clone()) {
				Ok(value) => values.set(key, value),
				Err(e) => {
					tracing::warn!(key = %key, error = %e, "dropping unconvertible error extension");
				}
			}
		}
		Some(values)
	}
}

impl ErrorMapper {
	/// Map one server error.
	///
	/// Errors raised through [`IntoGraphQLError`] are replaced by their
	/// records; any other error is returned unchanged.
	pub fn process_server_error(&self, error: ServerError) -> Vec<ServerError> {
		let records = match error.source::<ClassifiedSource>() {
			Some(source) => self.create(source.error()),
			None => return vec![error],
		};
		records
			.into_iter()
			.map(|record| record.into_server_error(&error))
			.collect()
	}

	/// Map every error of `response`, in order, concatenating the results.
	pub fn process_response(&self, mut response: Response) -> Response {
		let errors = std::mem::take(&mut response.errors);
		response.errors = errors
			.into_iter()
			.flat_map(|error| self.process_server_error(error))
			.collect();
		response
	}
}

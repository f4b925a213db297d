//! Executable schema

use crate::options::QueryLimits;
use async_graphql::dynamic::Schema;
use async_graphql::{Request, Response, ServerError};
use futures_util::stream::{self, BoxStream, StreamExt};
use graphql_boot_errors::ErrorMapper;

/// A schema ready to execute requests.
///
/// Wraps the `async-graphql` dynamic schema, enforcing the query size limit
/// before execution and mapping response errors when an [`ErrorMapper`] is
/// attached.
#[derive(Clone)]
pub struct ExecutableSchema {
	schema: Schema,
	limits: QueryLimits,
	error_mapper: Option<ErrorMapper>,
}

impl ExecutableSchema {
	pub fn new(schema: Schema, limits: QueryLimits) -> Self {
		Self {
			schema,
			limits,
			error_mapper: None,
		}
	}

	pub fn with_error_mapper(mut self, error_mapper: ErrorMapper) -> Self {
		self.error_mapper = Some(error_mapper);
		self
	}

	pub fn error_mapper(&self) -> Option<&ErrorMapper> {
		self.error_mapper.as_ref()
	}

	pub fn limits(&self) -> QueryLimits {
		self.limits
	}

	pub fn inner(&self) -> &Schema {
		&self.schema
	}

	pub async fn execute(&self, request: impl Into<Request>) -> Response {
		let request = request.into();
		if let Err(message) = self.limits.check_query_size(&request.query) {
			tracing::warn!(size = request.query.len(), "rejecting oversized query");
			return Response::from_errors(vec![ServerError::new(message, None)]);
		}

		let response = self.schema.execute(request).await;
		self.map_errors(response)
	}

	/// Execute a subscription, yielding one response per item of the
	/// resolver's stream.
	///
	/// Queries and mutations yield a single response.
	pub fn execute_stream(&self, request: impl Into<Request>) -> BoxStream<'_, Response> {
		let request = request.into();
		if let Err(message) = self.limits.check_query_size(&request.query) {
			tracing::warn!(size = request.query.len(), "rejecting oversized subscription");
			let response = Response::from_errors(vec![ServerError::new(message, None)]);
			return stream::once(async move { response }).boxed();
		}

		let mapper = self.error_mapper.clone();
		self.schema
			.execute_stream(request)
			.map(move |response| match &mapper {
				Some(mapper) if !response.errors.is_empty() => mapper.process_response(response),
				_ => response,
			})
			.boxed()
	}

	fn map_errors(&self, response: Response) -> Response {
		match &self.error_mapper {
			Some(mapper) if !response.errors.is_empty() => mapper.process_response(response),
			_ => response,
		}
	}

	/// The schema in SDL form.
	pub fn sdl(&self) -> String {
		self.schema.sdl()
	}
}

impl std::fmt::Debug for ExecutableSchema {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ExecutableSchema")
			.field("limits", &self.limits)
			.field("error_mapper", &self.error_mapper.is_some())
			.finish_non_exhaustive()
	}
}

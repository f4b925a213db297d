//! Behavioral tests for class-based error mapping

use graphql_boot_errors::{
	ANY_ERROR, AsAny, ClassifiedError, ErrorClass, ErrorHandlerSet, ErrorMapper, ErrorRecord,
	GenericError, HandlerDeclarations, INTERNAL_ERROR_MESSAGE, TypedError, classified_error,
};
use rstest::rstest;
use std::sync::Arc;

static RUNTIME: ErrorClass = ErrorClass::extends("RuntimeError", &ANY_ERROR);
static VALIDATION: ErrorClass = ErrorClass::extends("ValidationError", &RUNTIME);
static FIELD_VALIDATION: ErrorClass = ErrorClass::extends("FieldValidationError", &VALIDATION);

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct RuntimeError {
	message: String,
}

classified_error!(RuntimeError => RUNTIME);

#[derive(Debug, thiserror::Error)]
#[error("{} fields are invalid", .fields.len())]
struct ValidationError {
	fields: Vec<&'static str>,
}

classified_error!(ValidationError => VALIDATION);

fn runtime(message: &str) -> RuntimeError {
	RuntimeError {
		message: message.to_string(),
	}
}

#[rstest]
fn test_unmapped_error_falls_back_to_its_message() {
	let mapper = ErrorMapper::builder()
		.register_typed(|_: &ValidationError| ErrorRecord::new("field X invalid"))
		.unwrap()
		.build();

	let records = mapper.create(&runtime("boom"));

	assert_eq!(records, vec![ErrorRecord::new("boom")]);
	assert!(records[0].extensions().is_none());
}

#[rstest]
fn test_unmapped_error_without_message_uses_generic_text() {
	let mapper = ErrorMapper::default();

	let records = mapper.create(&runtime(""));

	assert_eq!(records, vec![ErrorRecord::new(INTERNAL_ERROR_MESSAGE)]);
}

#[rstest]
fn test_exact_binding_returns_handler_records_in_order() {
	let mapper = ErrorMapper::builder()
		.register_typed(|error: &ValidationError| {
			error
				.fields
				.iter()
				.map(|field| ErrorRecord::new(format!("field {field} invalid")))
				.collect::<Vec<_>>()
		})
		.unwrap()
		.build();
	let error = ValidationError {
		fields: vec!["name", "email"],
	};

	assert_eq!(mapper.most_concrete(&error), Some(&VALIDATION));
	assert_eq!(
		mapper.create(&error),
		vec![
			ErrorRecord::new("field name invalid"),
			ErrorRecord::new("field email invalid"),
		]
	);
}

#[rstest]
fn test_ancestor_binding_catches_subclass() {
	let mapper = ErrorMapper::builder()
		.register(&RUNTIME, |error: &dyn ClassifiedError| {
			ErrorRecord::new(error.to_string()).with_classification("Runtime")
		})
		.unwrap()
		.build();
	let error = ValidationError {
		fields: vec!["name"],
	};

	assert_eq!(mapper.most_concrete(&error), Some(&RUNTIME));
	assert_eq!(
		mapper.create(&error),
		vec![ErrorRecord::new("1 fields are invalid").with_classification("Runtime")]
	);
}

#[rstest]
fn test_nearest_ancestor_wins() {
	let mapper = ErrorMapper::builder()
		.register(&RUNTIME, |_: &dyn ClassifiedError| ErrorRecord::new("runtime"))
		.unwrap()
		.register(&VALIDATION, |_: &dyn ClassifiedError| ErrorRecord::new("validation"))
		.unwrap()
		.build();
	let error = GenericError::new(&FIELD_VALIDATION, "deep");

	assert_eq!(mapper.most_concrete(&error), Some(&VALIDATION));
	assert_eq!(mapper.create(&error), vec![ErrorRecord::new("validation")]);
}

#[rstest]
fn test_failing_handler_yields_single_fallback() {
	let mapper = ErrorMapper::builder()
		.register(&RUNTIME, |_: &dyn ClassifiedError| {
			Err::<ErrorRecord, _>("cannot render error")
		})
		.unwrap()
		.build();

	assert_eq!(mapper.create(&runtime("boom")), vec![ErrorRecord::new("boom")]);
}

#[rstest]
fn test_typed_handler_reached_by_other_type_yields_fallback() {
	let mapper = ErrorMapper::builder()
		.register_typed(|_: &RuntimeError| ErrorRecord::new("typed"))
		.unwrap()
		.build();
	let error = GenericError::new(&RUNTIME, "generic runtime failure");

	assert_eq!(
		mapper.create(&error),
		vec![ErrorRecord::new("generic runtime failure")]
	);
}

#[rstest]
fn test_handler_returning_nothing_is_respected() {
	let mapper = ErrorMapper::builder()
		.register(&VALIDATION, |_: &dyn ClassifiedError| Vec::<ErrorRecord>::new())
		.unwrap()
		.build();

	let records = mapper.create(&ValidationError { fields: vec![] });

	assert!(records.is_empty());
}

struct ApiHandlers {
	code_prefix: &'static str,
}

impl ApiHandlers {
	fn validation(&self, error: &ValidationError) -> Vec<ErrorRecord> {
		vec![
			ErrorRecord::new(error.to_string())
				.with_classification("ValidationError")
				.with_extension("code", format!("{}-400", self.code_prefix)),
			ErrorRecord::new("check the request"),
		]
	}

	fn everything_else(&self, error: &dyn ClassifiedError) -> ErrorRecord {
		ErrorRecord::new(error.to_string()).with_extension("code", format!("{}-500", self.code_prefix))
	}
}

impl ErrorHandlerSet for ApiHandlers {
	fn declare(handlers: &mut HandlerDeclarations<Self>) {
		handlers
			.method("validation", Self::validation)
			.method_for("everything_else", &[&ANY_ERROR], Self::everything_else);
	}
}

#[rstest]
fn test_scanned_handlers_dispatch_like_explicit_ones() {
	let mapper = ErrorMapper::builder()
		.scan(Arc::new(ApiHandlers { code_prefix: "API" }))
		.unwrap()
		.build();

	let validation = mapper.create(&ValidationError {
		fields: vec!["a", "b"],
	});
	assert_eq!(validation.len(), 2);
	assert_eq!(validation[0].classification(), Some("ValidationError"));
	assert_eq!(
		validation[0].extensions().unwrap()["code"],
		serde_json::json!("API-400")
	);

	let other = mapper.create(&runtime("db down"));
	assert_eq!(other.len(), 1);
	assert_eq!(other[0].message(), "db down");
	assert_eq!(
		other[0].extensions().unwrap()["code"],
		serde_json::json!("API-500")
	);
}

#[rstest]
fn test_scan_conflicting_with_explicit_registration_fails() {
	let result = ErrorMapper::builder()
		.register(&VALIDATION, |_: &dyn ClassifiedError| ErrorRecord::new("explicit"))
		.unwrap()
		.scan(Arc::new(ApiHandlers { code_prefix: "API" }));

	assert!(result.is_err());
}

struct LayeredHandlers;

impl LayeredHandlers {
	fn on_runtime(&self, error: &RuntimeError) -> ErrorRecord {
		ErrorRecord::new(error.to_string()).with_classification("Runtime")
	}

	fn on_any(&self, error: &dyn ClassifiedError) -> ErrorRecord {
		ErrorRecord::new(error.to_string()).with_classification("Any")
	}
}

impl ErrorHandlerSet for LayeredHandlers {
	fn declare(handlers: &mut HandlerDeclarations<Self>) {
		handlers
			.method("on_runtime", Self::on_runtime)
			.method_for("on_any", &[&ANY_ERROR], Self::on_any);
	}
}

#[rstest]
fn test_typed_handler_does_not_shadow_broader_handler() {
	// Arrange
	let mapper = ErrorMapper::builder()
		.scan(Arc::new(LayeredHandlers))
		.unwrap()
		.build();
	let subclass = ValidationError {
		fields: vec!["x"],
	};

	// Act
	let runtime_records = mapper.create(&runtime("db down"));
	let subclass_records = mapper.create(&subclass);

	// Assert
	assert_eq!(runtime_records[0].classification(), Some("Runtime"));
	assert_eq!(mapper.most_concrete(&subclass), Some(&ANY_ERROR));
	assert_eq!(
		subclass_records,
		vec![ErrorRecord::new("1 fields are invalid").with_classification("Any")]
	);
}

static STORAGE: ErrorClass = ErrorClass::extends("StorageError", &RUNTIME);
static DISK_FULL: ErrorClass = ErrorClass::extends("DiskFullError", &STORAGE);

#[derive(Debug, thiserror::Error)]
#[error("storage failure on {volume}")]
struct StorageError {
	volume: &'static str,
}

impl ClassifiedError for StorageError {
	fn error_class(&self) -> &'static ErrorClass {
		&STORAGE
	}
}

impl TypedError for StorageError {
	fn class() -> &'static ErrorClass {
		&STORAGE
	}

	fn from_classified(error: &dyn ClassifiedError) -> Option<&Self> {
		let any = error.as_any();
		any.downcast_ref::<Self>()
			.or_else(|| any.downcast_ref::<DiskFull>().map(|full| &full.storage))
	}
}

#[derive(Debug, thiserror::Error)]
#[error("disk full")]
struct DiskFull {
	storage: StorageError,
}

classified_error!(DiskFull => DISK_FULL);

#[rstest]
fn test_typed_handler_receives_subclass_through_from_classified() {
	let mapper = ErrorMapper::builder()
		.register_typed(|error: &StorageError| ErrorRecord::new(format!("volume {}", error.volume)))
		.unwrap()
		.build();
	let error = DiskFull {
		storage: StorageError { volume: "/data" },
	};

	assert_eq!(mapper.most_concrete(&error), Some(&STORAGE));
	assert_eq!(mapper.create(&error), vec![ErrorRecord::new("volume /data")]);
}

//! # graphql-boot errors
//!
//! Maps application errors to GraphQL response errors.
//!
//! Every error reports an [`ErrorClass`] in a single-inheritance taxonomy.
//! An [`ErrorMapper`] holds handlers bound to classes and, for each error,
//! runs the handler bound to the nearest class in the error's chain. The
//! mapping step itself never fails: unmatched errors and failing handlers
//! produce a fallback record carrying the error's message.
//!
//! ## Example
//!
//! ```
//! use graphql_boot_errors::{ClassifiedError, ErrorClass, ErrorMapper, ErrorRecord, GenericError, ANY_ERROR};
//!
//! static RUNTIME: ErrorClass = ErrorClass::extends("RuntimeError", &ANY_ERROR);
//! static VALIDATION: ErrorClass = ErrorClass::extends("ValidationError", &RUNTIME);
//!
//! let mapper = ErrorMapper::builder()
//!     .register(&VALIDATION, |_: &dyn ClassifiedError| ErrorRecord::new("field X invalid"))
//!     .unwrap()
//!     .build();
//!
//! let records = mapper.create(&GenericError::new(&RUNTIME, "boom"));
//! assert_eq!(records, vec![ErrorRecord::new("boom")]);
//! ```

pub mod class;
pub mod handler;
pub mod mapper;
pub mod record;
pub mod response;

pub use class::{ANY_ERROR, Ancestors, AsAny, ClassifiedError, ErrorClass, GenericError, TypedError};
pub use handler::{
	AcceptsFn, ErrorHandlerSet, HandlerBinding, HandlerDeclarations, HandlerFn, HandlerMethod,
	handler_fn, typed_accepts, typed_handler_fn,
};
pub use mapper::{ErrorMapper, ErrorMapperBuilder, RegistrationError, RegistrationResult};
pub use record::{CLASSIFICATION_KEY, ErrorRecord, INTERNAL_ERROR_MESSAGE, IntoErrorRecords};
pub use response::{ClassifiedSource, IntoGraphQLError};

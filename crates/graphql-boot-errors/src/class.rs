//! Error classes and the single-inheritance chain used for dispatch
//!
//! Rust errors carry no runtime class hierarchy, so each error reports an
//! [`ErrorClass`] with an explicit parent link. Handler lookup walks that
//! chain from the most specific class up to the root.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A named node in an error taxonomy.
///
/// Classes are declared as statics so that parent links can be
/// `&'static` references:
///
/// ```
/// use graphql_boot_errors::{ErrorClass, ANY_ERROR};
///
/// static RUNTIME: ErrorClass = ErrorClass::extends("RuntimeError", &ANY_ERROR);
/// static VALIDATION: ErrorClass = ErrorClass::extends("ValidationError", &RUNTIME);
///
/// let chain: Vec<_> = VALIDATION.ancestors().map(|c| c.name()).collect();
/// assert_eq!(chain, ["ValidationError", "RuntimeError", "Error"]);
/// ```
///
/// Classes compare by identity, not by name: two statics that happen to
/// share a name are different classes. The mapper refuses to bind two such
/// classes, so names must still be unique within an application.
#[derive(Debug)]
pub struct ErrorClass {
	name: &'static str,
	parent: Option<&'static ErrorClass>,
}

/// The root of the built-in taxonomy.
pub static ANY_ERROR: ErrorClass = ErrorClass::root("Error");

impl ErrorClass {
	/// Declare a class with no parent.
	pub const fn root(name: &'static str) -> Self {
		Self { name, parent: None }
	}

	/// Declare a class whose immediate parent is `parent`.
	pub const fn extends(name: &'static str, parent: &'static ErrorClass) -> Self {
		Self {
			name,
			parent: Some(parent),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn parent(&self) -> Option<&'static ErrorClass> {
		self.parent
	}

	/// Iterate over this class and then each parent, ending at the root.
	pub fn ancestors(&'static self) -> Ancestors {
		Ancestors { next: Some(self) }
	}

	/// Number of parent links between this class and its root.
	pub fn depth(&'static self) -> usize {
		self.ancestors().count() - 1
	}

	/// Whether `other` appears in this class's chain, including itself.
	pub fn is_a(&'static self, other: &ErrorClass) -> bool {
		self.ancestors().any(|class| class == other)
	}
}

impl PartialEq for ErrorClass {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self, other)
	}
}

impl Eq for ErrorClass {}

impl Hash for ErrorClass {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::ptr::hash(self, state);
	}
}

impl fmt::Display for ErrorClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// Iterator returned by [`ErrorClass::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors {
	next: Option<&'static ErrorClass>,
}

impl Iterator for Ancestors {
	type Item = &'static ErrorClass;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;
		self.next = current.parent;
		Some(current)
	}
}

/// Access to a value as `dyn Any`, implemented for every sized `'static` type.
pub trait AsAny {
	fn as_any(&self) -> &(dyn Any + Send + Sync);
}

impl<T: Any + Send + Sync> AsAny for T {
	fn as_any(&self) -> &(dyn Any + Send + Sync) {
		self
	}
}

/// An error that knows which [`ErrorClass`] it belongs to.
///
/// The class is reported per value, so a single enum can map its variants
/// to different classes.
pub trait ClassifiedError: std::error::Error + AsAny + Send + Sync + 'static {
	fn error_class(&self) -> &'static ErrorClass;
}

/// A [`ClassifiedError`] whose class is fixed by its Rust type.
///
/// Typed handlers and scanned handler methods read the class from this
/// trait instead of from a value, which is what lets the parameter type of
/// a handler declare the class it handles.
pub trait TypedError: ClassifiedError + Sized {
	fn class() -> &'static ErrorClass;

	/// View `error` as `Self`, if possible.
	///
	/// Typed handlers are only invoked for errors this returns `Some` for;
	/// any other error in the class's subtree is passed on to the next
	/// binding up the chain. The default accepts values of type `Self`
	/// only. Override it when errors of other types, such as wrappers
	/// around `Self`, should be handled as `Self`.
	fn from_classified(error: &dyn ClassifiedError) -> Option<&Self> {
		error.as_any().downcast_ref::<Self>()
	}
}

/// Implement [`ClassifiedError`] and [`TypedError`] for a type whose
/// class never varies.
///
/// ```
/// use graphql_boot_errors::{classified_error, ErrorClass, ANY_ERROR, TypedError};
///
/// static NOT_FOUND: ErrorClass = ErrorClass::extends("NotFound", &ANY_ERROR);
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0} not found")]
/// struct NotFound(String);
///
/// classified_error!(NotFound => NOT_FOUND);
///
/// assert_eq!(NotFound::class().name(), "NotFound");
/// ```
#[macro_export]
macro_rules! classified_error {
	($ty:ty => $class:path) => {
		impl $crate::ClassifiedError for $ty {
			fn error_class(&self) -> &'static $crate::ErrorClass {
				&$class
			}
		}

		impl $crate::TypedError for $ty {
			fn class() -> &'static $crate::ErrorClass {
				&$class
			}
		}
	};
}

/// A general-purpose error value carrying an explicit class and message.
///
/// Useful for libraries that raise failures without their own error type.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct GenericError {
	class: &'static ErrorClass,
	message: String,
}

impl GenericError {
	pub fn new(class: &'static ErrorClass, message: impl Into<String>) -> Self {
		Self {
			class,
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

impl ClassifiedError for GenericError {
	fn error_class(&self) -> &'static ErrorClass {
		self.class
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	static A: ErrorClass = ErrorClass::extends("A", &ANY_ERROR);
	static B: ErrorClass = ErrorClass::extends("B", &A);
	static C: ErrorClass = ErrorClass::extends("C", &B);
	static OTHER_ROOT: ErrorClass = ErrorClass::root("OtherRoot");

	#[rstest]
	fn test_ancestors_walk_to_root() {
		let names: Vec<_> = C.ancestors().map(ErrorClass::name).collect();
		assert_eq!(names, ["C", "B", "A", "Error"]);
	}

	#[rstest]
	#[case(&ANY_ERROR, 0)]
	#[case(&A, 1)]
	#[case(&C, 3)]
	#[case(&OTHER_ROOT, 0)]
	fn test_depth(#[case] class: &'static ErrorClass, #[case] expected: usize) {
		assert_eq!(class.depth(), expected);
	}

	#[rstest]
	fn test_is_a() {
		assert!(C.is_a(&A));
		assert!(C.is_a(&C));
		assert!(!A.is_a(&C));
		assert!(!OTHER_ROOT.is_a(&ANY_ERROR));
	}

	#[rstest]
	fn test_classes_compare_by_identity() {
		static SHADOW_A: ErrorClass = ErrorClass::extends("A", &ANY_ERROR);

		assert_eq!(&A, &A);
		assert_ne!(&A, &SHADOW_A);
		assert!(C.is_a(&A));
		assert!(!C.is_a(&SHADOW_A));
	}

	#[rstest]
	fn test_generic_error_reports_its_class() {
		let error = GenericError::new(&B, "boom");
		assert_eq!(error.error_class(), &B);
		assert_eq!(error.to_string(), "boom");
	}
}

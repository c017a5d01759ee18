//! Public error type for the Ferrule runtime.
//!
//! Every fallible runtime operation returns [`Error`]. Errors are raised
//! synchronously at the point of violation and abort the operation in
//! progress; side effects that already happened (for example a callback
//! that mutated a map) are not rolled back.

use thiserror::Error;

/// Errors raised by builtins, containers and typed array views.
///
/// The `Display` output of each variant is the message an engine would
/// surface to script code, so it is kept stable and asserted in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A builtin that requires arguments was called with none.
    ///
    /// Carries the builtin's qualified name, e.g. `TypedArray.prototype.some`.
    #[error("{name}() requires at least one argument")]
    Arity { name: &'static str },

    /// A value that must be invocable is not a function.
    ///
    /// Carries the display form of the offending value.
    #[error("{value} is not a function")]
    NotCallable { value: String },

    /// A value has the wrong type for the operation, e.g. a big integer
    /// stored into a numeric typed array or a non-pair passed to a map.
    #[error("{0}")]
    TypeMismatch(String),

    /// An element index is no longer backed by the view's buffer, because
    /// the buffer was detached or shrunk.
    #[error("index {index} is out of bounds for a typed array of length {length}")]
    Bounds { index: usize, length: usize },

    /// An error raised by callback code and propagated unchanged.
    #[error("{0}")]
    Callback(String),
}

impl Error {
    /// Build a [`Error::TypeMismatch`] from anything printable.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Error::TypeMismatch(message.into())
    }

    /// Build a [`Error::Callback`], the error user callbacks raise.
    pub fn callback(message: impl Into<String>) -> Self {
        Error::Callback(message.into())
    }

    /// Returns `true` for the errors a script engine would report as a
    /// `TypeError`. Only callback errors are excluded, since their kind is
    /// chosen by the callback.
    pub fn is_type_error(&self) -> bool {
        !matches!(self, Error::Callback(_))
    }
}

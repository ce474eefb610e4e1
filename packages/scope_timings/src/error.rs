use thiserror::Error;

use crate::Unit;

/// Errors that can occur when configuring a profiler or opening scopes.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A scope was released while the scope stack of the thread was already empty.
    ///
    /// This indicates a lifecycle bug and is never returned from the public API. It is
    /// counted by [`ProfilerContext::stack_underflows()`][crate::ProfilerContext::stack_underflows]
    /// and logged instead.
    #[error("scope stack underflow: a scope was released while no scope was open")]
    StackUnderflow,

    /// Samples of one unit were about to be combined with samples of another unit.
    #[error("unit mismatch: registry records {registry} but {requested} was requested")]
    UnitMismatch {
        /// The unit the registry or report was created with.
        registry: Unit,

        /// The unit that was requested by the caller.
        requested: Unit,
    },

    /// The caller tried to open a scope with an empty or whitespace-only name.
    #[error("scope names must not be empty or consist only of whitespace")]
    EmptyScopeName,

    /// A textual unit could not be parsed.
    #[error("unknown duration unit '{value}': expected one of ms, us, ns")]
    UnknownUnit {
        /// The value that did not name a unit.
        value: String,
    },
}

/// A specialized `Result` type for profiler operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

/// Represents all errors that can occur while evaluating a well-formed
/// expression against the loaded symbol values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An identifier has no symbol in the table, usually because symbols
    /// were never built for this expression.
    #[error("Error at position {position}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name:     String,
        /// Byte offset of the identifier in the expression.
        position: usize,
    },
    /// A scalar was followed by a subscript.
    #[error("Error at position {position}: Scalar '{name}' cannot be subscripted.")]
    ScalarSubscripted {
        /// The name of the scalar.
        name:     String,
        /// Byte offset of the identifier in the expression.
        position: usize,
    },
    /// An array was used without a subscript.
    #[error("Error at position {position}: Array '{name}' needs a subscript.")]
    MissingSubscript {
        /// The name of the array.
        name:     String,
        /// Byte offset of the identifier in the expression.
        position: usize,
    },
    /// An array was subscripted before any value record allocated it.
    #[error("Error at position {position}: Array '{name}' has no values loaded.")]
    UnallocatedArray {
        /// The name of the array.
        name:     String,
        /// Byte offset of the array name in the expression.
        position: usize,
    },
    /// A subscript resolved outside the allocated array.
    #[error("Error at position {position}: Index {found} is out of bounds for array '{name}' of length {len}.")]
    IndexOutOfBounds {
        /// The name of the array.
        name:     String,
        /// Allocated length of the array.
        len:      usize,
        /// The index that was actually requested.
        found:    i64,
        /// Byte offset of the array name in the expression.
        position: usize,
    },
    /// A subscript evaluated to infinity or NaN.
    #[error("Error at position {position}: Subscript {value} of array '{name}' is not a finite number.")]
    InvalidIndex {
        /// The name of the array.
        name:     String,
        /// The value the subscript evaluated to.
        value:    String,
        /// Byte offset of the array name in the expression.
        position: usize,
    },
}

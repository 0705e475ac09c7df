/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing an expression,
/// checking its nesting and operator structure, and reading value records.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types raised while evaluating an expression against
/// loaded symbol values, such as out-of-range subscripts or arrays that were
/// never allocated.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// Any failure produced by the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed expression text or value record.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed on otherwise well-formed input.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

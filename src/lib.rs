//! # symexpr
//!
//! symexpr evaluates arithmetic expressions over integer scalars and
//! one-dimensional integer arrays. Variables are discovered from the
//! expression text, their values are loaded from simple text records, and the
//! expression is evaluated to a single `f64`. All arithmetic is done in
//! double precision.
//!
//! ```text
//!     expression:  a[b[0]+1] * (x - 2) / y
//!     records:     x 5
//!                  y 4
//!                  b 2 (0,1) (1,9)
//!                  a 3 (2,42)
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{error::Error, interpreter::expression::Expression};

/// Provides unified error types for parsing and evaluation.
///
/// This module defines every error that can be raised while tokenizing an
/// expression, reading value records, or evaluating. Each error carries the
/// position in the expression or the record line it refers to.
///
/// # Responsibilities
/// - Defines `ParseError` for malformed expressions and value records.
/// - Defines `RuntimeError` for unresolvable identifiers and subscripts.
/// - Wraps both in `Error` for callers that run the whole pipeline.
pub mod error;
/// Operators and grammar productions of the expression language.
///
/// There is no syntax tree. The grammar is a flat span of operands and
/// operators per nesting level, and this module names the pieces the
/// evaluator works with.
pub mod grammar;
/// Orchestrates tokenizing, symbol discovery, value loading and evaluation.
///
/// # Responsibilities
/// - Splits expression text into tokens.
/// - Builds and fills the symbol table.
/// - Evaluates the expression against it.
pub mod interpreter;
/// General numeric helpers.
pub mod util;

/// Runs the whole pipeline on an expression and its value records.
///
/// Symbols are discovered from `expression`, `values` is read one record per
/// line, and the evaluated result is returned.
///
/// # Errors
/// Returns an error if the expression is malformed, a value record is
/// malformed, or a subscript cannot be resolved.
///
/// # Examples
/// ```
/// use symexpr::get_result;
///
/// let value = get_result("x+1", "x 5").unwrap();
/// assert_eq!(value, 6.0);
///
/// let value = get_result("arr[0]+arr[2]", "arr 3 (0,10) (2,7)").unwrap();
/// assert_eq!(value, 17.0);
///
/// // Never allocated.
/// assert!(get_result("arr[0]", "").is_err());
/// ```
pub fn get_result(expression: &str, values: &str) -> Result<f64, Error> {
    let mut expr = Expression::new(expression);
    expr.build_symbols()?;
    expr.load_symbol_text(values)?;
    expr.evaluate()
}

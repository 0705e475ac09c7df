/// Numeric conversion helpers.
///
/// Conversions between the integer symbol values and the `f64` operands the
/// evaluator computes with, including turning an evaluated subscript back
/// into an index.
pub mod num;

/// Core evaluation logic.
///
/// Contains the recursive walk over parenthesized groups and array
/// subscripts, identifier resolution, and the evaluator's result type.
pub mod core;

/// Flat span reduction.
///
/// Collects the operands and operators of one nesting level and reduces
/// them with `*` and `/` binding tighter than `+` and `-`.
pub mod span;

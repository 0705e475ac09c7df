/// Converts a symbol value or literal to an operand.
///
/// Magnitudes above `2^53` round to the nearest representable `f64`.
///
/// ## Example
/// ```
/// use symexpr::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(-42), -42.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts an evaluated subscript to an integer index.
///
/// Finite values are truncated toward zero; values beyond the `i64` range
/// saturate, which keeps them out of bounds for any array. Infinity and NaN
/// have no index.
///
/// ## Returns
/// - `Some(i64)`: The truncated index.
/// - `None`: If the value is not finite.
///
/// ## Example
/// ```
/// use symexpr::util::num::f64_to_subscript;
///
/// assert_eq!(f64_to_subscript(2.0), Some(2));
/// assert_eq!(f64_to_subscript(1.5), Some(1));
/// assert_eq!(f64_to_subscript(-0.5), Some(0));
/// assert_eq!(f64_to_subscript(-1.5), Some(-1));
/// assert_eq!(f64_to_subscript(f64::INFINITY), None);
/// assert_eq!(f64_to_subscript(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn f64_to_subscript(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}

/// Largest integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;
/// Smallest integer exactly representable as an `f64` (`-(2^53 - 1)`).
pub const MIN_SAFE_I64_INT: i64 = -9_007_199_254_740_991;

/// Normalizes negative zero to positive zero.
///
/// Every other value, including `NaN`, is returned unchanged.
///
/// # Example
/// ```
/// use webidl_conversions::util::num::censor_negative_zero;
///
/// assert!(censor_negative_zero(-0.0).is_sign_positive());
/// assert_eq!(censor_negative_zero(-3.5), -3.5);
/// ```
#[must_use]
pub fn censor_negative_zero(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x }
}

/// Drops the fractional part of `x`, rounding toward zero.
///
/// The result is never negative zero: `integer_part(-0.7)` is `+0`.
///
/// # Example
/// ```
/// use webidl_conversions::util::num::integer_part;
///
/// assert_eq!(integer_part(255.9), 255.0);
/// assert_eq!(integer_part(-128.9), -128.0);
/// assert!(integer_part(-0.7).is_sign_positive());
/// ```
#[must_use]
pub fn integer_part(x: f64) -> f64 {
    censor_negative_zero(x.trunc())
}

/// Rounds `x` to the nearest integer, resolving ties to the even neighbour.
///
/// Only an exact fractional part of `±0.5` is a tie. For a tie the truncated
/// integer is kept when it is even and moved one step away from zero when it
/// is odd. Every other value uses ordinary rounding. The result is never
/// negative zero.
///
/// # Example
/// ```
/// use webidl_conversions::util::num::even_round;
///
/// assert_eq!(even_round(127.5), 128.0);
/// assert_eq!(even_round(126.5), 126.0);
/// assert_eq!(even_round(-2.5), -2.0);
/// assert_eq!(even_round(-1.5), -2.0);
/// assert_eq!(even_round(2.7), 3.0);
/// assert!(even_round(-0.4).is_sign_positive());
/// ```
#[must_use]
pub fn even_round(x: f64) -> f64 {
    let truncated = x.trunc();
    let decimal = x - truncated;

    if decimal.abs() == 0.5 {
        let rounded = if truncated % 2.0 == 0.0 { truncated } else { truncated + x.signum() };
        return censor_negative_zero(rounded);
    }

    censor_negative_zero(x.round())
}

/// Returns `-1.0` for negative values and `1.0` otherwise.
///
/// Negative zero and `NaN` both count as positive here, which is what the
/// modulo correction below relies on.
const fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

/// Computes `x mod y` with the sign of the result matching the sign of `y`.
///
/// The `%` operator on floats is a truncating remainder whose sign follows
/// the dividend. Wrap-around conversions need the mathematical modulo, so a
/// result with the wrong sign is shifted by one period.
///
/// # Example
/// ```
/// use webidl_conversions::util::num::modulo;
///
/// assert_eq!(modulo(-1.0, 256.0), 255.0);
/// assert_eq!(modulo(300.0, 256.0), 44.0);
/// assert_eq!(modulo(-300.0, 256.0), 212.0);
/// ```
#[must_use]
pub fn modulo(x: f64, y: f64) -> f64 {
    let sign_might_not_match = x % y;
    if sign(y) == sign(sign_might_not_match) {
        sign_might_not_match
    } else {
        sign_might_not_match + y
    }
}

/// Converts an integral `f64` already known to be inside the `i64` range.
///
/// Callers must only pass values produced by the integer conversions, which
/// are integral and bounded by the safe-integer range.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn integral_to_i64(x: f64) -> i64 {
    debug_assert!(x.fract() == 0.0 && x.abs() <= 2f64.powi(53));
    x as i64
}

/// Converts an `f64` into a buffer length if it is a non-negative integer that
/// fits in `usize`.
///
/// # Example
/// ```
/// use webidl_conversions::util::num::f64_to_length;
///
/// assert_eq!(f64_to_length(8.0), Some(8));
/// assert_eq!(f64_to_length(-1.0), None);
/// assert_eq!(f64_to_length(1.5), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn f64_to_length(value: f64) -> Option<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return None;
    }
    if value > MAX_SAFE_I64_INT as f64 {
        return None;
    }
    usize::try_from(value as u64).ok()
}

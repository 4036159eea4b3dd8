/// Numeric primitives shared by every numeric converter.
///
/// This module provides the rounding and arithmetic helpers that the integer
/// and floating-point conversions are built from: truncation toward zero,
/// round-half-to-even, sign-correct modulo and negative-zero normalization,
/// plus the safe-integer constants that bound the 64-bit conversions.
///
/// All helpers are pure functions on `f64` and never fail.
pub mod num;

use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, One, Zero};

use crate::{
    conversion::{options::ConversionOptions, value::IdlValue},
    error::{ConversionResult, TypeConversionError, make_exception},
    host::{
        coerce::{number_to_string, to_number},
        value::HostValue,
    },
    util::num::{
        MAX_SAFE_I64_INT, MIN_SAFE_I64_INT, censor_negative_zero, even_round, integer_part,
        integral_to_i64, modulo,
    },
};

/// Describes an IDL integer type by bit width and signedness.
///
/// The descriptor is all a conversion needs: bounds and the wrap-around
/// period are derived from it. For 64-bit widths the bounds are narrowed to
/// the range of integers a double represents exactly, `±(2^53 - 1)`, which
/// is the documented behaviour callers rely on.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, conversion::integer::IntegerType};
///
/// let opts = ConversionOptions::default();
/// assert_eq!(IntegerType::OCTET.coerce(&256.into(), &opts).unwrap(), 0);
/// assert_eq!(IntegerType::OCTET.coerce(&(-1).into(), &opts).unwrap(), 255);
/// assert_eq!(IntegerType::BYTE.coerce(&200.into(), &opts).unwrap(), -56);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerType {
    bit_length: u32,
    signed:     bool,
}

impl IntegerType {
    /// `byte`
    pub const BYTE: Self = Self::new(8, true);
    /// `octet`
    pub const OCTET: Self = Self::new(8, false);
    /// `short`
    pub const SHORT: Self = Self::new(16, true);
    /// `unsigned short`
    pub const UNSIGNED_SHORT: Self = Self::new(16, false);
    /// `long`
    pub const LONG: Self = Self::new(32, true);
    /// `unsigned long`
    pub const UNSIGNED_LONG: Self = Self::new(32, false);
    /// `long long`
    pub const LONG_LONG: Self = Self::new(64, true);
    /// `unsigned long long`
    pub const UNSIGNED_LONG_LONG: Self = Self::new(64, false);

    /// Creates a descriptor.
    ///
    /// # Panics
    /// Panics (at compile time for constants) if `bit_length` is not one of
    /// 8, 16, 32 or 64.
    #[must_use]
    pub const fn new(bit_length: u32, signed: bool) -> Self {
        assert!(matches!(bit_length, 8 | 16 | 32 | 64), "unsupported integer width");
        Self { bit_length, signed }
    }

    /// Width in bits.
    #[must_use]
    pub const fn bit_length(self) -> u32 {
        self.bit_length
    }

    /// Whether negative values are representable.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        self.signed
    }

    /// Inclusive bounds of the accepted range.
    ///
    /// # Example
    /// ```
    /// use webidl_conversions::conversion::integer::IntegerType;
    ///
    /// assert_eq!(IntegerType::BYTE.bounds(), (-128, 127));
    /// assert_eq!(IntegerType::UNSIGNED_LONG.bounds(), (0, 4_294_967_295));
    /// assert_eq!(IntegerType::LONG_LONG.bounds(), (-9_007_199_254_740_991, 9_007_199_254_740_991));
    /// ```
    #[must_use]
    pub const fn bounds(self) -> (i64, i64) {
        match (self.bit_length, self.signed) {
            (64, true) => (MIN_SAFE_I64_INT, MAX_SAFE_I64_INT),
            (64, false) => (0, MAX_SAFE_I64_INT),
            (bits, true) => (-(1 << (bits - 1)), (1 << (bits - 1)) - 1),
            (bits, false) => (0, (1 << bits) - 1),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn float_bounds(self) -> (f64, f64) {
        let (lower, upper) = self.bounds();
        (lower as f64, upper as f64)
    }

    fn range_error(self, options: &ConversionOptions) -> TypeConversionError {
        let (lower, upper) = self.float_bounds();
        make_exception(&format!("is outside the accepted range of {} to {}, inclusive",
                                number_to_string(lower),
                                number_to_string(upper)),
                       options)
    }

    /// Converts a host value with double-precision arithmetic.
    ///
    /// This is the conversion for `byte` through `unsigned long`:
    /// 1. the value is converted to a number and `-0` becomes `0`;
    /// 2. with `enforce_range`, non-finite values and values whose integer
    ///    part is out of range fail;
    /// 3. with `clamp`, any value but `NaN` is saturated and rounded half to
    ///    even;
    /// 4. otherwise non-finite values become `0` and the integer part is
    ///    wrapped modulo `2^bit_length` into range.
    ///
    /// # Errors
    /// Fails if the value has no numeric form or violates `enforce_range`.
    ///
    /// # Example
    /// ```
    /// use webidl_conversions::{ConversionOptions, conversion::integer::IntegerType};
    ///
    /// let clamp = ConversionOptions::default().with_clamp();
    /// assert_eq!(IntegerType::OCTET.coerce(&300.into(), &clamp).unwrap(), 255);
    /// assert_eq!(IntegerType::OCTET.coerce(&127.5.into(), &clamp).unwrap(), 128);
    ///
    /// let strict = ConversionOptions::default().with_enforce_range();
    /// assert_eq!(IntegerType::BYTE.coerce(&(-128.9).into(), &strict).unwrap(), -128);
    /// assert!(IntegerType::BYTE.coerce(&200.into(), &strict).is_err());
    /// ```
    pub fn coerce(self, value: &HostValue, options: &ConversionOptions) -> ConversionResult<i64> {
        let x = censor_negative_zero(to_number(value, options)?);
        self.coerce_number(x, options).map(integral_to_i64)
    }

    fn coerce_number(self, x: f64, options: &ConversionOptions) -> ConversionResult<f64> {
        let (lower, upper) = self.float_bounds();

        if options.enforce_range {
            if !x.is_finite() {
                return Err(make_exception("is not a finite number", options));
            }
            let x = integer_part(x);
            if x < lower || x > upper {
                return Err(self.range_error(options));
            }
            return Ok(x);
        }

        if !x.is_nan() && options.clamp {
            return Ok(even_round(x.clamp(lower, upper)));
        }

        if !x.is_finite() || x == 0.0 {
            return Ok(0.0);
        }

        let x = integer_part(x);
        // In range already: skip the modulo, 2^64 is not exact in f64 arithmetic.
        if x >= lower && x <= upper {
            return Ok(x);
        }

        let two_to_the_bit_length = 2f64.powi(self.bit_length_i32());
        let x = modulo(x, two_to_the_bit_length);
        if self.signed && x >= 2f64.powi(self.bit_length_i32() - 1) {
            return Ok(x - two_to_the_bit_length);
        }
        Ok(censor_negative_zero(x))
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn bit_length_i32(self) -> i32 {
        self.bit_length as i32
    }

    /// Converts a host value with arbitrary-precision arithmetic.
    ///
    /// This is the conversion for `long long` and `unsigned long long`. A
    /// host BigInt is used as is; anything else is converted to a number
    /// first. `enforce_range` and `clamp` apply the safe-integer bounds, and
    /// the default policy wraps the integer part exactly, as two's complement
    /// of `bit_length` bits.
    ///
    /// # Errors
    /// Fails if the value has no numeric form or violates `enforce_range`.
    ///
    /// # Example
    /// ```
    /// use num_bigint::BigInt;
    /// use webidl_conversions::{ConversionOptions, HostValue, conversion::integer::IntegerType};
    ///
    /// let opts = ConversionOptions::default();
    /// let big = BigInt::from(1u8) << 64u32;
    ///
    /// let wrapped = IntegerType::LONG_LONG.coerce_big(&HostValue::from(big + 5), &opts).unwrap();
    /// assert_eq!(wrapped, BigInt::from(5));
    ///
    /// let negative = IntegerType::UNSIGNED_LONG_LONG.coerce_big(&HostValue::from(-1), &opts).unwrap();
    /// assert_eq!(negative, BigInt::from(u64::MAX));
    /// ```
    pub fn coerce_big(self,
                      value: &HostValue,
                      options: &ConversionOptions)
                      -> ConversionResult<BigInt> {
        if let HostValue::BigInt(n) = value {
            return self.coerce_bigint(n, options);
        }

        let x = censor_negative_zero(to_number(value, options)?);

        if options.enforce_range || (!x.is_nan() && options.clamp) {
            let x = self.coerce_number(x, options)?;
            return Ok(BigInt::from(integral_to_i64(x)));
        }

        if !x.is_finite() || x == 0.0 {
            return Ok(BigInt::zero());
        }

        let n = BigInt::from_f64(integer_part(x)).unwrap_or_default();
        Ok(self.wrap(&n))
    }

    fn coerce_bigint(self, n: &BigInt, options: &ConversionOptions) -> ConversionResult<BigInt> {
        let (lower, upper) = self.bounds();
        let (lower, upper) = (BigInt::from(lower), BigInt::from(upper));

        if options.enforce_range {
            if *n < lower || *n > upper {
                return Err(self.range_error(options));
            }
            return Ok(n.clone());
        }
        if options.clamp {
            return Ok(n.clone().clamp(lower, upper));
        }
        Ok(self.wrap(n))
    }

    /// Reduces `n` to the type's width as two's complement.
    ///
    /// # Example
    /// ```
    /// use num_bigint::BigInt;
    /// use webidl_conversions::conversion::integer::IntegerType;
    ///
    /// assert_eq!(IntegerType::BYTE.wrap(&BigInt::from(200)), BigInt::from(-56));
    /// assert_eq!(IntegerType::OCTET.wrap(&BigInt::from(-1)), BigInt::from(255));
    /// ```
    #[must_use]
    pub fn wrap(self, n: &BigInt) -> BigInt {
        let modulus = BigInt::one() << self.bit_length;
        let remainder = n % &modulus;
        let reduced = if remainder.sign() == Sign::Minus { remainder + &modulus } else { remainder };

        if self.signed && reduced >= BigInt::one() << (self.bit_length - 1) {
            reduced - modulus
        } else {
            reduced
        }
    }

    /// Converts a host value to the canonical value of this type, choosing the
    /// arbitrary-precision path for 64-bit widths.
    ///
    /// # Errors
    /// See [`coerce`](Self::coerce) and [`coerce_big`](Self::coerce_big).
    pub fn convert(self, value: &HostValue, options: &ConversionOptions) -> ConversionResult<IdlValue> {
        if self.bit_length == 64 {
            self.coerce_big(value, options).map(IdlValue::BigInt)
        } else {
            self.coerce(value, options).map(IdlValue::Integer)
        }
    }
}

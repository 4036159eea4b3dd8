use crate::{
    conversion::options::ConversionOptions,
    error::{ConversionResult, make_exception},
    host::{coerce::to_number, value::HostValue},
};

/// Converts to `double`, rejecting `NaN` and infinities.
///
/// # Errors
/// Fails for non-finite values and values without a numeric form.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, conversion::float::double};
///
/// let opts = ConversionOptions::default();
/// assert_eq!(double(&"1.25".into(), &opts).unwrap(), 1.25);
///
/// let err = double(&f64::INFINITY.into(), &opts).unwrap_err();
/// assert_eq!(err.message(), "Value is not a finite floating-point value.");
/// ```
pub fn double(value: &HostValue, options: &ConversionOptions) -> ConversionResult<f64> {
    let x = to_number(value, options)?;
    if !x.is_finite() {
        return Err(make_exception("is not a finite floating-point value", options));
    }
    Ok(x)
}

/// Converts to `unrestricted double`. Any number passes through unchanged.
///
/// # Errors
/// Fails only for values without a numeric form.
pub fn unrestricted_double(value: &HostValue, options: &ConversionOptions) -> ConversionResult<f64> {
    to_number(value, options)
}

/// Converts to `float`, narrowing to single precision.
///
/// Negative zero is returned as is. A finite value that becomes infinite when
/// narrowed lies outside the single-precision range and is rejected.
///
/// # Errors
/// Fails for non-finite values, values beyond `f32` range and values without
/// a numeric form.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, conversion::float::float};
///
/// let opts = ConversionOptions::default();
/// assert_eq!(float(&0.1.into(), &opts).unwrap(), 0.1f32);
/// assert!(float(&(-0.0).into(), &opts).unwrap().is_sign_negative());
/// assert!(float(&3.4e39.into(), &opts).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn float(value: &HostValue, options: &ConversionOptions) -> ConversionResult<f32> {
    let x = to_number(value, options)?;
    if !x.is_finite() {
        return Err(make_exception("is not a finite floating-point value", options));
    }
    if x == 0.0 && x.is_sign_negative() {
        return Ok(-0.0);
    }

    let y = x as f32;
    if y.is_infinite() {
        return Err(make_exception("is outside the range of a single-precision floating-point value",
                                  options));
    }
    Ok(y)
}

/// Converts to `unrestricted float`.
///
/// `NaN` and negative zero are kept; everything else is rounded to the
/// nearest single-precision value, overflowing to infinity.
///
/// # Errors
/// Fails only for values without a numeric form.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, conversion::float::unrestricted_float};
///
/// let opts = ConversionOptions::default();
/// assert_eq!(unrestricted_float(&3.4e39.into(), &opts).unwrap(), f32::INFINITY);
/// assert!(unrestricted_float(&f64::NAN.into(), &opts).unwrap().is_nan());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn unrestricted_float(value: &HostValue, options: &ConversionOptions) -> ConversionResult<f32> {
    let x = to_number(value, options)?;
    if x.is_nan() {
        return Ok(f32::NAN);
    }
    if x == 0.0 && x.is_sign_negative() {
        return Ok(-0.0);
    }
    Ok(x as f32)
}

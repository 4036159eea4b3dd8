use crate::{
    conversion::options::ConversionOptions,
    error::{ConversionResult, make_exception},
    host::{
        coerce::to_string,
        value::{HostString, HostValue},
    },
};

/// Converts to `DOMString`.
///
/// With `treat_null_as_empty_string`, `null` becomes `""`. Symbols are
/// rejected; everything else goes through the host's string conversion.
///
/// # Errors
/// Fails for symbols and objects without a primitive form.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, conversion::string::dom_string, host::value::HostValue};
///
/// let opts = ConversionOptions::default();
/// assert_eq!(dom_string(&HostValue::Null, &opts).unwrap().to_string(), "null");
///
/// let opts = opts.with_treat_null_as_empty_string();
/// assert!(dom_string(&HostValue::Null, &opts).unwrap().is_empty());
/// ```
pub fn dom_string(value: &HostValue, options: &ConversionOptions) -> ConversionResult<HostString> {
    if options.treat_null_as_empty_string && matches!(value, HostValue::Null) {
        return Ok(HostString::new());
    }
    if matches!(value, HostValue::Symbol(_)) {
        return Err(make_exception("is a symbol, which cannot be converted to a string", options));
    }
    to_string(value, options)
}

/// Converts to `ByteString`: a `DOMString` whose code units all fit in a
/// byte.
///
/// # Errors
/// Fails if any code unit exceeds `0xFF`, and wherever [`dom_string`] fails.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, conversion::string::byte_string};
///
/// let opts = ConversionOptions::default();
/// assert!(byte_string(&"caf\u{e9}".into(), &opts).is_ok());
///
/// let err = byte_string(&"\u{20ac}".into(), &opts).unwrap_err();
/// assert_eq!(err.message(), "Value is not a valid ByteString.");
/// ```
pub fn byte_string(value: &HostValue, options: &ConversionOptions) -> ConversionResult<HostString> {
    let s = dom_string(value, options)?;
    if s.units().iter().any(|&unit| unit > 0xFF) {
        return Err(make_exception("is not a valid ByteString", options));
    }
    Ok(s)
}

/// Converts to `USVString`, repairing unpaired surrogates.
///
/// # Errors
/// Wherever [`dom_string`] fails.
///
/// # Example
/// ```
/// use webidl_conversions::{
///     ConversionOptions, conversion::string::usv_string, host::value::HostString,
/// };
///
/// let lone = HostString::from_units(vec![0xD83D, 0x0041]);
/// let out = usv_string(&lone.into(), &ConversionOptions::default()).unwrap();
/// assert_eq!(out, "\u{FFFD}A");
/// ```
pub fn usv_string(value: &HostValue, options: &ConversionOptions) -> ConversionResult<String> {
    let s = dom_string(value, options)?;
    Ok(scalar_values(s.units()).collect())
}

/// Decodes UTF-16 code units into Unicode scalar values in a single pass.
///
/// A surrogate pair is combined into one scalar value above U+FFFF. A
/// trailing surrogate on its own, or a leading surrogate that is last or not
/// followed by a trailing one, becomes U+FFFD; in the latter case the next
/// unit is decoded normally.
///
/// # Example
/// ```
/// use webidl_conversions::conversion::string::scalar_values;
///
/// let decoded = scalar_values(&[0xD83D, 0xDE00, 0xDC00]).collect::<String>();
/// assert_eq!(decoded, "\u{1F600}\u{FFFD}");
/// ```
pub fn scalar_values(units: &[u16]) -> impl Iterator<Item = char> + '_ {
    char::decode_utf16(units.iter().copied()).map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
}

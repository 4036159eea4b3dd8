use num_bigint::BigInt;
use num_traits::{Num, ToPrimitive, Zero};

use crate::{
    conversion::options::ConversionOptions,
    error::{ConversionResult, make_exception},
    host::{
        buffer::ViewKind,
        value::{HostString, HostValue, ObjectKind, ObjectRef},
    },
};

/// Which primitive an object should prefer when it is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    /// Try `valueOf` before `toString`.
    Number,
    /// Try `toString` before `valueOf`.
    String,
}

/// Converts a value to a primitive.
///
/// Primitives are returned unchanged. Objects consult `valueOf` and
/// `toString` in the order given by `hint` and return the first primitive
/// result.
///
/// # Errors
/// Fails if neither method produces a primitive.
pub fn to_primitive(value: &HostValue,
                    hint: PreferredType,
                    options: &ConversionOptions)
                    -> ConversionResult<HostValue> {
    let HostValue::Object(object) = value else {
        return Ok(value.clone());
    };

    let methods: [fn(&ObjectRef) -> Option<HostValue>; 2] = match hint {
        PreferredType::Number => [value_of, object_to_string],
        PreferredType::String => [object_to_string, value_of],
    };

    methods.iter()
           .filter_map(|method| method(object))
           .find(|result| !matches!(result, HostValue::Object(_)))
           .ok_or_else(|| make_exception("cannot be converted to a primitive value", options))
}

/// Result of an object's `valueOf`; `None` when it returns the object itself.
fn value_of(object: &ObjectRef) -> Option<HostValue> {
    match object.kind() {
        ObjectKind::Ordinary { value_of, .. } => value_of.clone(),
        _ => None,
    }
}

/// Result of an object's `toString`.
fn object_to_string(object: &ObjectRef) -> Option<HostValue> {
    let text = match object.kind() {
        ObjectKind::Ordinary { to_string: Some(result),
                               .. } => return Some(result.clone()),
        ObjectKind::Ordinary { to_string: None, .. } => "[object Object]".to_string(),
        ObjectKind::Function { name } => format!("function {name}() {{ [native code] }}"),
        ObjectKind::Buffer(buffer) if buffer.is_shared() => "[object SharedArrayBuffer]".to_string(),
        ObjectKind::Buffer(_) => "[object ArrayBuffer]".to_string(),
        ObjectKind::View(view) => match view.kind() {
            ViewKind::DataView => "[object DataView]".to_string(),
            ViewKind::Typed(_) => view.elements()
                                      .iter()
                                      .map(|element| match element {
                                          HostValue::Number(n) => number_to_string(*n),
                                          HostValue::BigInt(n) => n.to_string(),
                                          _ => String::new(),
                                      })
                                      .collect::<Vec<_>>()
                                      .join(","),
        },
    };
    Some(HostValue::from(text.as_str()))
}

/// Converts a value to a number for an IDL numeric type.
///
/// Arbitrary-precision integers are rejected here rather than silently
/// rounded. Everything else goes through the alternate realm's number factory
/// when one is configured, otherwise through [`number_value`].
///
/// # Errors
/// Fails for BigInt and symbol values, and for objects without a primitive
/// form. An object whose `valueOf` yields a BigInt is accepted.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, host::{coerce::to_number, value::HostValue}};
///
/// let opts = ConversionOptions::default();
/// assert_eq!(to_number(&HostValue::from(" 0x1F "), &opts).unwrap(), 31.0);
/// assert!(to_number(&HostValue::Undefined, &opts).unwrap().is_nan());
///
/// let err = to_number(&HostValue::BigInt(5.into()), &opts).unwrap_err();
/// assert_eq!(err.message(), "Value is a BigInt which cannot be converted to a number.");
/// ```
pub fn to_number(value: &HostValue, options: &ConversionOptions) -> ConversionResult<f64> {
    if matches!(value, HostValue::BigInt(_)) {
        return Err(make_exception("is a BigInt which cannot be converted to a number", options));
    }
    match options.realm() {
        Some(realm) => realm.to_number(value, options),
        None => number_value(value, options),
    }
}

/// The host's own number conversion, the counterpart of `Number(value)`.
///
/// BigInts, including those an object's `valueOf` yields, become the nearest
/// number. Only [`to_number`] refuses a BigInt passed in directly.
///
/// # Errors
/// Fails for symbols and objects without a primitive form.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, host::{coerce::number_value, value::HostValue}};
///
/// let opts = ConversionOptions::default();
/// let boxed = HostValue::object_with(Some(HostValue::BigInt(5.into())), None);
/// assert_eq!(number_value(&boxed, &opts).unwrap(), 5.0);
/// ```
pub fn number_value(value: &HostValue, options: &ConversionOptions) -> ConversionResult<f64> {
    Ok(match value {
        HostValue::Undefined => f64::NAN,
        HostValue::Null => 0.0,
        HostValue::Boolean(b) => f64::from(u8::from(*b)),
        HostValue::Number(n) => *n,
        HostValue::BigInt(n) => bigint_to_f64(n),
        HostValue::String(s) => string_to_number(s),
        HostValue::Symbol(_) => {
            return Err(make_exception("is a symbol, which cannot be converted to a number",
                                      options));
        },
        HostValue::Object(_) => {
            let primitive = to_primitive(value, PreferredType::Number, options)?;
            return number_value(&primitive, options);
        },
    })
}

/// Converts a value to a string, through the alternate realm's string factory
/// when one is configured.
///
/// # Errors
/// Fails for objects without a primitive form.
pub fn to_string(value: &HostValue, options: &ConversionOptions) -> ConversionResult<HostString> {
    match options.realm() {
        Some(realm) => realm.to_string(value, options),
        None => string_value(value, options),
    }
}

/// The host's own string conversion.
///
/// Symbols become `Symbol(description)`; rejecting them is up to the IDL
/// string conversion.
///
/// # Errors
/// Fails for objects without a primitive form.
pub fn string_value(value: &HostValue, options: &ConversionOptions) -> ConversionResult<HostString> {
    Ok(match value {
        HostValue::Undefined => "undefined".into(),
        HostValue::Null => "null".into(),
        HostValue::Boolean(b) => b.to_string().into(),
        HostValue::Number(n) => number_to_string(*n).into(),
        HostValue::BigInt(n) => n.to_string().into(),
        HostValue::String(s) => s.clone(),
        HostValue::Symbol(symbol) => {
            format!("Symbol({})", symbol.description().unwrap_or_default()).into()
        },
        HostValue::Object(_) => {
            let primitive = to_primitive(value, PreferredType::String, options)?;
            return string_value(&primitive, options);
        },
    })
}

/// Truthiness of a host value.
///
/// # Example
/// ```
/// use webidl_conversions::host::{coerce::to_boolean, value::HostValue};
///
/// assert!(!to_boolean(&HostValue::Number(f64::NAN)));
/// assert!(!to_boolean(&HostValue::from("")));
/// assert!(to_boolean(&HostValue::object()));
/// ```
#[must_use]
pub fn to_boolean(value: &HostValue) -> bool {
    match value {
        HostValue::Undefined | HostValue::Null => false,
        HostValue::Boolean(b) => *b,
        HostValue::Number(n) => !(*n == 0.0 || n.is_nan()),
        HostValue::BigInt(n) => !n.is_zero(),
        HostValue::String(s) => !s.is_empty(),
        HostValue::Symbol(_) | HostValue::Object(_) => true,
    }
}

/// Converts an arbitrary-precision integer to the nearest `f64`.
#[must_use]
pub fn bigint_to_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(f64::NAN)
}

/// Formats a number the way the host's `Number.prototype.toString` does.
///
/// Uses the shortest digit string that round-trips, in plain notation for
/// magnitudes in `[1e-7, 1e21)` and exponent notation otherwise. Both zeros
/// print as `"0"`.
///
/// # Example
/// ```
/// use webidl_conversions::host::coerce::number_to_string;
///
/// assert_eq!(number_to_string(255.0), "255");
/// assert_eq!(number_to_string(0.1), "0.1");
/// assert_eq!(number_to_string(1e21), "1e+21");
/// assert_eq!(number_to_string(1.5e-7), "1.5e-7");
/// assert_eq!(number_to_string(-0.0), "0");
/// assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
/// ```
#[must_use]
pub fn number_to_string(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x < 0.0 {
        return format!("-{}", number_to_string(-x));
    }

    let scientific = format!("{x:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits = mantissa.chars().filter(char::is_ascii_digit).collect::<String>();
    let k = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;
    let zeros = |count: i32| "0".repeat(usize::try_from(count).unwrap_or(0));

    if k <= n && n <= 21 {
        format!("{digits}{}", zeros(n - k))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(usize::try_from(n).unwrap_or(0));
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", zeros(-n))
    } else {
        let e = n - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", e.abs())
        }
    }
}

/// Whitespace and line terminators the host trims from numeric strings.
const fn is_host_whitespace(c: char) -> bool {
    matches!(c,
             '\u{0009}'
             | '\u{000A}'
             | '\u{000B}'
             | '\u{000C}'
             | '\u{000D}'
             | '\u{0020}'
             | '\u{00A0}'
             | '\u{1680}'
             | '\u{2000}'..='\u{200A}'
             | '\u{2028}'
             | '\u{2029}'
             | '\u{202F}'
             | '\u{205F}'
             | '\u{3000}'
             | '\u{FEFF}')
}

/// Parses a string with the host's numeric string grammar.
///
/// Surrounding whitespace is ignored and an empty string is zero. Accepts
/// `Infinity` with an optional sign, `0x`/`0o`/`0b` prefixed integers and
/// decimal literals; anything else is `NaN`.
///
/// # Example
/// ```
/// use webidl_conversions::host::{coerce::string_to_number, value::HostString};
///
/// assert_eq!(string_to_number(&HostString::from("  12.5e1\n")), 125.0);
/// assert_eq!(string_to_number(&HostString::from("")), 0.0);
/// assert_eq!(string_to_number(&HostString::from("0b101")), 5.0);
/// assert!(string_to_number(&HostString::from("12px")).is_nan());
/// assert!(string_to_number(&HostString::from("inf")).is_nan());
/// ```
#[must_use]
pub fn string_to_number(s: &HostString) -> f64 {
    let text = s.to_string_lossy();
    let trimmed = text.trim_matches(is_host_whitespace);

    match trimmed {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {},
    }

    if let Some(value) = parse_prefixed_integer(trimmed) {
        return value;
    }
    if is_decimal_literal(trimmed) {
        return trimmed.parse().unwrap_or(f64::NAN);
    }
    f64::NAN
}

/// Parses `0x`, `0o` and `0b` literals. Returns `None` if there is no prefix.
fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }
    Some(BigInt::from_str_radix(digits, radix).map_or(f64::NAN, |n| bigint_to_f64(&n)))
}

/// Checks `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_digits = count_digits(i);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = count_digits(i);
        i += frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_digits = count_digits(i);
        if exp_digits == 0 {
            return false;
        }
        i += exp_digits;
    }

    i == bytes.len()
}

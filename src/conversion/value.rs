use std::fmt;

use num_bigint::BigInt;

use crate::host::{
    buffer::{BufferRef, ViewRef},
    value::{HostString, HostValue, ObjectRef, number_literal, quote_units},
};

/// The canonical value produced by a converter.
///
/// Buffer and view results are the caller's own handles, never copies.
#[derive(Debug, Clone, PartialEq)]
pub enum IdlValue {
    /// `any`: the host value itself.
    Any(HostValue),
    /// `undefined`
    Undefined,
    /// `boolean`
    Boolean(bool),
    /// `byte` through `unsigned long`.
    Integer(i64),
    /// `long long` and `unsigned long long`.
    BigInt(BigInt),
    /// `double` and `unrestricted double`.
    Double(f64),
    /// `float` and `unrestricted float`.
    Float(f32),
    /// `DOMString` and `ByteString`.
    String(HostString),
    /// `USVString`: always valid Unicode.
    UsvString(String),
    /// `object` and callback functions.
    Object(ObjectRef),
    /// `ArrayBuffer`, and `BufferSource` given a bare buffer.
    Buffer(BufferRef),
    /// `DataView`, typed arrays, `ArrayBufferView`, and `BufferSource` given a
    /// view.
    View(ViewRef),
}

impl IdlValue {
    /// The integer, for the 8 to 32-bit integer types.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The arbitrary-precision integer, for the 64-bit types.
    #[must_use]
    pub const fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Self::BigInt(n) => Some(n),
            _ => None,
        }
    }

    /// The number, for `double` and `float` results.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(x) => Some(*x),
            Self::Float(x) => Some(f64::from(*x)),
            _ => None,
        }
    }

    /// The code units, for `DOMString` and `ByteString` results.
    #[must_use]
    pub const fn as_host_string(&self) -> Option<&HostString> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The text, for `USVString` results.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::UsvString(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for IdlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any(v) => write!(f, "{v}"),
            Self::Undefined => write!(f, "undefined"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::BigInt(n) => write!(f, "{n}n"),
            Self::Double(x) => write!(f, "{}", number_literal(*x)),
            Self::Float(x) => write!(f, "{}", number_literal(f64::from(*x))),
            Self::String(s) => write!(f, "{}", quote_units(s.units())),
            Self::UsvString(s) => {
                let units = s.encode_utf16().collect::<Vec<_>>();
                write!(f, "{}", quote_units(&units))
            },
            Self::Object(object) => write!(f, "{}", HostValue::Object(object.clone())),
            Self::Buffer(buffer) => write!(f, "{buffer}"),
            Self::View(view) => write!(f, "{view}"),
        }
    }
}

use std::{fmt, rc::Rc};

use num_bigint::BigInt;

use crate::host::{
    buffer::{BufferRef, ViewRef},
    coerce::number_to_string,
};

/// A host string: a sequence of UTF-16 code units.
///
/// Unlike a Rust `String`, a host string may contain unpaired surrogates.
/// Converting to Unicode scalar values is the job of the `USVString`
/// conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HostString(Vec<u16>);

impl HostString {
    /// Creates an empty string.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Wraps raw UTF-16 code units without validation.
    #[must_use]
    pub const fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    /// The code units of the string.
    #[must_use]
    pub fn units(&self) -> &[u16] {
        &self.0
    }

    /// Number of code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string has no code units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes the string, replacing unpaired surrogates with U+FFFD.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl From<&str> for HostString {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl From<String> for HostString {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl FromIterator<u16> for HostString {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for HostString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// Renders UTF-16 code units as a double-quoted literal.
///
/// Quotes, backslashes and control characters are escaped, and unpaired
/// surrogates are written as `\uXXXX` so the output is lossless.
///
/// # Example
/// ```
/// use webidl_conversions::host::value::quote_units;
///
/// assert_eq!(quote_units(&[0x61, 0xD800, 0x62]), r#""a\uD800b""#);
/// ```
#[must_use]
pub fn quote_units(units: &[u16]) -> String {
    let mut out = String::with_capacity(units.len() + 2);
    out.push('"');
    for unit in char::decode_utf16(units.iter().copied()) {
        match unit {
            Ok('"') => out.push_str("\\\""),
            Ok('\\') => out.push_str("\\\\"),
            Ok('\n') => out.push_str("\\n"),
            Ok('\t') => out.push_str("\\t"),
            Ok('\r') => out.push_str("\\r"),
            Ok(c) if c.is_control() => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            Ok(c) => out.push(c),
            Err(e) => out.push_str(&format!("\\u{:04X}", e.unpaired_surrogate())),
        }
    }
    out.push('"');
    out
}

#[derive(Debug)]
struct SymbolData {
    description: Option<String>,
}

/// A unique symbol. Two handles are equal only if they are the same symbol.
#[derive(Debug, Clone)]
pub struct SymbolRef(Rc<SymbolData>);

impl SymbolRef {
    /// Creates a fresh symbol.
    #[must_use]
    pub fn new(description: Option<String>) -> Self {
        Self(Rc::new(SymbolData { description }))
    }

    /// The description given at creation, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }
}

impl PartialEq for SymbolRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// The internal shape of a host object.
#[derive(Debug)]
pub enum ObjectKind {
    /// A plain object. `value_of` and `to_string` hold what its `valueOf` and
    /// `toString` methods return; `None` means the inherited behaviour
    /// (`valueOf` returns the object itself, `toString` yields
    /// `"[object Object]"`).
    Ordinary {
        /// Result of calling `valueOf`.
        value_of:  Option<HostValue>,
        /// Result of calling `toString`.
        to_string: Option<HostValue>,
    },
    /// A callable object.
    Function {
        /// The function's name, used by its default string form.
        name: String,
    },
    /// An `ArrayBuffer` or `SharedArrayBuffer`.
    Buffer(BufferRef),
    /// A typed array or `DataView`.
    View(ViewRef),
}

/// A reference to a host object. Equality is identity.
#[derive(Debug, Clone)]
pub struct ObjectRef(Rc<ObjectKind>);

impl ObjectRef {
    /// Allocates a new object of the given shape.
    #[must_use]
    pub fn new(kind: ObjectKind) -> Self {
        Self(Rc::new(kind))
    }

    /// The object's shape.
    #[must_use]
    pub fn kind(&self) -> &ObjectKind {
        &self.0
    }

    /// Whether the object can be invoked.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self.kind(), ObjectKind::Function { .. })
    }

    /// Whether both handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// The runtime type classification of a host value.
///
/// Buffers, views and functions are all `Object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `true` or `false`
    Boolean,
    /// A double-precision number.
    Number,
    /// A UTF-16 string.
    String,
    /// A unique symbol.
    Symbol,
    /// An arbitrary-precision integer.
    BigInt,
    /// Any object.
    Object,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undefined => "Undefined",
            Self::Null => "Null",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::String => "String",
            Self::Symbol => "Symbol",
            Self::BigInt => "BigInt",
            Self::Object => "Object",
        };
        f.write_str(name)
    }
}

/// A value handed to a converter by the dynamically-typed caller.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// A boolean.
    Boolean(bool),
    /// A double-precision number, including `NaN`, infinities and `-0`.
    Number(f64),
    /// An arbitrary-precision integer.
    BigInt(BigInt),
    /// A string of UTF-16 code units.
    String(HostString),
    /// A unique symbol.
    Symbol(SymbolRef),
    /// An object handle.
    Object(ObjectRef),
}

impl HostValue {
    /// Creates a plain object with inherited `valueOf` and `toString`.
    #[must_use]
    pub fn object() -> Self {
        Self::object_with(None, None)
    }

    /// Creates a plain object whose `valueOf` and `toString` return the given
    /// values.
    ///
    /// # Example
    /// ```
    /// use webidl_conversions::{ConversionOptions, host::{coerce::to_number, value::HostValue}};
    ///
    /// let obj = HostValue::object_with(Some(HostValue::Number(7.0)), None);
    /// assert_eq!(to_number(&obj, &ConversionOptions::default()).unwrap(), 7.0);
    /// ```
    #[must_use]
    pub fn object_with(value_of: Option<Self>, to_string: Option<Self>) -> Self {
        Self::Object(ObjectRef::new(ObjectKind::Ordinary { value_of, to_string }))
    }

    /// Creates a callable object.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self::Object(ObjectRef::new(ObjectKind::Function { name: name.into() }))
    }

    /// Creates a fresh symbol.
    #[must_use]
    pub fn symbol(description: Option<&str>) -> Self {
        Self::Symbol(SymbolRef::new(description.map(str::to_string)))
    }

    /// Classifies the value.
    ///
    /// # Example
    /// ```
    /// use webidl_conversions::host::value::{HostValue, Type};
    ///
    /// assert_eq!(HostValue::Null.type_of(), Type::Null);
    /// assert_eq!(HostValue::function("f").type_of(), Type::Object);
    /// ```
    #[must_use]
    pub const fn type_of(&self) -> Type {
        match self {
            Self::Undefined => Type::Undefined,
            Self::Null => Type::Null,
            Self::Boolean(_) => Type::Boolean,
            Self::Number(_) => Type::Number,
            Self::BigInt(_) => Type::BigInt,
            Self::String(_) => Type::String,
            Self::Symbol(_) => Type::Symbol,
            Self::Object(_) => Type::Object,
        }
    }

    /// Returns the object handle if the value is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Whether the value is a callable object.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        self.as_object().is_some_and(ObjectRef::is_callable)
    }
}

impl From<bool> for HostValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for HostValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<BigInt> for HostValue {
    fn from(v: BigInt) -> Self {
        Self::BigInt(v)
    }
}

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<HostString> for HostValue {
    fn from(v: HostString) -> Self {
        Self::String(v)
    }
}

impl From<ObjectRef> for HostValue {
    fn from(v: ObjectRef) -> Self {
        Self::Object(v)
    }
}

impl From<BufferRef> for HostValue {
    fn from(v: BufferRef) -> Self {
        Self::Object(ObjectRef::new(ObjectKind::Buffer(v)))
    }
}

impl From<ViewRef> for HostValue {
    fn from(v: ViewRef) -> Self {
        Self::Object(ObjectRef::new(ObjectKind::View(v)))
    }
}

/// Formats a number the way the literal notation writes it, keeping the sign
/// of negative zero visible.
pub(crate) fn number_literal(x: f64) -> String {
    if x == 0.0 && x.is_sign_negative() {
        "-0".to_string()
    } else {
        number_to_string(x)
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", number_literal(*n)),
            Self::BigInt(n) => write!(f, "{n}n"),
            Self::String(s) => write!(f, "{}", quote_units(s.units())),
            Self::Symbol(s) => match s.description() {
                Some(description) => {
                    let units = description.encode_utf16().collect::<Vec<_>>();
                    write!(f, "Symbol({})", quote_units(&units))
                },
                None => write!(f, "Symbol()"),
            },
            Self::Object(object) => match object.kind() {
                ObjectKind::Ordinary { value_of: None,
                                       to_string: None, } => write!(f, "{{}}"),
                ObjectKind::Ordinary { value_of, to_string } => {
                    let entries = [("valueOf", value_of), ("toString", to_string)];
                    let rendered = entries.iter()
                                          .filter_map(|(key, value)| {
                                              value.as_ref().map(|v| format!("{key}: {v}"))
                                          })
                                          .collect::<Vec<_>>();
                    write!(f, "{{ {} }}", rendered.join(", "))
                },
                ObjectKind::Function { name } => write!(f, "function {name}"),
                ObjectKind::Buffer(buffer) => write!(f, "{buffer}"),
                ObjectKind::View(view) => write!(f, "{view}"),
            },
        }
    }
}

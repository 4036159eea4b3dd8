use crate::{
    conversion::{
        buffer, float, integer::IntegerType, options::ConversionOptions, passthrough, string,
        value::IdlValue,
    },
    error::{ConversionResult, Error},
    host::{buffer::ElementKind, value::HostValue},
};

/// Signature shared by every converter in the table.
///
/// A converter receives the host value and the options and returns the
/// canonical value or a conversion error.
pub type Converter = fn(&HostValue, &ConversionOptions) -> ConversionResult<IdlValue>;

/// Defines the converter table and the list of type names.
///
/// Each entry maps a type name to a function with the [`Converter`]
/// signature. The macro produces:
/// - `ConverterDef` (internal metadata),
/// - `CONVERTER_TABLE` (static table for lookup),
/// - `TYPE_NAMES` (public list of type names).
macro_rules! converters {
    (
        $(
            $name:literal => $func:expr
        ),* $(,)?
    ) => {
        struct ConverterDef {
            name: &'static str,
            func: Converter,
        }
        static CONVERTER_TABLE: &[ConverterDef] = &[
            $(
                ConverterDef { name: $name, func: $func },
            )*
        ];
        /// Every type name the table can convert to, in table order.
        pub const TYPE_NAMES: &[&str] = &[
            $($name,)*
        ];
    };
}

converters! {
    "any"                 => |v, _| Ok(IdlValue::Any(passthrough::any(v))),
    "undefined"           => |v, _| {
        passthrough::undefined(v);
        Ok(IdlValue::Undefined)
    },
    "boolean"             => |v, _| Ok(IdlValue::Boolean(passthrough::boolean(v))),
    "byte"                => |v, o| IntegerType::BYTE.convert(v, o),
    "octet"               => |v, o| IntegerType::OCTET.convert(v, o),
    "short"               => |v, o| IntegerType::SHORT.convert(v, o),
    "unsigned short"      => |v, o| IntegerType::UNSIGNED_SHORT.convert(v, o),
    "long"                => |v, o| IntegerType::LONG.convert(v, o),
    "unsigned long"       => |v, o| IntegerType::UNSIGNED_LONG.convert(v, o),
    "long long"           => |v, o| IntegerType::LONG_LONG.convert(v, o),
    "unsigned long long"  => |v, o| IntegerType::UNSIGNED_LONG_LONG.convert(v, o),
    "float"               => |v, o| float::float(v, o).map(IdlValue::Float),
    "unrestricted float"  => |v, o| float::unrestricted_float(v, o).map(IdlValue::Float),
    "double"              => |v, o| float::double(v, o).map(IdlValue::Double),
    "unrestricted double" => |v, o| float::unrestricted_double(v, o).map(IdlValue::Double),
    "DOMString"           => |v, o| string::dom_string(v, o).map(IdlValue::String),
    "ByteString"          => |v, o| string::byte_string(v, o).map(IdlValue::String),
    "USVString"           => |v, o| string::usv_string(v, o).map(IdlValue::UsvString),
    "object"              => |v, o| passthrough::object(v, o).map(IdlValue::Object),
    "ArrayBuffer"         => |v, o| buffer::array_buffer(v, o).map(IdlValue::Buffer),
    "DataView"            => |v, o| buffer::data_view(v, o).map(IdlValue::View),
    "Int8Array"           => |v, o| buffer::typed_array(ElementKind::Int8, v, o).map(IdlValue::View),
    "Int16Array"          => |v, o| buffer::typed_array(ElementKind::Int16, v, o).map(IdlValue::View),
    "Int32Array"          => |v, o| buffer::typed_array(ElementKind::Int32, v, o).map(IdlValue::View),
    "BigInt64Array"       => |v, o| buffer::typed_array(ElementKind::BigInt64, v, o).map(IdlValue::View),
    "Uint8Array"          => |v, o| buffer::typed_array(ElementKind::Uint8, v, o).map(IdlValue::View),
    "Uint16Array"         => |v, o| buffer::typed_array(ElementKind::Uint16, v, o).map(IdlValue::View),
    "Uint32Array"         => |v, o| buffer::typed_array(ElementKind::Uint32, v, o).map(IdlValue::View),
    "BigUint64Array"      => |v, o| buffer::typed_array(ElementKind::BigUint64, v, o).map(IdlValue::View),
    "Uint8ClampedArray"   => |v, o| buffer::typed_array(ElementKind::Uint8Clamped, v, o).map(IdlValue::View),
    "Float32Array"        => |v, o| buffer::typed_array(ElementKind::Float32, v, o).map(IdlValue::View),
    "Float64Array"        => |v, o| buffer::typed_array(ElementKind::Float64, v, o).map(IdlValue::View),
    "ArrayBufferView"     => |v, o| buffer::array_buffer_view(v, o).map(IdlValue::View),
    "BufferSource"        => buffer::buffer_source,
    "Function"            => |v, o| passthrough::callback_function(v, o).map(IdlValue::Object),
    "VoidFunction"        => |v, o| passthrough::callback_function(v, o).map(IdlValue::Object),
    "DOMTimeStamp"        => |v, o| IntegerType::UNSIGNED_LONG_LONG.convert(v, o),
}

/// Finds the converter for a type name.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, conversion::registry::lookup};
///
/// let octet = lookup("octet").unwrap();
/// let out = octet(&256.into(), &ConversionOptions::default()).unwrap();
/// assert_eq!(out.as_integer(), Some(0));
/// assert!(lookup("sequence<long>").is_none());
/// ```
#[must_use]
pub fn lookup(type_name: &str) -> Option<Converter> {
    CONVERTER_TABLE.iter()
                   .find(|def| def.name == type_name)
                   .map(|def| def.func)
}

/// Converts `value` to the type named `type_name`.
///
/// # Errors
/// Returns `Error::UnknownType` for a name without a converter and
/// `Error::Conversion` when the converter rejects the value.
pub fn convert(type_name: &str,
               value: &HostValue,
               options: &ConversionOptions)
               -> Result<IdlValue, Error> {
    let converter = lookup(type_name).ok_or_else(|| Error::UnknownType(type_name.to_string()))?;

    tracing::trace!(type_name, value_type = %value.type_of(), "converting host value");

    converter(value, options).map_err(|error| {
                                  tracing::debug!(type_name, %error, "conversion rejected");
                                  Error::from(error)
                              })
}

/// The conversion configuration record.
///
/// Declares `ConversionOptions`, the read-only input every converter takes,
/// and how it is deserialized from JSON.
pub mod options;
/// Canonical values.
///
/// Defines `IdlValue`, the output of a converter looked up by name.
pub mod value;
/// The integer coercion engine.
///
/// One descriptor per (bit width, signedness) pair drives the wrap, clamp and
/// enforce-range policies, with an arbitrary-precision path for the 64-bit
/// types.
pub mod integer;
/// Floating-point conversions.
///
/// Restricted and unrestricted `double` and `float`.
pub mod float;
/// String conversions.
///
/// `DOMString`, `ByteString` and `USVString`.
pub mod string;
/// Buffer source conversions.
///
/// `ArrayBuffer`, `DataView`, the typed arrays, `ArrayBufferView` and
/// `BufferSource`.
pub mod buffer;
/// Pass-through conversions.
///
/// `any`, `undefined`, `boolean`, `object` and callback functions.
pub mod passthrough;
/// The converter table.
///
/// Maps every supported type name to its converter.
pub mod registry;

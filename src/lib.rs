//! # webidl-conversions
//!
//! webidl-conversions converts dynamically-typed host values into the
//! canonical values of the Web IDL types: booleans, the eight integer types,
//! `double` and `float`, the three string types, objects, callbacks, buffers
//! and typed views. Every converter either yields its canonical value or
//! rejects the input with a `TypeError`-style message.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Implements the Web IDL conversion algorithms.
///
/// This module holds one converter per supported IDL type, the options
/// record they share, the canonical output value, and the name-based
/// registry that dispatches to them.
///
/// # Responsibilities
/// - Coerces numbers with the wrap, clamp and enforce-range policies.
/// - Validates strings, objects, callbacks, buffers and views.
/// - Maps IDL type names to converters.
pub mod conversion;
/// Provides unified error types for conversion and literal parsing.
///
/// This module defines the `TypeError`-style conversion error, the literal
/// notation parse errors, and the crate-level error returned by the
/// name-based entry points.
///
/// # Responsibilities
/// - Formats context-prefixed conversion messages.
/// - Routes error construction through an alternate realm when configured.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Models the values of the dynamically-typed host.
///
/// This module declares the host value enum, UTF-16 strings, symbols,
/// objects, buffers and views, together with the host's own coercions and
/// the realm capability.
///
/// # Responsibilities
/// - Represents every value a converter can receive.
/// - Implements `ToPrimitive`, `ToNumber`, `ToString` and `ToBoolean`.
/// - Classifies values by buffer shape.
pub mod host;
/// Reads host values from a compact textual notation.
///
/// The notation mirrors the host's source syntax closely enough to write
/// test fixtures and command-line arguments: `-0`, `12n`, `"\uD800"`,
/// `Symbol("s")`, `{ valueOf: 3 }`, `function f`, `Uint8Array(4)`,
/// `detached ArrayBuffer(8)` and so on.
///
/// # Responsibilities
/// - Tokenizes literal text with source offsets.
/// - Builds fresh host values, allocating and detaching buffers as written.
pub mod literal;
/// General numeric utilities.
///
/// This module provides the rounding, truncation and modulo helpers used by
/// the numeric converters, and safe conversions between `f64` and the
/// integer types.
///
/// # Responsibilities
/// - Implements round-half-to-even and sign-correct modulo.
/// - Safely convert between `f64`, `i64` and `usize` without silent data loss.
pub mod util;

pub use conversion::{
    options::ConversionOptions,
    registry::{TYPE_NAMES, convert, lookup},
    value::IdlValue,
};
pub use error::{Error, TypeConversionError};
pub use host::value::HostValue;

/// Parses a host value literal and converts it to the named IDL type.
///
/// This is the entry point used by the command-line front end and the
/// conformance fixtures. The literal is parsed into a fresh host value, then
/// handed to the converter registered under `type_name`.
///
/// # Errors
/// Returns `Error::UnknownType` if no converter is registered for
/// `type_name`, `Error::Parse` if the literal is malformed, and
/// `Error::Conversion` if the converter rejects the value.
///
/// # Examples
/// ```
/// use webidl_conversions::{ConversionOptions, convert_literal};
///
/// let options = ConversionOptions::default();
///
/// let value = convert_literal("octet", "-1", &options).unwrap();
/// assert_eq!(value.to_string(), "255");
///
/// let error = convert_literal("long", "Infinity", &options.with_enforce_range()).unwrap_err();
/// assert_eq!(error.to_string(), "Value is not a finite number.");
/// ```
pub fn convert_literal(type_name: &str,
                       literal: &str,
                       options: &ConversionOptions)
                       -> Result<IdlValue, Error> {
    if lookup(type_name).is_none() {
        return Err(Error::UnknownType(type_name.to_string()));
    }

    let value = literal::parser::parse_literal(literal)?;
    convert(type_name, &value, options)
}

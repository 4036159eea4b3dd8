use thiserror::Error;

/// Conversion errors.
///
/// Defines the single error kind raised by every converter, together with the
/// helper that formats its context-prefixed message and routes construction
/// through an alternate realm when one is configured.
pub mod conversion_error;
/// Literal notation errors.
///
/// Contains the errors raised while lexing or parsing the textual host value
/// notation used by the command-line front end and the conformance fixtures.
pub mod parse_error;

pub use conversion_error::{TypeConversionError, make_exception};
pub use parse_error::ParseError;

/// Result type returned by every converter.
pub type ConversionResult<T> = Result<T, TypeConversionError>;

/// Errors raised by the name-based entry points of the crate.
///
/// Individual converters only ever fail with [`TypeConversionError`]; looking
/// a converter up by name or parsing a literal adds the other two cases.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested type name has no converter.
    #[error("Unknown IDL type '{0}'.")]
    UnknownType(String),
    /// The converter rejected the value.
    #[error(transparent)]
    Conversion(#[from] TypeConversionError),
    /// The host value literal could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

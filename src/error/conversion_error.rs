use thiserror::Error;

use crate::conversion::options::ConversionOptions;

/// The error raised when a host value cannot be converted to an IDL type.
///
/// The message is complete and stable, e.g. `"Value is not a finite number."`.
/// When the error was produced by an alternate realm, [`realm`](Self::realm)
/// names that realm so callers can tell errors from different globals apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TypeConversionError {
    message: String,
    realm:   Option<String>,
}

impl TypeConversionError {
    /// Creates an error belonging to the ambient realm.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(),
               realm:   None, }
    }

    /// Creates an error that was instantiated by the realm named `realm`.
    #[must_use]
    pub fn in_realm(message: impl Into<String>, realm: impl Into<String>) -> Self {
        Self { message: message.into(),
               realm:   Some(realm.into()), }
    }

    /// The full error message, including the context prefix and final period.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The name of the realm that constructed the error, if it was not the
    /// ambient one.
    #[must_use]
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }
}

/// Builds the error for a failed conversion.
///
/// The message is `"<context> <detail>."`, where the context comes from the
/// options and defaults to `"Value"`. If the options carry an alternate realm,
/// that realm's error factory constructs the error.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, error::make_exception};
///
/// let err = make_exception("is not an object", &ConversionOptions::default());
/// assert_eq!(err.message(), "Value is not an object.");
///
/// let opts = ConversionOptions::default().with_context("Argument 1");
/// let err = make_exception("is not an object", &opts);
/// assert_eq!(err.to_string(), "Argument 1 is not an object.");
/// ```
#[must_use]
pub fn make_exception(detail: &str, options: &ConversionOptions) -> TypeConversionError {
    let message = format!("{} {detail}.", options.context());
    match options.realm() {
        Some(realm) => realm.type_error(message),
        None => TypeConversionError::new(message),
    }
}

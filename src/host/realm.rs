use std::fmt;

use crate::{
    conversion::options::ConversionOptions,
    error::{ConversionResult, TypeConversionError},
    host::{
        coerce::{number_value, string_value},
        value::{HostString, HostValue},
    },
};

/// Number, string and error factories of a global environment other than
/// the ambient one.
///
/// Every method has a default that behaves like the ambient environment, so
/// an implementation only overrides what differs. Errors built by
/// [`type_error`](Self::type_error) are tagged with [`name`](Self::name) by
/// default, letting callers check which realm an error came from.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use webidl_conversions::{
///     ConversionOptions, convert,
///     host::{realm::Realm, value::HostValue},
/// };
///
/// #[derive(Debug)]
/// struct Frame;
///
/// impl Realm for Frame {
///     fn name(&self) -> &str {
///         "frame"
///     }
/// }
///
/// let opts = ConversionOptions::default().with_realm(Rc::new(Frame));
/// let err = convert("object", &HostValue::Null, &opts).unwrap_err();
/// let webidl_conversions::Error::Conversion(err) = err else { unreachable!() };
/// assert_eq!(err.realm(), Some("frame"));
/// ```
pub trait Realm: fmt::Debug {
    /// A name identifying the realm.
    fn name(&self) -> &str;

    /// The realm's number conversion (its `Number` constructor called as a
    /// function).
    ///
    /// # Errors
    /// Fails when the value has no numeric form.
    fn to_number(&self, value: &HostValue, options: &ConversionOptions) -> ConversionResult<f64> {
        number_value(value, options)
    }

    /// The realm's string conversion (its `String` constructor called as a
    /// function).
    ///
    /// # Errors
    /// Fails when the value has no string form.
    fn to_string(&self,
                 value: &HostValue,
                 options: &ConversionOptions)
                 -> ConversionResult<HostString> {
        string_value(value, options)
    }

    /// Instantiates the realm's type error with a complete message.
    fn type_error(&self, message: String) -> TypeConversionError {
        TypeConversionError::in_realm(message, self.name())
    }
}

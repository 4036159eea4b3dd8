use crate::{
    conversion::options::ConversionOptions,
    error::{ConversionResult, make_exception},
    host::{
        coerce::to_boolean,
        value::{HostValue, ObjectRef, Type},
    },
};

/// Converts to `any`: the value itself.
#[must_use]
pub fn any(value: &HostValue) -> HostValue {
    value.clone()
}

/// Converts to `undefined`, ignoring the value.
pub const fn undefined(_value: &HostValue) {}

/// Converts to `boolean` by truthiness.
#[must_use]
pub fn boolean(value: &HostValue) -> bool {
    to_boolean(value)
}

/// Converts to `object`.
///
/// # Errors
/// Fails unless the value's type is `Object`.
///
/// # Example
/// ```
/// use webidl_conversions::{ConversionOptions, conversion::passthrough::object, host::value::HostValue};
///
/// let opts = ConversionOptions::default();
/// assert!(object(&HostValue::function("f"), &opts).is_ok());
/// assert_eq!(object(&"{}".into(), &opts).unwrap_err().message(), "Value is not an object.");
/// ```
pub fn object(value: &HostValue, options: &ConversionOptions) -> ConversionResult<ObjectRef> {
    match (value.type_of(), value.as_object()) {
        (Type::Object, Some(object)) => Ok(object.clone()),
        _ => Err(make_exception("is not an object", options)),
    }
}

/// Converts to a callback function type.
///
/// # Errors
/// Fails unless the value is callable.
pub fn callback_function(value: &HostValue,
                         options: &ConversionOptions)
                         -> ConversionResult<ObjectRef> {
    match value {
        HostValue::Object(object) if object.is_callable() => Ok(object.clone()),
        _ => Err(make_exception("is not a function", options)),
    }
}

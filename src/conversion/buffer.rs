use crate::{
    conversion::{options::ConversionOptions, value::IdlValue},
    error::{ConversionResult, make_exception},
    host::{
        buffer::{BufferClass, BufferRef, ElementKind, ViewKind, ViewRef, classify},
        value::HostValue,
    },
};

/// Error details for a view whose backing buffer is rejected.
struct BackingMessages {
    shared:   &'static str,
    detached: &'static str,
}

const VIEW_BACKING: BackingMessages =
    BackingMessages { shared:   "is a view on a SharedArrayBuffer, which is not allowed",
                      detached: "is a view on a detached ArrayBuffer", };

const DATA_VIEW_BACKING: BackingMessages =
    BackingMessages { shared:   "is backed by a SharedArrayBuffer, which is not allowed",
                      detached: "is backed by a detached ArrayBuffer", };

/// Applies the shared and detached checks to a view's backing buffer.
fn check_backing(view: &ViewRef,
                 messages: &BackingMessages,
                 options: &ConversionOptions)
                 -> ConversionResult<ViewRef> {
    let buffer = view.buffer();
    if !options.allow_shared && buffer.is_shared() {
        return Err(make_exception(messages.shared, options));
    }
    if buffer.is_detached() {
        return Err(make_exception(messages.detached, options));
    }
    Ok(view.clone())
}

/// Converts to `ArrayBuffer`.
///
/// Accepts a non-shared buffer, or with `allow_shared` a shared one too. The
/// returned handle is the caller's buffer.
///
/// # Errors
/// Fails for anything else and for detached buffers.
///
/// # Example
/// ```
/// use webidl_conversions::{
///     ConversionOptions,
///     conversion::buffer::array_buffer,
///     host::{buffer::BufferRef, value::HostValue},
/// };
///
/// let shared = HostValue::from(BufferRef::new_shared(8));
/// let err = array_buffer(&shared, &ConversionOptions::default()).unwrap_err();
/// assert_eq!(err.message(), "Value is not an ArrayBuffer.");
/// assert!(array_buffer(&shared, &ConversionOptions::default().with_allow_shared()).is_ok());
/// ```
pub fn array_buffer(value: &HostValue, options: &ConversionOptions) -> ConversionResult<BufferRef> {
    let buffer = match classify(value) {
        BufferClass::NonShared(buffer) => buffer,
        BufferClass::Shared(buffer) if options.allow_shared => buffer,
        _ if options.allow_shared => {
            return Err(make_exception("is not an ArrayBuffer or SharedArrayBuffer", options));
        },
        _ => return Err(make_exception("is not an ArrayBuffer", options)),
    };
    if buffer.is_detached() {
        return Err(make_exception("is a detached ArrayBuffer", options));
    }
    Ok(buffer.clone())
}

/// Converts to `DataView`.
///
/// # Errors
/// Fails unless the value is a `DataView` over an admissible, attached
/// buffer.
pub fn data_view(value: &HostValue, options: &ConversionOptions) -> ConversionResult<ViewRef> {
    match classify(value) {
        BufferClass::View(view) if view.kind() == ViewKind::DataView => {
            check_backing(view, &DATA_VIEW_BACKING, options)
        },
        _ => Err(make_exception("is not a DataView", options)),
    }
}

/// Converts to the typed array with element kind `kind`.
///
/// The view's runtime tag must match exactly; a view of another element kind
/// is rejected like any other value.
///
/// # Errors
/// Fails for other values and for views over a disallowed or detached
/// buffer.
///
/// # Example
/// ```
/// use webidl_conversions::{
///     ConversionOptions,
///     conversion::buffer::typed_array,
///     host::{buffer::{ElementKind, ViewRef}, value::HostValue},
/// };
///
/// let bytes = HostValue::from(ViewRef::typed_with_length(ElementKind::Uint8, 4));
/// let opts = ConversionOptions::default();
///
/// assert!(typed_array(ElementKind::Uint8, &bytes, &opts).is_ok());
/// let err = typed_array(ElementKind::Int8, &bytes, &opts).unwrap_err();
/// assert_eq!(err.message(), "Value is not an Int8Array object.");
/// ```
pub fn typed_array(kind: ElementKind,
                   value: &HostValue,
                   options: &ConversionOptions)
                   -> ConversionResult<ViewRef> {
    match classify(value) {
        BufferClass::View(view) if view.element_kind() == Some(kind) => {
            check_backing(view, &VIEW_BACKING, options)
        },
        _ => Err(make_exception(&format!("is not {} {} object", kind.article(), kind.name()),
                                options)),
    }
}

/// Converts to `ArrayBufferView`: any typed array or `DataView`.
///
/// # Errors
/// Fails for non-views and for views over a disallowed or detached buffer.
pub fn array_buffer_view(value: &HostValue,
                         options: &ConversionOptions)
                         -> ConversionResult<ViewRef> {
    match classify(value) {
        BufferClass::View(view) => check_backing(view, &VIEW_BACKING, options),
        _ => Err(make_exception("is not a view on an ArrayBuffer or SharedArrayBuffer", options)),
    }
}

/// Converts to `BufferSource`: a view, or a bare buffer.
///
/// Views get the same backing checks as [`array_buffer_view`]; buffers must
/// be non-shared unless `allow_shared` is set, and attached.
///
/// # Errors
/// Fails for values of neither shape and for rejected buffers.
///
/// # Example
/// ```
/// use webidl_conversions::{
///     ConversionOptions,
///     conversion::{buffer::buffer_source, value::IdlValue},
///     host::{buffer::BufferRef, value::HostValue},
/// };
///
/// let buffer = BufferRef::new(4);
/// let out = buffer_source(&buffer.clone().into(), &ConversionOptions::default()).unwrap();
/// assert!(matches!(out, IdlValue::Buffer(b) if b.ptr_eq(&buffer)));
/// ```
pub fn buffer_source(value: &HostValue, options: &ConversionOptions) -> ConversionResult<IdlValue> {
    let buffer = match classify(value) {
        BufferClass::View(view) => {
            return check_backing(view, &VIEW_BACKING, options).map(IdlValue::View);
        },
        BufferClass::NonShared(buffer) => buffer,
        BufferClass::Shared(buffer) if options.allow_shared => buffer,
        _ if options.allow_shared => {
            return Err(make_exception("is not an ArrayBuffer, SharedArrayBuffer, or a view on one",
                                      options));
        },
        _ => return Err(make_exception("is not an ArrayBuffer or a view on one", options)),
    };
    if buffer.is_detached() {
        return Err(make_exception("is a detached ArrayBuffer", options));
    }
    Ok(IdlValue::Buffer(buffer.clone()))
}

/// The host value model.
///
/// Declares the values a dynamically-typed caller can hand to a converter:
/// primitives, arbitrary-precision integers, UTF-16 strings, symbols and
/// objects. The [`Type`](value::Type) enum is the closed classification every
/// converter dispatches on.
///
/// # Responsibilities
/// - Defines `HostValue`, `HostString` and the object handles.
/// - Provides literal-style `Display` output for diagnostics and fixtures.
pub mod value;
/// Buffers, typed views and their classification.
///
/// Models `ArrayBuffer`, `SharedArrayBuffer`, typed arrays and `DataView`
/// as reference-counted handles, so a validated value is returned as the same
/// reference rather than a copy. Buffers can be detached; shared buffers
/// cannot.
///
/// # Responsibilities
/// - Tracks shared-ness and detached state per buffer.
/// - Identifies views by their exact element kind.
/// - Classifies any host value into a [`BufferClass`](buffer::BufferClass).
pub mod buffer;
/// Generic host coercions.
///
/// Implements the host's own `ToNumber`, `ToString`, `ToBoolean` and
/// `ToPrimitive` operations that the IDL converters build on, including the
/// host's number formatting and string-to-number grammar.
pub mod coerce;
/// The alternate realm capability.
///
/// A realm supplies the number, string and error factories for code that runs
/// against a different global environment. Converters receive it through
/// their options instead of reaching for any global state.
pub mod realm;

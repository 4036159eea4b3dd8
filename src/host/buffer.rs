use std::{cell::RefCell, fmt, rc::Rc};

use num_bigint::BigInt;

use crate::host::value::{HostValue, ObjectKind};

#[derive(Debug)]
struct BufferData {
    shared: bool,
    bytes:  RefCell<Option<Vec<u8>>>,
}

/// A handle to an `ArrayBuffer` or `SharedArrayBuffer`.
///
/// Cloning the handle shares the underlying memory; equality is identity.
/// Detaching takes the memory away from every handle at once.
#[derive(Debug, Clone)]
pub struct BufferRef(Rc<BufferData>);

impl BufferRef {
    /// Allocates a zero-filled, non-shared buffer.
    #[must_use]
    pub fn new(byte_length: usize) -> Self {
        Self::from_bytes(vec![0; byte_length])
    }

    /// Allocates a zero-filled shared buffer.
    #[must_use]
    pub fn new_shared(byte_length: usize) -> Self {
        Self(Rc::new(BufferData { shared: true,
                                  bytes:  RefCell::new(Some(vec![0; byte_length])), }))
    }

    /// Wraps existing bytes in a non-shared buffer.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Rc::new(BufferData { shared: false,
                                  bytes:  RefCell::new(Some(bytes)), }))
    }

    /// Whether this is a `SharedArrayBuffer`.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.0.shared
    }

    /// Whether the buffer's memory has been detached.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.0.bytes.borrow().is_none()
    }

    /// Current byte length; zero once detached.
    #[must_use]
    pub fn byte_length(&self) -> usize {
        self.0.bytes.borrow().as_ref().map_or(0, Vec::len)
    }

    /// Detaches the buffer and returns its former contents.
    ///
    /// Returns `None` for shared buffers, which cannot be detached, and for
    /// buffers that are already detached.
    ///
    /// # Example
    /// ```
    /// use webidl_conversions::host::buffer::BufferRef;
    ///
    /// let buffer = BufferRef::from_bytes(vec![1, 2, 3]);
    /// let alias = buffer.clone();
    ///
    /// assert_eq!(buffer.detach(), Some(vec![1, 2, 3]));
    /// assert!(alias.is_detached());
    /// assert_eq!(alias.byte_length(), 0);
    /// assert!(BufferRef::new_shared(4).detach().is_none());
    /// ```
    pub fn detach(&self) -> Option<Vec<u8>> {
        if self.0.shared {
            return None;
        }
        self.0.bytes.borrow_mut().take()
    }

    /// Copies `length` bytes starting at `offset`.
    ///
    /// Returns `None` if the buffer is detached or the range is out of bounds.
    #[must_use]
    pub fn read(&self, offset: usize, length: usize) -> Option<Vec<u8>> {
        let bytes = self.0.bytes.borrow();
        let end = offset.checked_add(length)?;
        bytes.as_ref()?.get(offset..end).map(<[u8]>::to_vec)
    }

    /// Overwrites bytes starting at `offset`.
    ///
    /// Returns `false` without writing if the buffer is detached or the data
    /// does not fit.
    pub fn write(&self, offset: usize, data: &[u8]) -> bool {
        let mut bytes = self.0.bytes.borrow_mut();
        let Some(end) = offset.checked_add(data.len()) else {
            return false;
        };
        match bytes.as_mut().and_then(|b| b.get_mut(offset..end)) {
            Some(target) => {
                target.copy_from_slice(data);
                true
            },
            None => false,
        }
    }

    /// Whether both handles refer to the same buffer.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for BufferRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Display for BufferRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.is_shared() { "SharedArrayBuffer" } else { "ArrayBuffer" };
        if self.is_detached() {
            write!(f, "detached {name}(0)")
        } else {
            write!(f, "{name}({})", self.byte_length())
        }
    }
}

/// The element type of a typed array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `Int8Array`
    Int8,
    /// `Int16Array`
    Int16,
    /// `Int32Array`
    Int32,
    /// `BigInt64Array`
    BigInt64,
    /// `Uint8Array`
    Uint8,
    /// `Uint16Array`
    Uint16,
    /// `Uint32Array`
    Uint32,
    /// `BigUint64Array`
    BigUint64,
    /// `Uint8ClampedArray`
    Uint8Clamped,
    /// `Float32Array`
    Float32,
    /// `Float64Array`
    Float64,
}

impl ElementKind {
    /// Every element kind, in registry order.
    pub const ALL: [Self; 11] = [Self::Int8,
                                 Self::Int16,
                                 Self::Int32,
                                 Self::BigInt64,
                                 Self::Uint8,
                                 Self::Uint16,
                                 Self::Uint32,
                                 Self::BigUint64,
                                 Self::Uint8Clamped,
                                 Self::Float32,
                                 Self::Float64];

    /// The constructor name, which is also the view's runtime tag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "Int8Array",
            Self::Int16 => "Int16Array",
            Self::Int32 => "Int32Array",
            Self::BigInt64 => "BigInt64Array",
            Self::Uint8 => "Uint8Array",
            Self::Uint16 => "Uint16Array",
            Self::Uint32 => "Uint32Array",
            Self::BigUint64 => "BigUint64Array",
            Self::Uint8Clamped => "Uint8ClampedArray",
            Self::Float32 => "Float32Array",
            Self::Float64 => "Float64Array",
        }
    }

    /// Looks an element kind up by constructor name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Size of one element in bytes.
    #[must_use]
    pub const fn element_size(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 | Self::Uint8Clamped => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::BigInt64 | Self::BigUint64 | Self::Float64 => 8,
        }
    }

    /// The indefinite article for the constructor name.
    ///
    /// # Example
    /// ```
    /// use webidl_conversions::host::buffer::ElementKind;
    ///
    /// assert_eq!(ElementKind::Int8.article(), "an");
    /// assert_eq!(ElementKind::Uint8.article(), "a");
    /// ```
    #[must_use]
    pub fn article(self) -> &'static str {
        if self.name().starts_with(['A', 'E', 'I', 'O', 'U']) { "an" } else { "a" }
    }

    fn decode(self, chunk: &[u8]) -> HostValue {
        let mut raw = [0u8; 8];
        raw[..chunk.len()].copy_from_slice(chunk);
        let [b0, b1, b2, b3, ..] = raw;
        match self {
            Self::Int8 => HostValue::Number(f64::from(i8::from_le_bytes([b0]))),
            Self::Uint8 | Self::Uint8Clamped => HostValue::Number(f64::from(b0)),
            Self::Int16 => HostValue::Number(f64::from(i16::from_le_bytes([b0, b1]))),
            Self::Uint16 => HostValue::Number(f64::from(u16::from_le_bytes([b0, b1]))),
            Self::Int32 => HostValue::Number(f64::from(i32::from_le_bytes([b0, b1, b2, b3]))),
            Self::Uint32 => HostValue::Number(f64::from(u32::from_le_bytes([b0, b1, b2, b3]))),
            Self::Float32 => HostValue::Number(f64::from(f32::from_le_bytes([b0, b1, b2, b3]))),
            Self::Float64 => HostValue::Number(f64::from_le_bytes(raw)),
            Self::BigInt64 => HostValue::BigInt(BigInt::from(i64::from_le_bytes(raw))),
            Self::BigUint64 => HostValue::BigInt(BigInt::from(u64::from_le_bytes(raw))),
        }
    }
}

/// What kind of view a [`ViewRef`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// A typed array with the given element kind.
    Typed(ElementKind),
    /// A `DataView`.
    DataView,
}

#[derive(Debug)]
struct ViewData {
    kind:        ViewKind,
    buffer:      BufferRef,
    byte_offset: usize,
    byte_length: usize,
}

/// A handle to a typed array or `DataView` over a buffer.
///
/// Equality is identity.
#[derive(Debug, Clone)]
pub struct ViewRef(Rc<ViewData>);

impl ViewRef {
    /// Creates a typed array spanning the whole of `buffer`.
    ///
    /// Returns `None` if the buffer is detached or its length is not a
    /// multiple of the element size.
    #[must_use]
    pub fn typed(kind: ElementKind, buffer: BufferRef) -> Option<Self> {
        let byte_length = buffer.byte_length();
        if buffer.is_detached() || byte_length % kind.element_size() != 0 {
            return None;
        }
        Some(Self(Rc::new(ViewData { kind: ViewKind::Typed(kind),
                                     buffer,
                                     byte_offset: 0,
                                     byte_length })))
    }

    /// Creates a typed array of `length` elements over a fresh buffer.
    ///
    /// # Panics
    /// If `length` elements of `kind` do not fit in `usize` bytes.
    #[must_use]
    pub fn typed_with_length(kind: ElementKind, length: usize) -> Self {
        let byte_length = length.checked_mul(kind.element_size())
                                .unwrap_or_else(|| panic!("{length} {kind:?} elements overflow usize"));
        Self(Rc::new(ViewData { kind: ViewKind::Typed(kind),
                                buffer: BufferRef::new(byte_length),
                                byte_offset: 0,
                                byte_length }))
    }

    /// Creates a `DataView` spanning the whole of `buffer`.
    ///
    /// Returns `None` if the buffer is detached.
    #[must_use]
    pub fn data_view(buffer: BufferRef) -> Option<Self> {
        if buffer.is_detached() {
            return None;
        }
        Some(Self::over(buffer))
    }

    /// Creates a `DataView` over a buffer the caller has just allocated.
    #[must_use]
    pub(crate) fn over(buffer: BufferRef) -> Self {
        let byte_length = buffer.byte_length();
        Self(Rc::new(ViewData { kind: ViewKind::DataView,
                                buffer,
                                byte_offset: 0,
                                byte_length }))
    }

    /// The view's runtime kind.
    #[must_use]
    pub fn kind(&self) -> ViewKind {
        self.0.kind
    }

    /// The element kind, or `None` for a `DataView`.
    #[must_use]
    pub fn element_kind(&self) -> Option<ElementKind> {
        match self.0.kind {
            ViewKind::Typed(kind) => Some(kind),
            ViewKind::DataView => None,
        }
    }

    /// The backing buffer.
    #[must_use]
    pub fn buffer(&self) -> &BufferRef {
        &self.0.buffer
    }

    /// Byte length of the view; zero once the buffer is detached.
    #[must_use]
    pub fn byte_length(&self) -> usize {
        if self.0.buffer.is_detached() { 0 } else { self.0.byte_length }
    }

    /// Number of elements (bytes for a `DataView`).
    #[must_use]
    pub fn length(&self) -> usize {
        match self.0.kind {
            ViewKind::Typed(kind) => self.byte_length() / kind.element_size(),
            ViewKind::DataView => self.byte_length(),
        }
    }

    /// Reads every element as a host value.
    ///
    /// Elements are decoded little-endian. A `DataView` or a detached view
    /// yields nothing.
    #[must_use]
    pub fn elements(&self) -> Vec<HostValue> {
        let Some(kind) = self.element_kind() else {
            return Vec::new();
        };
        self.0
            .buffer
            .read(self.0.byte_offset, self.byte_length())
            .map(|bytes| {
                bytes.chunks_exact(kind.element_size())
                     .map(|chunk| kind.decode(chunk))
                     .collect()
            })
            .unwrap_or_default()
    }

    /// Whether both handles refer to the same view.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ViewRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.0.buffer.is_detached() { "detached " } else { "" };
        match self.0.kind {
            ViewKind::Typed(kind) => write!(f, "{prefix}{}({})", kind.name(), self.length()),
            ViewKind::DataView => write!(f, "{prefix}DataView({})", self.0.buffer),
        }
    }
}

/// The buffer-related shape of a host value, observed at the time of the
/// call.
#[derive(Debug, Clone, Copy)]
pub enum BufferClass<'a> {
    /// An `ArrayBuffer`.
    NonShared(&'a BufferRef),
    /// A `SharedArrayBuffer`.
    Shared(&'a BufferRef),
    /// A typed array or `DataView`.
    View(&'a ViewRef),
    /// Anything else.
    Neither,
}

/// Classifies a host value by inspecting its object shape.
///
/// Nothing is cached: shared-ness and detached state are read from the value
/// on every call.
///
/// # Example
/// ```
/// use webidl_conversions::host::{
///     buffer::{BufferClass, BufferRef, classify},
///     value::HostValue,
/// };
///
/// let shared = HostValue::from(BufferRef::new_shared(8));
/// assert!(matches!(classify(&shared), BufferClass::Shared(_)));
/// assert!(matches!(classify(&HostValue::Number(1.0)), BufferClass::Neither));
/// ```
#[must_use]
pub fn classify(value: &HostValue) -> BufferClass<'_> {
    let Some(object) = value.as_object() else {
        return BufferClass::Neither;
    };
    match object.kind() {
        ObjectKind::Buffer(buffer) if buffer.is_shared() => BufferClass::Shared(buffer),
        ObjectKind::Buffer(buffer) => BufferClass::NonShared(buffer),
        ObjectKind::View(view) => BufferClass::View(view),
        ObjectKind::Ordinary { .. } | ObjectKind::Function { .. } => BufferClass::Neither,
    }
}

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use super::buffer::ArrayBuffer;
use super::kind::ElementKind;
use crate::{Error, Value};

struct ViewData {
    kind: ElementKind,
    buffer: ArrayBuffer,
    byte_offset: usize,
    length: usize,
}

/// A kind-tagged, length-bounded view over an [`ArrayBuffer`].
///
/// `length` is fixed when the view is created. The view does not track
/// later changes to its buffer: if the buffer is detached or shrunk, reads
/// and writes at indices it no longer backs fail with [`Error::Bounds`]
/// instead of being clamped.
///
/// `TypedArray` is a cheap handle; clones refer to the same view.
///
/// # Example
///
/// ```
/// use ferrule_core::typed_array::{ElementKind, TypedArray};
/// use ferrule_core::Value;
///
/// let view = TypedArray::from_values(
///     ElementKind::Uint8,
///     [Value::from(2), Value::from(300)],
/// ).unwrap();
/// assert_eq!(view.len(), 2);
/// assert_eq!(view.get(1).unwrap(), Value::from(44));
/// ```
#[derive(Clone)]
pub struct TypedArray {
    data: Rc<ViewData>,
}

impl TypedArray {
    /// A zero-filled view owning a fresh buffer.
    ///
    /// Fails with [`Error::Bounds`] when `length` elements cannot be
    /// addressed in a single buffer.
    pub fn with_length(kind: ElementKind, length: usize) -> Result<Self, Error> {
        match length.checked_mul(kind.byte_width()) {
            Some(byte_length) if byte_length <= isize::MAX as usize => Ok(Self::new_unchecked(
                kind,
                ArrayBuffer::new(byte_length),
                0,
                length,
            )),
            _ => Err(Error::Bounds { index: 0, length }),
        }
    }

    /// Build a view owning a fresh buffer, coercing each source element to
    /// `kind`.
    ///
    /// Fails with [`Error::TypeMismatch`] on the first element that cannot
    /// be stored, e.g. a big integer offered to a numeric kind.
    pub fn from_values<I>(kind: ElementKind, values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        let width = kind.byte_width();
        let mut bytes = Vec::new();
        for value in values {
            let raw = kind.coerce(&value)?;
            bytes.extend_from_slice(&raw.0.to_le_bytes()[..width]);
        }
        let length = bytes.len() / width;
        Ok(Self::new_unchecked(
            kind,
            ArrayBuffer::from_bytes(bytes),
            0,
            length,
        ))
    }

    /// A view borrowing `length` elements of an existing buffer, starting
    /// at `byte_offset`.
    pub fn from_buffer(
        kind: ElementKind,
        buffer: ArrayBuffer,
        byte_offset: usize,
        length: usize,
    ) -> Result<Self, Error> {
        let width = kind.byte_width();
        if byte_offset % width != 0 {
            return Err(Error::type_mismatch(format!(
                "start offset of {} should be a multiple of {width}",
                kind.name()
            )));
        }
        let end = length
            .checked_mul(width)
            .and_then(|n| n.checked_add(byte_offset));
        match end {
            Some(end) if !buffer.is_detached() && end <= buffer.byte_length() => {
                Ok(Self::new_unchecked(kind, buffer, byte_offset, length))
            }
            _ => Err(Error::Bounds { index: 0, length }),
        }
    }

    fn new_unchecked(
        kind: ElementKind,
        buffer: ArrayBuffer,
        byte_offset: usize,
        length: usize,
    ) -> Self {
        Self {
            data: Rc::new(ViewData {
                kind,
                buffer,
                byte_offset,
                length,
            }),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.data.kind
    }

    /// Element count, fixed at construction.
    pub fn len(&self) -> usize {
        self.data.length
    }

    pub fn is_empty(&self) -> bool {
        self.data.length == 0
    }

    pub fn buffer(&self) -> &ArrayBuffer {
        &self.data.buffer
    }

    pub fn byte_offset(&self) -> usize {
        self.data.byte_offset
    }

    pub fn byte_length(&self) -> usize {
        self.data.length * self.data.kind.byte_width()
    }

    /// `true` once the buffer no longer backs every element of the view.
    pub fn is_out_of_bounds(&self) -> bool {
        let buffer = &self.data.buffer;
        buffer.is_detached() || self.data.byte_offset + self.byte_length() > buffer.byte_length()
    }

    fn slot_offset(&self, index: usize) -> Result<usize, Error> {
        if index >= self.data.length {
            return Err(self.bounds_error(index));
        }
        Ok(self.data.byte_offset + index * self.data.kind.byte_width())
    }

    fn bounds_error(&self, index: usize) -> Error {
        Error::Bounds {
            index,
            length: self.data.length,
        }
    }

    /// Read the element at `index` as a script value.
    pub fn get(&self, index: usize) -> Result<Value, Error> {
        let kind = self.data.kind;
        let offset = self.slot_offset(index)?;
        match self.data.buffer.read(offset, kind.byte_width()) {
            Some(raw) => Ok(kind.expand(raw)),
            None => {
                tracing::debug!(index, length = self.data.length, "Read past typed array buffer");
                Err(self.bounds_error(index))
            }
        }
    }

    /// Coerce `value` to the view's kind and store it at `index`.
    pub fn set(&self, index: usize, value: &Value) -> Result<(), Error> {
        let kind = self.data.kind;
        let raw = kind.coerce(value)?;
        let offset = self.slot_offset(index)?;
        if self.data.buffer.write(offset, kind.byte_width(), raw) {
            Ok(())
        } else {
            Err(self.bounds_error(index))
        }
    }

    /// Every element in index order. Fails on the first index the buffer no
    /// longer backs.
    pub fn to_vec(&self) -> Result<Vec<Value>, Error> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    pub fn ptr_eq(&self, other: &TypedArray) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.data) as usize
    }
}

impl fmt::Debug for TypedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.kind().name())
            .field("length", &self.len())
            .field("byte_offset", &self.byte_offset())
            .field("buffer", self.buffer())
            .finish()
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

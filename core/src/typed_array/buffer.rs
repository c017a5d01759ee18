//! Shared byte storage behind typed array views.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use super::kind::RawElement;

/// A reference-counted, detachable, resizable byte buffer.
///
/// Cloning an `ArrayBuffer` clones the handle, not the bytes: every view
/// built over the same buffer observes writes, resizes and detachment made
/// through any other handle. Access never holds a borrow beyond a single
/// read or write, so callbacks may mutate the buffer while a traversal over
/// it is in progress.
#[derive(Clone)]
pub struct ArrayBuffer {
    // `None` once detached.
    bytes: Rc<RefCell<Option<Vec<u8>>>>,
}

impl ArrayBuffer {
    /// A zero-filled buffer of `byte_length` bytes.
    pub fn new(byte_length: usize) -> Self {
        Self::from_bytes(alloc::vec![0; byte_length])
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Rc::new(RefCell::new(Some(bytes))),
        }
    }

    /// Current length in bytes; 0 once detached.
    pub fn byte_length(&self) -> usize {
        self.bytes.borrow().as_ref().map_or(0, Vec::len)
    }

    pub fn is_detached(&self) -> bool {
        self.bytes.borrow().is_none()
    }

    /// Release the storage. Every view over this buffer becomes out of
    /// bounds. Detaching twice is a no-op.
    pub fn detach(&self) {
        let previous = self.bytes.borrow_mut().take();
        if let Some(bytes) = previous {
            tracing::debug!(byte_length = bytes.len(), "ArrayBuffer detached");
        }
    }

    /// Shrink or grow the buffer in place, zero-filling new bytes.
    ///
    /// Returns `false` if the buffer is detached.
    pub fn resize(&self, new_byte_length: usize) -> bool {
        let mut bytes = self.bytes.borrow_mut();
        let Some(bytes) = bytes.as_mut() else {
            return false;
        };
        tracing::debug!(
            from = bytes.len(),
            to = new_byte_length,
            "ArrayBuffer resized"
        );
        bytes.resize(new_byte_length, 0);
        true
    }

    /// Copy of the current contents, `None` once detached.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        self.bytes.borrow().clone()
    }

    /// Read `width` little-endian bytes at `offset`.
    ///
    /// Returns `None` if the buffer is detached or the range is not fully
    /// backed.
    pub(crate) fn read(&self, offset: usize, width: usize) -> Option<RawElement> {
        let bytes = self.bytes.borrow();
        let slot = bytes.as_ref()?.get(offset..offset.checked_add(width)?)?;
        let mut le = [0u8; 8];
        le[..width].copy_from_slice(slot);
        Some(RawElement(u64::from_le_bytes(le)))
    }

    /// Write the low `width` bytes of `raw` at `offset`, little-endian.
    ///
    /// Returns `false` if the buffer is detached or the range is not fully
    /// backed.
    pub(crate) fn write(&self, offset: usize, width: usize, raw: RawElement) -> bool {
        let mut bytes = self.bytes.borrow_mut();
        let Some(end) = offset.checked_add(width) else {
            return false;
        };
        match bytes.as_mut().and_then(|b| b.get_mut(offset..end)) {
            Some(slot) => {
                slot.copy_from_slice(&raw.0.to_le_bytes()[..width]);
                true
            }
            None => false,
        }
    }

    /// Whether both handles share the same storage.
    pub fn ptr_eq(&self, other: &ArrayBuffer) -> bool {
        Rc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl fmt::Debug for ArrayBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_detached() {
            f.write_str("ArrayBuffer(detached)")
        } else {
            write!(f, "ArrayBuffer(byte_length={})", self.byte_length())
        }
    }
}

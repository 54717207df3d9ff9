use std::ptr::NonNull;
use std::sync::Arc;

use crate::dtype::{DType, Element};

/// Called exactly once, when the last handle to a buffer goes away.
pub type ReleaseFn = Box<dyn FnOnce() + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("buffer of {size} bytes aligned to {alignment} could not be allocated")]
    AllocationFailed { size: usize, alignment: usize },

    #[error("{buffer_size} bytes x {num_buffers} buffers overflows")]
    SizeOverflow { buffer_size: usize, num_buffers: usize },
}

struct Allocation {
    ptr: NonNull<u8>,
    len: usize,
    release: Option<ReleaseFn>,
}

// The allocation is plain bytes; the release function is already required to be Send + Sync.
unsafe impl Send for Allocation {}
unsafe impl Sync for Allocation {}

impl Drop for Allocation {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// A reference-counted region of memory owned by whoever allocated it.
///
/// The memory is released through the function given at construction when the last clone drops.  Reading is always
/// possible; writing is only possible through a handle which is the only one left (see [SharedBuffer::get_mut]), which
/// is what lets ports forward buffers downstream without copying.
#[derive(Clone)]
pub struct SharedBuffer {
    inner: Arc<Allocation>,
}

impl SharedBuffer {
    /// Wrap memory owned elsewhere.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` bytes, initialized, and not accessed through anything else
    /// until `release` runs.
    pub unsafe fn from_raw_parts(ptr: NonNull<u8>, len: usize, release: ReleaseFn) -> SharedBuffer {
        SharedBuffer {
            inner: Arc::new(Allocation {
                ptr,
                len,
                release: Some(release),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// The address of the first byte, for alignment checks.
    pub fn address(&self) -> usize {
        self.inner.ptr.as_ptr() as usize
    }

    /// How many handles share this buffer.
    pub fn use_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    pub fn as_bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.inner.ptr.as_ptr(), self.inner.len) }
    }

    /// Mutable access, if this is the only handle.
    pub fn get_mut(&mut self) -> Option<&mut [u8]> {
        Arc::get_mut(&mut self.inner)
            .map(|a| unsafe { std::slice::from_raw_parts_mut(a.ptr.as_ptr(), a.len) })
    }
}

impl std::fmt::Debug for SharedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("address", &format_args!("{:#x}", self.address()))
            .field("len", &self.len())
            .field("use_count", &self.use_count())
            .finish()
    }
}

/// A typed window onto a [SharedBuffer], as handed between ports.
#[derive(Clone, Debug)]
pub struct BufferChunk {
    buffer: SharedBuffer,
    offset: usize,
    length: usize,
    dtype: DType,
}

impl BufferChunk {
    /// A chunk covering `length` bytes of `buffer` starting at `offset`.
    ///
    /// Panics if the window does not fit in the buffer.
    pub fn new(buffer: SharedBuffer, offset: usize, length: usize, dtype: DType) -> BufferChunk {
        assert!(
            offset.checked_add(length).is_some_and(|end| end <= buffer.len()),
            "Chunk {offset}+{length} exceeds buffer of {} bytes",
            buffer.len()
        );
        BufferChunk {
            buffer,
            offset,
            length,
            dtype,
        }
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn elements(&self) -> usize {
        self.length / self.dtype.size()
    }

    pub fn len_bytes(&self) -> usize {
        self.length
    }

    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_bytes()[self.offset..self.offset + self.length]
    }

    /// View the chunk as `T`.
    ///
    /// Panics if `T` does not match the chunk's dtype.
    pub fn as_slice<T: Element>(&self) -> &[T] {
        assert!(
            self.dtype.matches::<T>(),
            "Chunk of {} viewed as {:?}",
            self.dtype,
            T::KIND
        );
        bytemuck::cast_slice(&self.as_bytes()[..self.elements() * self.dtype.size()])
    }

    /// Drop the first `bytes` bytes from the front of the chunk.
    pub(crate) fn advance(&mut self, bytes: usize) {
        let bytes = bytes.min(self.length);
        self.offset += bytes;
        self.length -= bytes;
    }
}

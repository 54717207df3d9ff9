//! Aligned allocation for buffers which will be handed to the kernels.
//!
//! This is a thin layer over the global allocator.  [AlignedRegion] deliberately has no `Drop` impl: whoever owns it
//! decides when the memory goes away, and must hand it back to [free] exactly once.
use std::alloc::Layout;
use std::ptr::NonNull;

/// The alignment, in bytes, which the widest vector unit enabled for this build wants.
pub const fn alignment() -> usize {
    if cfg!(target_feature = "avx512f") {
        64
    } else if cfg!(target_feature = "avx") {
        32
    } else {
        16
    }
}

/// A zero-initialized, aligned heap allocation.
#[derive(Debug)]
pub struct AlignedRegion {
    ptr: NonNull<u8>,
    len: usize,
    layout: Layout,
}

// The region is plain bytes with a single owner.
unsafe impl Send for AlignedRegion {}
unsafe impl Sync for AlignedRegion {}

impl AlignedRegion {
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub fn as_non_null(&self) -> NonNull<u8> {
        self.ptr
    }

    /// The size that was requested, which may be 0.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn alignment(&self) -> usize {
        self.layout.align()
    }
}

/// Allocate `size` zeroed bytes aligned to `alignment`.
///
/// Returns `None` if `alignment` is not a power of two, if the size overflows when rounded up to the alignment, or if
/// the allocator fails.  Zero-sized requests still allocate, so the pointer is always valid.
pub fn malloc(size: usize, alignment: usize) -> Option<AlignedRegion> {
    let layout = Layout::from_size_align(size.max(1), alignment).ok()?;
    // Safety: the layout is never zero-sized.
    let ptr = NonNull::new(unsafe { std::alloc::alloc_zeroed(layout) })?;
    Some(AlignedRegion {
        ptr,
        len: size,
        layout,
    })
}

/// Release a region obtained from [malloc].
pub fn free(region: AlignedRegion) {
    // Safety: regions are only constructed by `malloc`, with this layout, and `free` takes them by value.
    unsafe { std::alloc::dealloc(region.ptr.as_ptr(), region.layout) }
}

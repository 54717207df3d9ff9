use crate::config;
use crate::framework::buffer::{BufferError, SharedBuffer};
use crate::Result;

/// Sizing for a port's storage.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BufferManagerArgs {
    pub buffer_size: usize,
    pub num_buffers: usize,
}

impl Default for BufferManagerArgs {
    fn default() -> Self {
        BufferManagerArgs {
            buffer_size: config::DEFAULT_BUFFER_SIZE,
            num_buffers: config::DEFAULT_NUM_BUFFERS,
        }
    }
}

impl BufferManagerArgs {
    /// Total bytes of one slab.
    pub fn total_size(&self) -> Result<usize> {
        self.buffer_size
            .checked_mul(self.num_buffers)
            .ok_or_else(|| {
                BufferError::SizeOverflow {
                    buffer_size: self.buffer_size,
                    num_buffers: self.num_buffers,
                }
                .into()
            })
    }
}

/// Produces the slab backing a port.
pub type AllocateFn = fn(&BufferManagerArgs) -> Result<SharedBuffer>;

/// Owns the single slab a port reads from or writes into.
#[derive(Debug)]
pub struct BufferManager {
    args: BufferManagerArgs,
    slab: SharedBuffer,
}

impl BufferManager {
    pub fn new(args: BufferManagerArgs, allocate: AllocateFn) -> Result<BufferManager> {
        let slab = allocate(&args)?;
        Ok(BufferManager { args, slab })
    }

    pub fn args(&self) -> &BufferManagerArgs {
        &self.args
    }

    pub fn slab(&self) -> &SharedBuffer {
        &self.slab
    }

    pub(crate) fn into_slab(self) -> SharedBuffer {
        self.slab
    }
}

/// Allocate a slab with the global allocator at a fixed, modest alignment.
///
/// Used for ports whose blocks do not ask for kernel alignment.
pub fn generic_allocator(args: &BufferManagerArgs) -> Result<SharedBuffer> {
    allocate_aligned(args, std::mem::align_of::<num::complex::Complex64>())
}

pub(crate) fn allocate_aligned(args: &BufferManagerArgs, alignment: usize) -> Result<SharedBuffer> {
    let size = args.total_size()?;
    let region = volk_kernels::alloc::malloc(size, alignment)
        .ok_or(BufferError::AllocationFailed { size, alignment })?;
    let ptr = region.as_non_null();

    // Safety: the region is ours alone, zeroed, `size` bytes long, and the release function is the only thing which
    // frees it.
    Ok(unsafe {
        SharedBuffer::from_raw_parts(
            ptr,
            size,
            Box::new(move || volk_kernels::alloc::free(region)),
        )
    })
}

//! Port storage aligned for the kernels.
use crate::framework::buffer_manager::allocate_aligned;
use crate::framework::{BlockDescriptor, BufferManagerArgs, SharedBuffer};
use crate::Result;

/// Allocate one slab of `buffer_size * num_buffers` bytes at the kernel library's preferred alignment.
///
/// The slab goes back to the kernel allocator when the last [SharedBuffer] handle to it drops.
pub fn aligned_buffer_allocator(args: &BufferManagerArgs) -> Result<SharedBuffer> {
    allocate_aligned(args, volk_kernels::alloc::alignment())
}

/// A descriptor whose ports all use [aligned_buffer_allocator].
pub fn volk_descriptor(path: &'static str) -> BlockDescriptor {
    BlockDescriptor::new(path).with_allocator(aligned_buffer_allocator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slab_is_aligned_and_sized() {
        for (buffer_size, num_buffers) in [(8192, 4), (1, 1), (100, 3), (0, 5)] {
            let args = BufferManagerArgs {
                buffer_size,
                num_buffers,
            };
            let slab = aligned_buffer_allocator(&args).unwrap();
            assert_eq!(slab.len(), buffer_size * num_buffers);
            assert_eq!(slab.address() % volk_kernels::alloc::alignment(), 0);
        }
    }

    #[test]
    fn test_last_handle_frees() {
        let slab = aligned_buffer_allocator(&BufferManagerArgs::default()).unwrap();
        let clones = (0..5).map(|_| slab.clone()).collect::<Vec<_>>();
        assert_eq!(slab.use_count(), 6);
        drop(clones);
        assert_eq!(slab.use_count(), 1);
    }

    #[test]
    fn test_overflow_is_reported() {
        let args = BufferManagerArgs {
            buffer_size: usize::MAX / 2,
            num_buffers: 3,
        };
        assert!(aligned_buffer_allocator(&args).is_err());
    }
}

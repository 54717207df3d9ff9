use std::marker::PhantomData;

use volk_kernels::bits;

use crate::allocator::volk_descriptor;
use crate::dispatch::{dispatch, unsupported};
use crate::dtype::{DType, Element};
use crate::framework::{Block, BlockDescriptor, BoxedBlock, WorkIo};
use crate::registry::BlockRegistry;
use crate::Result;

/// Copies its input, then reverses the byte order of the copy in place.
pub struct Byteswap<T> {
    descriptor: BlockDescriptor,
    _type: PhantomData<fn(T) -> T>,
}

impl<T: Element + bits::Byteswap> Byteswap<T> {
    pub fn new(path: &'static str) -> Self {
        Byteswap {
            descriptor: volk_descriptor(path).input(DType::of::<T>()).output(DType::of::<T>()),
            _type: PhantomData,
        }
    }
}

impl<T: Element + bits::Byteswap> Block for Byteswap<T> {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [output], info) = io.split::<1, 1>();
        let n = info.min_elements;
        if n == 0 {
            return;
        }

        let out = &mut output.slice_mut::<T>()[..n];
        out.copy_from_slice(&input.slice::<T>()[..n]);
        bits::byteswap(out);
        input.consume(n);
        output.produce(n);
    }
}

pub fn make_byteswap(path: &'static str, dtype: DType) -> Result<BoxedBlock> {
    dispatch!(&[dtype], {
        (u16) => Byteswap::<u16>::new(path),
        (u32) => Byteswap::<u32>::new(path),
        (u64) => Byteswap::<u64>::new(path),
    });
    Err(unsupported(path, &[dtype], &[dtype], &[]))
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_with_dtype("/volk/byteswap", make_byteswap)
}

use volk_kernels::bits;

use crate::allocator::volk_descriptor;
use crate::dtype::DType;
use crate::framework::{Block, BlockDescriptor, WorkIo};
use crate::registry::BlockRegistry;
use crate::Result;

/// Counts the set bits of each `u64`.
pub struct PopCnt {
    descriptor: BlockDescriptor,
}

impl PopCnt {
    pub fn new(path: &'static str) -> PopCnt {
        PopCnt {
            descriptor: volk_descriptor(path).input(DType::of::<u64>()).output(DType::of::<u64>()),
        }
    }
}

impl Block for PopCnt {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [output], info) = io.split::<1, 1>();
        let n = info.min_elements;
        if n == 0 {
            return;
        }

        // The kernel is scalar, so it runs once per element.
        for (o, &i) in output.slice_mut::<u64>()[..n].iter_mut().zip(&input.slice::<u64>()[..n]) {
            *o = bits::popcnt_u64(i);
        }
        input.consume(n);
        output.produce(n);
    }
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_fixed("/volk/popcnt", |path| Box::new(PopCnt::new(path)))
}

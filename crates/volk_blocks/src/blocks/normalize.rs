use volk_kernels::arith;

use crate::allocator::volk_descriptor;
use crate::config::{DEFAULT_SCALAR_GETTER, DEFAULT_SCALAR_SETTER};
use crate::dtype::DType;
use crate::framework::{Block, BlockDescriptor, WorkIo};
use crate::registry::BlockRegistry;
use crate::value::{call_handlers, CallHandler, ScalarParam, Value};
use crate::Result;

/// Divides every sample by `scalar`, which starts at one.
pub struct Normalize {
    descriptor: BlockDescriptor,
    scalar: ScalarParam<f32>,
}

impl Normalize {
    pub fn new(path: &'static str) -> Normalize {
        Normalize {
            descriptor: volk_descriptor(path).input(DType::of::<f32>()).output(DType::of::<f32>()),
            scalar: ScalarParam::new(DEFAULT_SCALAR_GETTER, DEFAULT_SCALAR_SETTER, 1.0),
        }
    }
}

impl Block for Normalize {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [output], info) = io.split::<1, 1>();
        let n = info.min_elements;
        if n == 0 {
            return;
        }

        // The kernel works in place.
        let out = &mut output.slice_mut::<f32>()[..n];
        out.copy_from_slice(&input.slice::<f32>()[..n]);
        arith::normalize_f32(out, self.scalar.get());
        input.consume(n);
        output.produce(n);
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        call_handlers(self.descriptor.path, name, args, &mut [&mut self.scalar])
    }

    fn calls(&self) -> Vec<&'static str> {
        self.scalar.names()
    }
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_fixed("/volk/normalize", |path| Box::new(Normalize::new(path)))
}

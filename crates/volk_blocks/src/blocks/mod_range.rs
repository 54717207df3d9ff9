use volk_kernels::reduce;

use crate::allocator::volk_descriptor;
use crate::dtype::DType;
use crate::framework::{Block, BlockDescriptor, WorkIo};
use crate::registry::BlockRegistry;
use crate::value::{call_handlers, CallHandler, ScalarParam, Value};
use crate::Result;

/// Wraps each sample into `[lowerBound, upperBound]`.  Both bounds start at zero.
pub struct ModRange {
    descriptor: BlockDescriptor,
    lower_bound: ScalarParam<f32>,
    upper_bound: ScalarParam<f32>,
}

impl ModRange {
    pub fn new(path: &'static str) -> ModRange {
        ModRange {
            descriptor: volk_descriptor(path).input(DType::of::<f32>()).output(DType::of::<f32>()),
            lower_bound: ScalarParam::new("lowerBound", "setLowerBound", 0.0),
            upper_bound: ScalarParam::new("upperBound", "setUpperBound", 0.0),
        }
    }
}

impl Block for ModRange {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [output], info) = io.split::<1, 1>();
        let n = info.min_elements;
        if n == 0 {
            return;
        }

        reduce::mod_range_f32(
            &mut output.slice_mut::<f32>()[..n],
            &input.slice::<f32>()[..n],
            self.lower_bound.get(),
            self.upper_bound.get(),
        );
        input.consume(n);
        output.produce(n);
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        call_handlers(
            self.descriptor.path,
            name,
            args,
            &mut [&mut self.lower_bound, &mut self.upper_bound],
        )
    }

    fn calls(&self) -> Vec<&'static str> {
        let mut names = self.lower_bound.names();
        names.extend(self.upper_bound.names());
        names
    }
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_fixed("/volk/mod_range", |path| Box::new(ModRange::new(path)))
}

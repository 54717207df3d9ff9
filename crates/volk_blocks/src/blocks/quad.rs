//! Fixed multi-port `i16` kernels from the max-star decoder family.
use volk_kernels::reduce;

use crate::allocator::volk_descriptor;
use crate::dtype::DType;
use crate::framework::{Block, BlockDescriptor, WorkIo};
use crate::registry::BlockRegistry;
use crate::Result;

fn i16_descriptor(path: &'static str, inputs: usize, outputs: usize) -> BlockDescriptor {
    let dtype = DType::of::<i16>();
    let d = (0..inputs).fold(volk_descriptor(path), |d, _| d.input(dtype));
    (0..outputs).fold(d, |d, _| d.output(dtype))
}

/// Max-star across inputs 0 to 3.
pub struct QuadMaxStar {
    descriptor: BlockDescriptor,
}

impl QuadMaxStar {
    pub fn new(path: &'static str) -> QuadMaxStar {
        QuadMaxStar {
            descriptor: i16_descriptor(path, 4, 1),
        }
    }
}

impl Block for QuadMaxStar {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([a, b, c, d], [output], info) = io.split::<4, 1>();
        let n = info.min_elements;
        if n == 0 {
            return;
        }

        reduce::quad_max_star_i16(
            &mut output.slice_mut::<i16>()[..n],
            &a.slice::<i16>()[..n],
            &b.slice::<i16>()[..n],
            &c.slice::<i16>()[..n],
            &d.slice::<i16>()[..n],
        );
        for input in [a, b, c, d] {
            input.consume(n);
        }
        output.produce(n);
    }
}

/// Adds input 0 to each of inputs 1 to 4, writing outputs 0 to 3.
pub struct AddQuad {
    descriptor: BlockDescriptor,
}

impl AddQuad {
    pub fn new(path: &'static str) -> AddQuad {
        AddQuad {
            descriptor: i16_descriptor(path, 5, 4),
        }
    }
}

impl Block for AddQuad {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([base, in1, in2, in3, in4], [out0, out1, out2, out3], info) = io.split::<5, 4>();
        let n = info.min_elements;
        if n == 0 {
            return;
        }

        reduce::add_quad_i16(
            [
                &mut out0.slice_mut::<i16>()[..n],
                &mut out1.slice_mut::<i16>()[..n],
                &mut out2.slice_mut::<i16>()[..n],
                &mut out3.slice_mut::<i16>()[..n],
            ],
            &base.slice::<i16>()[..n],
            [
                &in1.slice::<i16>()[..n],
                &in2.slice::<i16>()[..n],
                &in3.slice::<i16>()[..n],
                &in4.slice::<i16>()[..n],
            ],
        );
        for input in [base, in1, in2, in3, in4] {
            input.consume(n);
        }
        for output in [out0, out1, out2, out3] {
            output.produce(n);
        }
    }
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_fixed("/volk/quad_max_star", |path| Box::new(QuadMaxStar::new(path)))?;
    registry.register_fixed("/volk/add_quad", |path| Box::new(AddQuad::new(path)))
}

//! Running sum of a stream, passing the stream through untouched.
use std::ops::Add;

use num::complex::Complex32;
use num::Zero;
use volk_kernels::reduce;

use crate::allocator::volk_descriptor;
use crate::dispatch::{dispatch, unsupported};
use crate::dtype::{DType, Element};
use crate::framework::{Block, BlockDescriptor, BoxedBlock, BufferManager, BufferManagerArgs, Direction, WorkIo};
use crate::registry::BlockRegistry;
use crate::value::{expect_args, CallError, ScalarValue, Value};
use crate::Result;

/// Adds every element it sees to a running total, then forwards the buffer downstream without copying it.
///
/// The output has no storage of its own; everything leaving it is a buffer taken from the input.
pub struct Accumulator<T> {
    descriptor: BlockDescriptor,
    sum: T,
}

impl<T> Accumulator<T>
where
    T: Element + ScalarValue + Zero + Add<Output = T>,
{
    pub fn new(path: &'static str) -> Self {
        Accumulator {
            descriptor: volk_descriptor(path).input(DType::of::<T>()).output(DType::of::<T>()),
            sum: T::zero(),
        }
    }

    pub fn current_sum(&self) -> T {
        self.sum
    }

    pub fn reset(&mut self) {
        self.sum = T::zero();
    }
}

impl<T> Block for Accumulator<T>
where
    T: Element + ScalarValue + Zero + Add<Output = T>,
{
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [output], _) = io.split::<1, 1>();
        if input.elements() == 0 {
            return;
        }

        let Some(chunk) = input.take_buffer() else {
            return;
        };
        self.sum = self.sum + reduce::accumulator(chunk.as_slice::<T>());
        output.post_buffer(chunk);
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        match name {
            "currentSum" => {
                expect_args::<0>(name, args)?;
                Ok(self.sum.into_value())
            }
            "reset" => {
                expect_args::<0>(name, args)?;
                self.reset();
                Ok(Value::Unit)
            }
            _ => Err(CallError::unknown(self.descriptor.path, name).into()),
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        vec!["currentSum", "reset"]
    }

    fn buffer_manager(
        &self,
        direction: Direction,
        _port: usize,
        args: &BufferManagerArgs,
    ) -> Result<Option<BufferManager>> {
        match direction {
            Direction::Input => BufferManager::new(*args, self.descriptor.allocator).map(Some),
            Direction::Output => Ok(None),
        }
    }
}

pub fn make_accumulator(path: &'static str, dtype: DType) -> Result<BoxedBlock> {
    dispatch!(&[dtype], {
        (f32) => Accumulator::<f32>::new(path),
        (Complex32) => Accumulator::<Complex32>::new(path),
    });
    Err(unsupported(path, &[dtype], &[dtype], &[]))
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_with_dtype("/volk/accumulator", make_accumulator)
}

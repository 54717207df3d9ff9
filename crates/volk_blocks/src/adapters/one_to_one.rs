use std::marker::PhantomData;

use crate::allocator::volk_descriptor;
use crate::dtype::{DType, Element};
use crate::framework::{Block, BlockDescriptor, WorkIo};
use crate::value::{call_handlers, CallHandler, ScalarParam, ScalarValue, Value};
use crate::Result;

pub type OneToOneFn<I, O> = fn(&mut [O], &[I]);

pub type OneToOneScalarFn<I, O, S> = fn(&mut [O], &[I], S);

/// Runs a kernel over one input, writing one output.
pub struct OneToOne<I, O> {
    descriptor: BlockDescriptor,
    kernel: OneToOneFn<I, O>,
    _types: PhantomData<fn(I) -> O>,
}

impl<I: Element, O: Element> OneToOne<I, O> {
    pub fn new(path: &'static str, kernel: OneToOneFn<I, O>) -> Self {
        OneToOne {
            descriptor: volk_descriptor(path).input(DType::of::<I>()).output(DType::of::<O>()),
            kernel,
            _types: PhantomData,
        }
    }
}

impl<I: Element, O: Element> Block for OneToOne<I, O> {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [output], info) = io.split::<1, 1>();
        let n = info.min_elements;
        if n == 0 {
            return;
        }

        (self.kernel)(&mut output.slice_mut::<O>()[..n], &input.slice::<I>()[..n]);
        input.consume(n);
        output.produce(n);
    }
}

/// [OneToOne], with a scalar argument exposed through a getter and a setter.
pub struct OneToOneScalar<I, O, S> {
    descriptor: BlockDescriptor,
    kernel: OneToOneScalarFn<I, O, S>,
    scalar: ScalarParam<S>,
    _types: PhantomData<fn(I) -> O>,
}

impl<I: Element, O: Element, S: ScalarValue> OneToOneScalar<I, O, S> {
    /// The scalar starts at its type's default, which is zero for every scalar type blocks use.
    pub fn new(
        path: &'static str,
        kernel: OneToOneScalarFn<I, O, S>,
        getter: &'static str,
        setter: &'static str,
    ) -> Self {
        OneToOneScalar {
            descriptor: volk_descriptor(path).input(DType::of::<I>()).output(DType::of::<O>()),
            kernel,
            scalar: ScalarParam::new(getter, setter, S::default()),
            _types: PhantomData,
        }
    }

    pub fn scalar(&self) -> S {
        self.scalar.get()
    }
}

impl<I: Element, O: Element, S: ScalarValue> Block for OneToOneScalar<I, O, S> {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [output], info) = io.split::<1, 1>();
        let n = info.min_elements;
        if n == 0 {
            return;
        }

        (self.kernel)(
            &mut output.slice_mut::<O>()[..n],
            &input.slice::<I>()[..n],
            self.scalar.get(),
        );
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

use std::marker::PhantomData;

use crate::allocator::volk_descriptor;
use crate::dtype::{DType, Element};
use crate::framework::{Block, BlockDescriptor, WorkIo};
use crate::value::{call_handlers, CallHandler, ScalarParam, ScalarValue, Value};
use crate::Result;

pub type OneToTwoFn<I, O0, O1> = fn(&mut [O0], &mut [O1], &[I]);

pub type OneToTwoScalarFn<I, O0, O1, S> = fn(&mut [O0], &mut [O1], &[I], S);

fn descriptor<I: Element, O0: Element, O1: Element>(
    path: &'static str,
    outputs: [&'static str; 2],
) -> BlockDescriptor {
    volk_descriptor(path)
        .input(DType::of::<I>())
        .named_output(outputs[0], DType::of::<O0>())
        .named_output(outputs[1], DType::of::<O1>())
}

/// Runs a kernel which splits one input across two named outputs.
///
/// Both outputs always advance together, so the step size is the minimum over every port.
pub struct OneToTwo<I, O0, O1> {
    descriptor: BlockDescriptor,
    kernel: OneToTwoFn<I, O0, O1>,
    _types: PhantomData<fn(I) -> (O0, O1)>,
}

impl<I: Element, O0: Element, O1: Element> OneToTwo<I, O0, O1> {
    pub fn new(path: &'static str, kernel: OneToTwoFn<I, O0, O1>, outputs: [&'static str; 2]) -> Self {
        OneToTwo {
            descriptor: descriptor::<I, O0, O1>(path, outputs),
            kernel,
            _types: PhantomData,
        }
    }
}

impl<I: Element, O0: Element, O1: Element> Block for OneToTwo<I, O0, O1> {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [out0, out1], info) = io.split::<1, 2>();
        let n = info.min_all_elements;
        if n == 0 {
            return;
        }

        (self.kernel)(
            &mut out0.slice_mut::<O0>()[..n],
            &mut out1.slice_mut::<O1>()[..n],
            &input.slice::<I>()[..n],
        );
        input.consume(n);
        out0.produce(n);
        out1.produce(n);
    }
}

/// [OneToTwo], with a scalar argument exposed through a getter and a setter.
pub struct OneToTwoScalar<I, O0, O1, S> {
    descriptor: BlockDescriptor,
    kernel: OneToTwoScalarFn<I, O0, O1, S>,
    scalar: ScalarParam<S>,
    _types: PhantomData<fn(I) -> (O0, O1)>,
}

impl<I: Element, O0: Element, O1: Element, S: ScalarValue> OneToTwoScalar<I, O0, O1, S> {
    pub fn new(
        path: &'static str,
        kernel: OneToTwoScalarFn<I, O0, O1, S>,
        getter: &'static str,
        setter: &'static str,
        outputs: [&'static str; 2],
    ) -> Self {
        OneToTwoScalar {
            descriptor: descriptor::<I, O0, O1>(path, outputs),
            kernel,
            scalar: ScalarParam::new(getter, setter, S::default()),
            _types: PhantomData,
        }
    }
}

impl<I: Element, O0: Element, O1: Element, S: ScalarValue> Block for OneToTwoScalar<I, O0, O1, S> {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [out0, out1], info) = io.split::<1, 2>();
        let n = info.min_all_elements;
        if n == 0 {
            return;
        }

        (self.kernel)(
            &mut out0.slice_mut::<O0>()[..n],
            &mut out1.slice_mut::<O1>()[..n],
            &input.slice::<I>()[..n],
            self.scalar.get(),
        );
        input.consume(n);
        out0.produce(n);
        out1.produce(n);
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        call_handlers(self.descriptor.path, name, args, &mut [&mut self.scalar])
    }

    fn calls(&self) -> Vec<&'static str> {
        self.scalar.names()
    }
}

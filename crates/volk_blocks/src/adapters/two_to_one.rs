use std::marker::PhantomData;

use crate::allocator::volk_descriptor;
use crate::dtype::{DType, Element};
use crate::framework::{Block, BlockDescriptor, WorkIo};
use crate::value::{call_handlers, CallHandler, ScalarParam, ScalarValue, Value};
use crate::Result;

pub type TwoToOneFn<I0, I1, O> = fn(&mut [O], &[I0], &[I1]);

pub type TwoToOneScalarFn<I0, I1, O, S> = fn(&mut [O], &[I0], &[I1], S);

/// Input ports of a two-input block.  `None` means indexed ports 0 and 1.
pub type InputNames = Option<[&'static str; 2]>;

fn descriptor<I0: Element, I1: Element, O: Element>(path: &'static str, inputs: InputNames) -> BlockDescriptor {
    let d = volk_descriptor(path);
    let d = match inputs {
        Some([a, b]) => d
            .named_input(a, DType::of::<I0>())
            .named_input(b, DType::of::<I1>()),
        None => d.input(DType::of::<I0>()).input(DType::of::<I1>()),
    };
    d.output(DType::of::<O>())
}

/// Runs a kernel which combines two inputs into one output.
pub struct TwoToOne<I0, I1, O> {
    descriptor: BlockDescriptor,
    kernel: TwoToOneFn<I0, I1, O>,
    _types: PhantomData<fn(I0, I1) -> O>,
}

impl<I0: Element, I1: Element, O: Element> TwoToOne<I0, I1, O> {
    pub fn new(path: &'static str, kernel: TwoToOneFn<I0, I1, O>, inputs: InputNames) -> Self {
        TwoToOne {
            descriptor: descriptor::<I0, I1, O>(path, inputs),
            kernel,
            _types: PhantomData,
        }
    }
}

impl<I0: Element, I1: Element, O: Element> Block for TwoToOne<I0, I1, O> {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([in0, in1], [output], info) = io.split::<2, 1>();
        let n = info.min_all_elements;
        if n == 0 {
            return;
        }

        (self.kernel)(
            &mut output.slice_mut::<O>()[..n],
            &in0.slice::<I0>()[..n],
            &in1.slice::<I1>()[..n],
        );
        in0.consume(n);
        in1.consume(n);
        output.produce(n);
    }
}

/// [TwoToOne], with a scalar argument exposed through a getter and a setter.
pub struct TwoToOneScalar<I0, I1, O, S> {
    descriptor: BlockDescriptor,
    kernel: TwoToOneScalarFn<I0, I1, O, S>,
    scalar: ScalarParam<S>,
    _types: PhantomData<fn(I0, I1) -> O>,
}

impl<I0: Element, I1: Element, O: Element, S: ScalarValue> TwoToOneScalar<I0, I1, O, S> {
    pub fn new(
        path: &'static str,
        kernel: TwoToOneScalarFn<I0, I1, O, S>,
        getter: &'static str,
        setter: &'static str,
        inputs: InputNames,
    ) -> Self {
        TwoToOneScalar {
            descriptor: descriptor::<I0, I1, O>(path, inputs),
            kernel,
            scalar: ScalarParam::new(getter, setter, S::default()),
            _types: PhantomData,
        }
    }
}

impl<I0: Element, I1: Element, O: Element, S: ScalarValue> Block for TwoToOneScalar<I0, I1, O, S> {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([in0, in1], [output], info) = io.split::<2, 1>();
        let n = info.min_all_elements;
        if n == 0 {
            return;
        }

        (self.kernel)(
            &mut output.slice_mut::<O>()[..n],
            &in0.slice::<I0>()[..n],
            &in1.slice::<I1>()[..n],
            self.scalar.get(),
        );
        in0.consume(n);
        in1.consume(n);
        output.produce(n);
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        call_handlers(self.descriptor.path, name, args, &mut [&mut self.scalar])
    }

    fn calls(&self) -> Vec<&'static str> {
        self.scalar.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::framework::{CollectorSink, FeederSource, PortName, Topology};

    #[test]
    fn test_named_inputs() {
        let block = TwoToOne::new("/volk/pow", volk_kernels::math::pow_f32, Some(["exp", "input"]));
        let names = block.inputs().iter().map(|p| p.name.clone()).collect::<Vec<_>>();
        assert_eq!(names, vec![PortName::from("exp"), PortName::from("input")]);
        assert_eq!(block.outputs()[0].name, PortName::Index(0));
    }

    #[test]
    fn test_waits_for_both_inputs() {
        let a = vec![1.0f32; 500];
        let b = vec![2.0f32; 300];
        let mut topology = Topology::default();
        let a_src = topology.add(Box::new(FeederSource::new(&a))).unwrap();
        let b_src = topology.add(Box::new(FeederSource::new(&b))).unwrap();
        let block = topology
            .add(Box::new(TwoToOne::new("/volk/subtract", volk_kernels::arith::subtract_f32, None)))
            .unwrap();
        let (sink, handle) = CollectorSink::new(DType::of::<f32>());
        let sink = topology.add(Box::new(sink)).unwrap();
        topology.connect(a_src, 0, block, 0).unwrap();
        topology.connect(b_src, 0, block, 1).unwrap();
        topology.connect(block, 0, sink, 0).unwrap();
        topology.run();

        assert_eq!(handle.elements::<f32>(), vec![-1.0f32; 300]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn output_ignores_how_inputs_are_chunked(
            a in prop::collection::vec(-1000i16..1000, 1..3000),
            a_chunk in 1usize..700,
            b_chunk in 1usize..700,
        ) {
            let a = a.iter().map(|x| *x as f32).collect::<Vec<_>>();
            let b = a.iter().map(|x| x * 0.5).collect::<Vec<_>>();

            let mut topology = Topology::default();
            let a_src = topology
                .add(Box::new(FeederSource::new(&a).with_elements_per_work(a_chunk)))
                .unwrap();
            let b_src = topology
                .add(Box::new(FeederSource::new(&b).with_elements_per_work(b_chunk)))
                .unwrap();
            let block = topology
                .add(Box::new(TwoToOne::new("/volk/subtract", volk_kernels::arith::subtract_f32, None)))
                .unwrap();
            let (sink, handle) = CollectorSink::new(DType::of::<f32>());
            let sink = topology.add(Box::new(sink)).unwrap();
            topology.connect(a_src, 0usize, block, 0usize).unwrap();
            topology.connect(b_src, 0usize, block, 1usize).unwrap();
            topology.connect(block, 0usize, sink, 0usize).unwrap();
            topology.run();

            prop_assert_eq!(handle.elements::<f32>(), b);
        }
    }
}

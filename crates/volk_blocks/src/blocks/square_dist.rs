//! Squared distance from a fixed complex point, optionally scaled.
use num::complex::Complex32;
use volk_kernels::complex;

use crate::allocator::volk_descriptor;
use crate::config::{DEFAULT_SCALAR_GETTER, DEFAULT_SCALAR_SETTER, SQUARE_DIST_EPSILON};
use crate::dtype::DType;
use crate::framework::{Block, BlockDescriptor, WorkIo};
use crate::registry::BlockRegistry;
use crate::value::{call_handlers, CallHandler, ScalarParam, Value};
use crate::Result;

type SquareDistFn = fn(&mut [f32], Complex32, &[Complex32], f32);

fn unscaled(out: &mut [f32], point: Complex32, input: &[Complex32], _scalar: f32) {
    complex::square_dist_c32(out, point, input);
}

/// Which kernel a [SquareDist] runs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Scaling {
    /// Skip the multiply whenever the scalar is 1.
    Adaptive,
    Always,
}

/// `|p - x|² · s` for each input sample `x`, with `p` set by `setComplexInput` and `s` by `setScalar`.
///
/// The point starts at zero and the scalar at one.
pub struct SquareDist {
    descriptor: BlockDescriptor,
    point: ScalarParam<Complex32>,
    scalar: ScalarParam<f32>,
    scaling: Scaling,
    unscaled: bool,
    kernel: SquareDistFn,
}

impl SquareDist {
    pub fn new(path: &'static str, scaling: Scaling) -> SquareDist {
        let mut block = SquareDist {
            descriptor: volk_descriptor(path)
                .input(DType::of::<Complex32>())
                .output(DType::of::<f32>()),
            point: ScalarParam::new("complexInput", "setComplexInput", Complex32::new(0.0, 0.0)),
            scalar: ScalarParam::new(DEFAULT_SCALAR_GETTER, DEFAULT_SCALAR_SETTER, 1.0),
            scaling,
            unscaled: false,
            kernel: complex::square_dist_scalar_mult_c32,
        };
        block.select_kernel();
        block
    }

    /// Whether the next call to work skips the multiply.
    pub fn is_unscaled(&self) -> bool {
        self.unscaled
    }

    fn select_kernel(&mut self) {
        self.unscaled =
            self.scaling == Scaling::Adaptive && (self.scalar.get() - 1.0).abs() <= SQUARE_DIST_EPSILON;
        self.kernel = if self.unscaled {
            unscaled
        } else {
            complex::square_dist_scalar_mult_c32
        };
    }
}

impl Block for SquareDist {
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
            &mut output.slice_mut::<f32>()[..n],
            self.point.get(),
            &input.slice::<Complex32>()[..n],
            self.scalar.get(),
        );
        input.consume(n);
        output.produce(n);
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let result = call_handlers(self.descriptor.path, name, args, &mut [&mut self.point, &mut self.scalar])?;
        if name == self.point.setter() || name == self.scalar.setter() {
            self.select_kernel();
        }
        Ok(result)
    }

    fn calls(&self) -> Vec<&'static str> {
        let mut names = self.point.names();
        names.extend(self.scalar.names());
        names
    }
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_fixed("/volk/square_dist", |path| {
        Box::new(SquareDist::new(path, Scaling::Adaptive))
    })?;
    registry.register_fixed("/volk/square_dist_scalar_mult", |path| {
        Box::new(SquareDist::new(path, Scaling::Always))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::framework::{CollectorSink, FeederSource, Topology};

    fn run(block: SquareDist, point: Complex32, scalar: f32, data: &[Complex32]) -> Vec<f32> {
        let mut topology = Topology::default();
        let src = topology.add(Box::new(FeederSource::new(data))).unwrap();
        let id = topology.add(Box::new(block)).unwrap();
        let (sink, handle) = CollectorSink::new(DType::of::<f32>());
        let dst = topology.add(Box::new(sink)).unwrap();
        topology.connect(src, 0, id, 0).unwrap();
        topology.connect(id, 0, dst, 0).unwrap();
        topology.call(id, "setComplexInput", &[Value::C32(point)]).unwrap();
        topology.call(id, "setScalar", &[Value::F32(scalar)]).unwrap();
        topology.run();
        handle.elements::<f32>()
    }

    #[test]
    fn test_kernel_follows_scalar() {
        let mut block = SquareDist::new("/volk/square_dist", Scaling::Adaptive);
        assert!(block.is_unscaled());

        block.call("setScalar", &[Value::F32(2.0)]).unwrap();
        assert!(!block.is_unscaled());

        block.call("setScalar", &[Value::F32(1.0 + 5e-7)]).unwrap();
        assert!(block.is_unscaled());

        let always = SquareDist::new("/volk/square_dist_scalar_mult", Scaling::Always);
        assert!(!always.is_unscaled());
    }

    #[test]
    fn test_only_setters_reselect() {
        let mut block = SquareDist::new("/volk/square_dist", Scaling::Adaptive);
        block.unscaled = false;

        block.call("scalar", &[]).unwrap();
        block.call("complexInput", &[]).unwrap();
        assert!(!block.is_unscaled());
        assert!(block.call("setScalar", &[Value::I32(1)]).is_err());
        assert!(!block.is_unscaled());

        block.call("setComplexInput", &[Value::C32(Complex32::new(1.0, 0.0))]).unwrap();
        assert!(block.is_unscaled());
    }

    #[test]
    fn test_distances() {
        let data = [
            Complex32::new(1.0, 1.0),
            Complex32::new(4.0, 5.0),
            Complex32::new(-1.0, 1.0),
        ];
        let point = Complex32::new(1.0, 1.0);

        let got = run(SquareDist::new("/volk/square_dist", Scaling::Adaptive), point, 1.0, &data);
        assert_eq!(got, vec![0.0, 25.0, 4.0]);

        let got = run(SquareDist::new("/volk/square_dist", Scaling::Adaptive), point, 0.5, &data);
        assert_eq!(got, vec![0.0, 12.5, 2.0]);

        let got = run(
            SquareDist::new("/volk/square_dist_scalar_mult", Scaling::Always),
            point,
            3.0,
            &data,
        );
        assert_eq!(got, vec![0.0, 75.0, 12.0]);
    }

    #[test]
    fn test_defaults() {
        let mut block = SquareDist::new("/volk/square_dist_scalar_mult", Scaling::Always);
        assert_eq!(block.call("scalar", &[]).unwrap(), Value::F32(1.0));
        assert_eq!(
            block.call("complexInput", &[]).unwrap(),
            Value::C32(Complex32::new(0.0, 0.0))
        );
        assert_eq!(
            block.calls(),
            vec!["complexInput", "setComplexInput", "scalar", "setScalar"]
        );
    }
}

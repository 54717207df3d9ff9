use num::complex::Complex32;
use volk_kernels::complex;

use crate::allocator::volk_descriptor;
use crate::dtype::DType;
use crate::framework::{Block, BlockDescriptor, WorkIo};
use crate::registry::BlockRegistry;
use crate::value::{call_handlers, CallHandler, ScalarParam, Value};
use crate::Result;

/// Power spectral density in decibels.  The normalization factor and resolution bandwidth both start at one.
pub struct PowerSpectralDensity {
    descriptor: BlockDescriptor,
    normalization_factor: ScalarParam<f32>,
    rbw: ScalarParam<f32>,
}

impl PowerSpectralDensity {
    pub fn new(path: &'static str) -> PowerSpectralDensity {
        PowerSpectralDensity {
            descriptor: volk_descriptor(path)
                .input(DType::of::<Complex32>())
                .output(DType::of::<f32>()),
            normalization_factor: ScalarParam::new("normalizationFactor", "setNormalizationFactor", 1.0),
            rbw: ScalarParam::new("rbw", "setRBW", 1.0),
        }
    }
}

impl Block for PowerSpectralDensity {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [output], info) = io.split::<1, 1>();
        let n = info.min_elements;
        if n == 0 {
            return;
        }

        complex::power_spectral_density_c32(
            &mut output.slice_mut::<f32>()[..n],
            &input.slice::<Complex32>()[..n],
            self.normalization_factor.get(),
            self.rbw.get(),
        );
        input.consume(n);
        output.produce(n);
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        call_handlers(
            self.descriptor.path,
            name,
            args,
            &mut [&mut self.normalization_factor, &mut self.rbw],
        )
    }

    fn calls(&self) -> Vec<&'static str> {
        let mut names = self.normalization_factor.names();
        names.extend(self.rbw.names());
        names
    }
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_fixed("/volk/power_spectral_density", |path| {
        Box::new(PowerSpectralDensity::new(path))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::framework::{CollectorSink, FeederSource, Topology};

    #[test]
    fn test_density() {
        let data = [Complex32::new(10.0, 0.0), Complex32::new(0.0, 100.0)];
        let mut topology = Topology::default();
        let src = topology.add(Box::new(FeederSource::new(&data))).unwrap();
        let block = topology
            .add(Box::new(PowerSpectralDensity::new("/volk/power_spectral_density")))
            .unwrap();
        let (sink, handle) = CollectorSink::new(DType::of::<f32>());
        let dst = topology.add(Box::new(sink)).unwrap();
        topology.connect(src, 0, block, 0).unwrap();
        topology.connect(block, 0, dst, 0).unwrap();
        topology.call(block, "setRBW", &[Value::F32(10.0)]).unwrap();
        topology.run();

        // 10 log10(100 / 10) and 10 log10(10000 / 10).
        let got = handle.elements::<f32>();
        assert!((got[0] - 10.0).abs() < 1e-3, "{:?}", got);
        assert!((got[1] - 30.0).abs() < 1e-3, "{:?}", got);
    }

    #[test]
    fn test_calls() {
        let block = PowerSpectralDensity::new("/volk/power_spectral_density");
        assert_eq!(
            block.calls(),
            vec!["normalizationFactor", "setNormalizationFactor", "rbw", "setRBW"]
        );
    }
}

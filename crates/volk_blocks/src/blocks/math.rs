//! Elementwise real math: trig, roots, logs, exponentials, powers, and max/min.
use volk_kernels::{arith, math};

use crate::adapters::{OneToOne, OneToOneFn, OneToOneScalar, TwoToOne};
use crate::dispatch::{dispatch, unsupported, unsupported_mode};
use crate::dtype::DType;
use crate::framework::BoxedBlock;
use crate::registry::BlockRegistry;
use crate::Result;

const UNARY: &[(&str, OneToOneFn<f32, f32>)] = &[
    ("/volk/acos", math::acos_f32),
    ("/volk/asin", math::asin_f32),
    ("/volk/atan", math::atan_f32),
    ("/volk/cos", math::cos_f32),
    ("/volk/invsqrt", math::invsqrt_f32),
    ("/volk/log2", math::log2_f32),
    ("/volk/sin", math::sin_f32),
    ("/volk/sqrt", math::sqrt_f32),
    ("/volk/tan", math::tan_f32),
    ("/volk/tanh", math::tanh_f32),
];

/// `PRECISE` for the exact exponential, `FAST` for the bit-trick approximation.
pub fn make_exp(path: &'static str, mode: &str) -> Result<BoxedBlock> {
    let kernel: OneToOneFn<f32, f32> = match mode {
        "PRECISE" => math::exp_f32,
        "FAST" => math::exp_fast_f32,
        _ => return Err(unsupported_mode(path, mode)),
    };
    Ok(Box::new(OneToOne::new(path, kernel)))
}

/// Raises the `input` port to the power on the `exp` port.
pub fn make_pow(path: &'static str) -> BoxedBlock {
    Box::new(TwoToOne::new(path, math::pow_f32, Some(["exp", "input"])))
}

pub fn make_power(path: &'static str) -> BoxedBlock {
    Box::new(OneToOneScalar::new(path, math::power_f32, "power", "setPower"))
}

pub fn make_max(path: &'static str, dtype: DType) -> Result<BoxedBlock> {
    dispatch!(&[dtype], {
        (f32) => TwoToOne::new(path, arith::max_f32, None),
        (f64) => TwoToOne::new(path, arith::max_f64, None),
    });
    Err(unsupported(path, &[dtype, dtype], &[dtype], &[]))
}

pub fn make_min(path: &'static str, dtype: DType) -> Result<BoxedBlock> {
    dispatch!(&[dtype], {
        (f32) => TwoToOne::new(path, arith::min_f32, None),
        (f64) => TwoToOne::new(path, arith::min_f64, None),
    });
    Err(unsupported(path, &[dtype, dtype], &[dtype], &[]))
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    for (path, kernel) in UNARY.iter().copied() {
        registry.register_fixed(path, move |path| Box::new(OneToOne::new(path, kernel)))?;
    }

    registry.register_with_mode("/volk/exp", make_exp)?;
    registry.register_fixed("/volk/pow", make_pow)?;
    registry.register_fixed("/volk/power", make_power)?;
    registry.register_with_dtype("/volk/max", make_max)?;
    registry.register_with_dtype("/volk/min", make_min)?;
    Ok(())
}

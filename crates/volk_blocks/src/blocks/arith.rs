//! Vector arithmetic and bitwise operations.
use num::complex::Complex32;
use num::Complex;
use volk_kernels::{arith, bits, reduce};

use crate::adapters::{OneToOne, OneToOneScalar, TwoToOne};
use crate::config::{DEFAULT_SCALAR_GETTER, DEFAULT_SCALAR_SETTER};
use crate::dispatch::{dispatch, unsupported};
use crate::dtype::DType;
use crate::framework::BoxedBlock;
use crate::registry::BlockRegistry;
use crate::Result;

pub fn make_add(path: &'static str, in0: DType, in1: DType, out: DType) -> Result<BoxedBlock> {
    dispatch!(&[in0, in1, out], {
        (f32, f32, f32) => TwoToOne::new(path, arith::add_f32, None),
        (f32, f64, f64) => TwoToOne::new(path, arith::add_f32_f64, None),
        (f64, f64, f64) => TwoToOne::new(path, arith::add_f64, None),
        (Complex32, Complex32, Complex32) => TwoToOne::new(path, arith::add_c32, None),
        (Complex32, f32, Complex32) => TwoToOne::new(path, arith::add_c32_f32, None),
    });
    Err(unsupported(path, &[in0, in1], &[out], &[]))
}

pub fn make_divide(path: &'static str, in0: DType, in1: DType, out: DType) -> Result<BoxedBlock> {
    dispatch!(&[in0, in1, out], {
        (f32, f32, f32) => TwoToOne::new(path, arith::divide_f32, None),
        (Complex32, Complex32, Complex32) => TwoToOne::new(path, arith::divide_c32, None),
    });
    Err(unsupported(path, &[in0, in1], &[out], &[]))
}

pub fn make_multiply(path: &'static str, in0: DType, in1: DType, out: DType) -> Result<BoxedBlock> {
    dispatch!(&[in0, in1, out], {
        (f32, f64, f64) => TwoToOne::new(path, arith::multiply_f32_f64, None),
        (f64, f64, f64) => TwoToOne::new(path, arith::multiply_f64, None),
        (Complex<i16>, Complex<i16>, Complex<i16>) => TwoToOne::new(path, arith::multiply_c16, None),
        (Complex32, Complex32, Complex32) => TwoToOne::new(path, arith::multiply_c32, None),
        (Complex32, f32, Complex32) => TwoToOne::new(path, arith::multiply_c32_f32, None),
    });
    Err(unsupported(path, &[in0, in1], &[out], &[]))
}

pub fn make_multiply_scalar(path: &'static str, input: DType, out: DType, scalar: DType) -> Result<BoxedBlock> {
    dispatch!(&[input, out, scalar], {
        (f32, f32, f32) => OneToOneScalar::new(
            path,
            arith::multiply_scalar_f32,
            DEFAULT_SCALAR_GETTER,
            DEFAULT_SCALAR_SETTER,
        ),
        (Complex32, Complex32, Complex32) => OneToOneScalar::new(
            path,
            arith::multiply_scalar_c32,
            DEFAULT_SCALAR_GETTER,
            DEFAULT_SCALAR_SETTER,
        ),
    });
    Err(unsupported(path, &[input], &[out], &[scalar]))
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_with_dtypes3("/volk/add", make_add)?;
    registry.register_with_dtypes3("/volk/divide", make_divide)?;
    registry.register_with_dtypes3("/volk/multiply", make_multiply)?;
    registry.register_with_dtypes3("/volk/multiply_scalar", make_multiply_scalar)?;

    registry.register_fixed("/volk/add_scalar", |path| {
        Box::new(OneToOneScalar::new(
            path,
            arith::add_scalar_f32,
            DEFAULT_SCALAR_GETTER,
            DEFAULT_SCALAR_SETTER,
        ))
    })?;
    registry.register_fixed("/volk/subtract", |path| {
        Box::new(TwoToOne::new(path, arith::subtract_f32, None))
    })?;
    registry.register_fixed("/volk/and", |path| Box::new(TwoToOne::new(path, bits::and_i32, None)))?;
    registry.register_fixed("/volk/or", |path| Box::new(TwoToOne::new(path, bits::or_i32, None)))?;
    registry.register_fixed("/volk/reverse", |path| Box::new(OneToOne::new(path, bits::reverse_u32)))?;
    registry.register_fixed("/volk/max_star", |path| {
        Box::new(OneToOne::new(path, reduce::max_star_horizontal_i16))
    })?;
    registry.register_fixed("/volk/calc_spectral_noise_floor", |path| {
        Box::new(OneToOneScalar::new(
            path,
            reduce::calc_spectral_noise_floor_f32,
            "spectralExclusionValue",
            "setSpectralExclusionValue",
        ))
    })?;
    Ok(())
}

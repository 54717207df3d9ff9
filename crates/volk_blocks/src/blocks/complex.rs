//! Blocks over complex vectors: conjugation, magnitudes, phase, spectra, and conjugate products.
use num::complex::Complex32;
use num::Complex;
use volk_kernels::complex;

use crate::adapters::{OneToOne, OneToOneScalar, TwoToOne, TwoToOneScalar};
use crate::config::{DEFAULT_SCALAR_GETTER, DEFAULT_SCALAR_SETTER};
use crate::dispatch::{dispatch, unsupported};
use crate::dtype::DType;
use crate::framework::BoxedBlock;
use crate::registry::BlockRegistry;
use crate::Result;

pub fn make_magnitude(path: &'static str, input: DType, out: DType) -> Result<BoxedBlock> {
    dispatch!(&[input, out], {
        (Complex<i16>, i16) => OneToOne::new(path, complex::magnitude_c16),
        (Complex32, f32) => OneToOne::new(path, complex::magnitude_c32),
    });
    Err(unsupported(path, &[input], &[out], &[]))
}

pub fn make_multiply_conjugate(path: &'static str, in0: DType, in1: DType, out: DType) -> Result<BoxedBlock> {
    dispatch!(&[in0, in1, out], {
        (Complex<i8>, Complex<i8>, Complex<i16>) => TwoToOne::new(path, complex::multiply_conjugate_c8_c16, None),
        (Complex32, Complex32, Complex32) => TwoToOne::new(path, complex::multiply_conjugate_c32, None),
    });
    Err(unsupported(path, &[in0, in1], &[out], &[]))
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_with_dtypes2("/volk/magnitude", make_magnitude)?;
    registry.register_with_dtypes3("/volk/multiply_conjugate", make_multiply_conjugate)?;

    registry.register_fixed("/volk/conjugate", |path| {
        Box::new(OneToOne::new(path, complex::conjugate_c32))
    })?;
    registry.register_fixed("/volk/magnitude_squared", |path| {
        Box::new(OneToOne::new(path, complex::magnitude_squared_c32))
    })?;
    registry.register_fixed("/volk/atan2", |path| {
        Box::new(OneToOneScalar::new(
            path,
            complex::atan2_c32,
            "normalizationFactor",
            "setNormalizationFactor",
        ))
    })?;
    registry.register_fixed("/volk/power_spectrum", |path| {
        Box::new(OneToOneScalar::new(
            path,
            complex::power_spectrum_c32,
            "normalizationFactor",
            "setNormalizationFactor",
        ))
    })?;
    registry.register_fixed("/volk/multiply_conjugate_add", |path| {
        Box::new(TwoToOneScalar::new(
            path,
            complex::multiply_conjugate_add_c32,
            DEFAULT_SCALAR_GETTER,
            DEFAULT_SCALAR_SETTER,
            None,
        ))
    })?;
    registry.register_fixed("/volk/multiply_conjugate_scaled", |path| {
        Box::new(TwoToOneScalar::new(
            path,
            complex::multiply_conjugate_scaled_c8_c32,
            DEFAULT_SCALAR_GETTER,
            DEFAULT_SCALAR_SETTER,
            None,
        ))
    })?;
    Ok(())
}

//! Type conversion, slicing, and complex interleaving.
use num::complex::Complex32;
use num::Complex;
use volk_kernels::convert;

use crate::adapters::{OneToOne, OneToOneScalar, OneToTwo, OneToTwoScalar, TwoToOne, TwoToOneScalar};
use crate::config::{DEFAULT_SCALAR_GETTER, DEFAULT_SCALAR_SETTER};
use crate::dispatch::{dispatch, unsupported};
use crate::dtype::DType;
use crate::framework::BoxedBlock;
use crate::registry::BlockRegistry;
use crate::Result;

const COMPLEX_PORTS: [&str; 2] = ["real", "imag"];

pub fn make_binary_slicer(path: &'static str, input: DType, out: DType) -> Result<BoxedBlock> {
    dispatch!(&[input, out], {
        (f32, i8) => OneToOne::new(path, convert::binary_slicer_f32_i8),
        (f32, i32) => OneToOne::new(path, convert::binary_slicer_f32_i32),
    });
    Err(unsupported(path, &[input], &[out], &[]))
}

pub fn make_convert(path: &'static str, input: DType, out: DType) -> Result<BoxedBlock> {
    dispatch!(&[input, out], {
        (i8, i16) => OneToOne::new(path, convert::convert_i8_i16),
        (i16, i8) => OneToOne::new(path, convert::convert_i16_i8),
        (f32, f64) => OneToOne::new(path, convert::convert_f32_f64),
        (f64, f32) => OneToOne::new(path, convert::convert_f64_f32),
        (Complex<i16>, Complex32) => OneToOne::new(path, convert::convert_c16_c32),
        (Complex32, Complex<i16>) => OneToOne::new(path, convert::convert_c32_c16),
    });
    Err(unsupported(path, &[input], &[out], &[]))
}

pub fn make_convert_scaled(path: &'static str, input: DType, out: DType, scalar: DType) -> Result<BoxedBlock> {
    macro_rules! scaled {
        ($kernel: expr) => {
            OneToOneScalar::new(path, $kernel, DEFAULT_SCALAR_GETTER, DEFAULT_SCALAR_SETTER)
        };
    }

    dispatch!(&[input, out, scalar], {
        (f32, i8, f32) => scaled!(convert::convert_scaled_f32_i8),
        (f32, i16, f32) => scaled!(convert::convert_scaled_f32_i16),
        (f32, i32, f32) => scaled!(convert::convert_scaled_f32_i32),
        (i8, f32, f32) => scaled!(convert::convert_scaled_i8_f32),
        (i16, f32, f32) => scaled!(convert::convert_scaled_i16_f32),
        (i32, f32, f32) => scaled!(convert::convert_scaled_i32_f32),
    });
    Err(unsupported(path, &[input], &[out], &[scalar]))
}

/// Splits complex input into `real` and `imag` outputs of the same type.
pub fn make_deinterleave(path: &'static str, input: DType, out: DType) -> Result<BoxedBlock> {
    dispatch!(&[input, out], {
        (Complex<i8>, i16) => OneToTwo::new(path, convert::deinterleave_c8_i16, COMPLEX_PORTS),
        (Complex<i16>, i16) => OneToTwo::new(path, convert::deinterleave_c16_i16, COMPLEX_PORTS),
        (Complex32, f32) => OneToTwo::new(path, convert::deinterleave_c32_f32, COMPLEX_PORTS),
        (Complex32, f64) => OneToTwo::new(path, convert::deinterleave_c32_f64, COMPLEX_PORTS),
    });
    Err(unsupported(path, &[input], &[out, out], &[]))
}

pub fn make_deinterleave_real(path: &'static str, input: DType, out: DType) -> Result<BoxedBlock> {
    dispatch!(&[input, out], {
        (Complex<i8>, i8) => OneToOne::new(path, convert::deinterleave_real_c8_i8),
        (Complex<i8>, i16) => OneToOne::new(path, convert::deinterleave_real_c8_i16),
        (Complex<i16>, i8) => OneToOne::new(path, convert::deinterleave_real_c16_i8),
        (Complex<i16>, i16) => OneToOne::new(path, convert::deinterleave_real_c16_i16),
        (Complex32, f32) => OneToOne::new(path, convert::deinterleave_real_c32_f32),
        (Complex32, f64) => OneToOne::new(path, convert::deinterleave_real_c32_f64),
    });
    Err(unsupported(path, &[input], &[out], &[]))
}

pub fn make_deinterleave_real_scaled(
    path: &'static str,
    input: DType,
    out: DType,
    scalar: DType,
) -> Result<BoxedBlock> {
    macro_rules! scaled {
        ($kernel: expr) => {
            OneToOneScalar::new(path, $kernel, DEFAULT_SCALAR_GETTER, DEFAULT_SCALAR_SETTER)
        };
    }

    dispatch!(&[input, out, scalar], {
        (Complex<i8>, f32, f32) => scaled!(convert::deinterleave_real_scaled_c8_f32),
        (Complex<i16>, f32, f32) => scaled!(convert::deinterleave_real_scaled_c16_f32),
        (Complex32, i16, f32) => scaled!(convert::deinterleave_real_scaled_c32_i16),
    });
    Err(unsupported(path, &[input], &[out], &[scalar]))
}

pub fn make_deinterleave_scaled(path: &'static str, input: DType, out: DType, scalar: DType) -> Result<BoxedBlock> {
    macro_rules! scaled {
        ($kernel: expr) => {
            OneToTwoScalar::new(
                path,
                $kernel,
                DEFAULT_SCALAR_GETTER,
                DEFAULT_SCALAR_SETTER,
                COMPLEX_PORTS,
            )
        };
    }

    dispatch!(&[input, out, scalar], {
        (Complex<i8>, f32, f32) => scaled!(convert::deinterleave_scaled_c8_f32),
        (Complex<i16>, f32, f32) => scaled!(convert::deinterleave_scaled_c16_f32),
    });
    Err(unsupported(path, &[input], &[out, out], &[scalar]))
}

pub(crate) fn register(registry: &mut BlockRegistry) -> Result<()> {
    registry.register_with_dtypes2("/volk/binary_slicer", make_binary_slicer)?;
    registry.register_with_dtypes2("/volk/convert", make_convert)?;
    registry.register_with_dtypes3("/volk/convert_scaled", make_convert_scaled)?;
    registry.register_with_dtypes2("/volk/deinterleave", make_deinterleave)?;
    registry.register_with_dtypes2("/volk/deinterleave_real", make_deinterleave_real)?;
    registry.register_with_dtypes3("/volk/deinterleave_real_scaled", make_deinterleave_real_scaled)?;
    registry.register_with_dtypes3("/volk/deinterleave_scaled", make_deinterleave_scaled)?;

    registry.register_fixed("/volk/deinterleave_imag", |path| {
        Box::new(OneToOne::new(path, convert::deinterleave_imag_c32_f32))
    })?;
    registry.register_fixed("/volk/interleave", |path| {
        Box::new(TwoToOne::new(path, convert::interleave_f32_c32, Some(COMPLEX_PORTS)))
    })?;
    registry.register_fixed("/volk/interleave_scaled", |path| {
        Box::new(TwoToOneScalar::new(
            path,
            convert::interleave_scaled_f32_c16,
            DEFAULT_SCALAR_GETTER,
            DEFAULT_SCALAR_SETTER,
            Some(COMPLEX_PORTS),
        ))
    })?;
    Ok(())
}

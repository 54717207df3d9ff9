//! Type conversion, scaling, interleaving and deinterleaving.
//!
//! Float to integer conversions round to nearest and saturate at the bounds of the target type; NaN becomes 0.  Integer
//! to integer conversions shift by whole bytes, so the significant bits line up.
use num::complex::Complex32;

use crate::{map1, map2, ComplexI16, ComplexI8};

/// Round and saturate a float into an integer type.
///
/// Rust's float to integer casts already saturate and send NaN to 0, so rounding first is all that is required.
macro_rules! round_sat {
    ($x: expr, $t: ty) => {
        ($x).round() as $t
    };
}

pub fn convert_i8_i16(out: &mut [i16], input: &[i8]) {
    map1(out, input, |x| (x as i16) << 8);
}

/// Keep the high byte.
pub fn convert_i16_i8(out: &mut [i8], input: &[i16]) {
    map1(out, input, |x| (x >> 8) as i8);
}

pub fn convert_f32_f64(out: &mut [f64], input: &[f32]) {
    map1(out, input, |x| x as f64);
}

pub fn convert_f64_f32(out: &mut [f32], input: &[f64]) {
    map1(out, input, |x| x as f32);
}

pub fn convert_c16_c32(out: &mut [Complex32], input: &[ComplexI16]) {
    map1(out, input, |x| Complex32::new(x.re as f32, x.im as f32));
}

pub fn convert_c32_c16(out: &mut [ComplexI16], input: &[Complex32]) {
    map1(out, input, |x| ComplexI16::new(round_sat!(x.re, i16), round_sat!(x.im, i16)));
}

pub fn convert_scaled_f32_i8(out: &mut [i8], input: &[f32], scalar: f32) {
    map1(out, input, |x| round_sat!(x * scalar, i8));
}

pub fn convert_scaled_f32_i16(out: &mut [i16], input: &[f32], scalar: f32) {
    map1(out, input, |x| round_sat!(x * scalar, i16));
}

pub fn convert_scaled_f32_i32(out: &mut [i32], input: &[f32], scalar: f32) {
    map1(out, input, |x| round_sat!(x * scalar, i32));
}

pub fn convert_scaled_i8_f32(out: &mut [f32], input: &[i8], scalar: f32) {
    let inverse = 1.0 / scalar;
    map1(out, input, |x| x as f32 * inverse);
}

pub fn convert_scaled_i16_f32(out: &mut [f32], input: &[i16], scalar: f32) {
    let inverse = 1.0 / scalar;
    map1(out, input, |x| x as f32 * inverse);
}

pub fn convert_scaled_i32_f32(out: &mut [f32], input: &[i32], scalar: f32) {
    let inverse = 1.0 / scalar;
    map1(out, input, |x| x as f32 * inverse);
}

/// 1 for every non-negative element, 0 otherwise.
pub fn binary_slicer_f32_i8(out: &mut [i8], input: &[f32]) {
    map1(out, input, |x| (x >= 0.0) as i8);
}

/// 1 for every non-negative element, 0 otherwise.
pub fn binary_slicer_f32_i32(out: &mut [i32], input: &[f32]) {
    map1(out, input, |x| (x >= 0.0) as i32);
}

/// Split into real and imaginary parts, each widened to `i16` by shifting into the high byte.
pub fn deinterleave_c8_i16(real: &mut [i16], imag: &mut [i16], input: &[ComplexI8]) {
    for ((r, i), x) in real.iter_mut().zip(imag.iter_mut()).zip(input.iter()) {
        *r = (x.re as i16) << 8;
        *i = (x.im as i16) << 8;
    }
}

pub fn deinterleave_c16_i16(real: &mut [i16], imag: &mut [i16], input: &[ComplexI16]) {
    for ((r, i), x) in real.iter_mut().zip(imag.iter_mut()).zip(input.iter()) {
        *r = x.re;
        *i = x.im;
    }
}

pub fn deinterleave_c32_f32(real: &mut [f32], imag: &mut [f32], input: &[Complex32]) {
    for ((r, i), x) in real.iter_mut().zip(imag.iter_mut()).zip(input.iter()) {
        *r = x.re;
        *i = x.im;
    }
}

pub fn deinterleave_c32_f64(real: &mut [f64], imag: &mut [f64], input: &[Complex32]) {
    for ((r, i), x) in real.iter_mut().zip(imag.iter_mut()).zip(input.iter()) {
        *r = x.re as f64;
        *i = x.im as f64;
    }
}

/// Split into real and imaginary parts, each divided by `scalar`.
pub fn deinterleave_scaled_c8_f32(real: &mut [f32], imag: &mut [f32], input: &[ComplexI8], scalar: f32) {
    let inverse = 1.0 / scalar;
    for ((r, i), x) in real.iter_mut().zip(imag.iter_mut()).zip(input.iter()) {
        *r = x.re as f32 * inverse;
        *i = x.im as f32 * inverse;
    }
}

/// Split into real and imaginary parts, each divided by `scalar`.
pub fn deinterleave_scaled_c16_f32(real: &mut [f32], imag: &mut [f32], input: &[ComplexI16], scalar: f32) {
    let inverse = 1.0 / scalar;
    for ((r, i), x) in real.iter_mut().zip(imag.iter_mut()).zip(input.iter()) {
        *r = x.re as f32 * inverse;
        *i = x.im as f32 * inverse;
    }
}

pub fn deinterleave_imag_c32_f32(out: &mut [f32], input: &[Complex32]) {
    map1(out, input, |x| x.im);
}

pub fn deinterleave_real_c8_i8(out: &mut [i8], input: &[ComplexI8]) {
    map1(out, input, |x| x.re);
}

/// The real part, scaled by 128 so that full-scale `i8` maps onto the positive range of `i16`.
pub fn deinterleave_real_c8_i16(out: &mut [i16], input: &[ComplexI8]) {
    map1(out, input, |x| (x.re as i16) * 128);
}

/// The high byte of the real part.
pub fn deinterleave_real_c16_i8(out: &mut [i8], input: &[ComplexI16]) {
    map1(out, input, |x| (x.re >> 8) as i8);
}

pub fn deinterleave_real_c16_i16(out: &mut [i16], input: &[ComplexI16]) {
    map1(out, input, |x| x.re);
}

pub fn deinterleave_real_c32_f32(out: &mut [f32], input: &[Complex32]) {
    map1(out, input, |x| x.re);
}

pub fn deinterleave_real_c32_f64(out: &mut [f64], input: &[Complex32]) {
    map1(out, input, |x| x.re as f64);
}

pub fn deinterleave_real_scaled_c8_f32(out: &mut [f32], input: &[ComplexI8], scalar: f32) {
    let inverse = 1.0 / scalar;
    map1(out, input, |x| x.re as f32 * inverse);
}

pub fn deinterleave_real_scaled_c16_f32(out: &mut [f32], input: &[ComplexI16], scalar: f32) {
    let inverse = 1.0 / scalar;
    map1(out, input, |x| x.re as f32 * inverse);
}

pub fn deinterleave_real_scaled_c32_i16(out: &mut [i16], input: &[Complex32], scalar: f32) {
    map1(out, input, |x| round_sat!(x.re * scalar, i16));
}

pub fn interleave_f32_c32(out: &mut [Complex32], real: &[f32], imag: &[f32]) {
    map2(out, real, imag, Complex32::new);
}

/// Combine real and imaginary vectors into fixed-point complex values, multiplying both by `scalar` first.
pub fn interleave_scaled_f32_c16(out: &mut [ComplexI16], real: &[f32], imag: &[f32], scalar: f32) {
    map2(out, real, imag, |r, i| {
        ComplexI16::new(round_sat!(r * scalar, i16), round_sat!(i * scalar, i16))
    });
}

//! Kernels specific to complex vectors: conjugates, magnitudes, phases and power measurements.
use num::complex::Complex32;

use crate::{map1, map2, ComplexI16, ComplexI8};

/// `10 * log10(x)`, the decibel conversion shared by the spectrum kernels.
#[inline(always)]
fn db(x: f32) -> f32 {
    10.0 * x.log10()
}

pub fn conjugate_c32(out: &mut [Complex32], input: &[Complex32]) {
    map1(out, input, |x| x.conj());
}

pub fn magnitude_c32(out: &mut [f32], input: &[Complex32]) {
    map1(out, input, |x| x.norm());
}

/// Magnitude of fixed-point complex values.
///
/// Components are normalized to `[-1, 1]` by `i16::MAX`, the magnitude taken in floating point, and the result scaled
/// back and truncated.
pub fn magnitude_c16(out: &mut [i16], input: &[ComplexI16]) {
    const SCALE: f32 = i16::MAX as f32;

    map1(out, input, |x| {
        let scaled = Complex32::new(x.re as f32 / SCALE, x.im as f32 / SCALE);
        (scaled.norm() * SCALE) as i16
    });
}

pub fn magnitude_squared_c32(out: &mut [f32], input: &[Complex32]) {
    map1(out, input, |x| x.norm_sqr());
}

/// Phase of each element, divided by `normalization_factor`.
pub fn atan2_c32(out: &mut [f32], input: &[Complex32], normalization_factor: f32) {
    let inverse = 1.0 / normalization_factor;
    map1(out, input, |x| x.im.atan2(x.re) * inverse);
}

/// Power in decibels of each element after dividing it by `normalization_factor`.
pub fn power_spectrum_c32(out: &mut [f32], input: &[Complex32], normalization_factor: f32) {
    let inverse = 1.0 / normalization_factor;
    map1(out, input, |x| db((x * inverse).norm_sqr()));
}

/// Like [power_spectrum_c32], but also divides the power by the resolution bandwidth before the decibel conversion.
pub fn power_spectral_density_c32(out: &mut [f32], input: &[Complex32], normalization_factor: f32, rbw: f32) {
    let inverse = 1.0 / normalization_factor;
    let inverse_rbw = 1.0 / rbw;
    map1(out, input, |x| db((x * inverse).norm_sqr() * inverse_rbw));
}

/// `a * conj(b)`, widening `i8` components to `i16`.
pub fn multiply_conjugate_c8_c16(out: &mut [ComplexI16], a: &[ComplexI8], b: &[ComplexI8]) {
    map2(out, a, b, |x, y| {
        let (ar, ai) = (x.re as i16, x.im as i16);
        let (br, bi) = (y.re as i16, -(y.im as i16));
        ComplexI16::new(
            ar.wrapping_mul(br).wrapping_sub(ai.wrapping_mul(bi)),
            ar.wrapping_mul(bi).wrapping_add(ai.wrapping_mul(br)),
        )
    });
}

pub fn multiply_conjugate_c32(out: &mut [Complex32], a: &[Complex32], b: &[Complex32]) {
    map2(out, a, b, |x, y| x * y.conj());
}

/// `a + conj(b) * scalar`.
pub fn multiply_conjugate_add_c32(out: &mut [Complex32], a: &[Complex32], b: &[Complex32], scalar: Complex32) {
    map2(out, a, b, |x, y| x + y.conj() * scalar);
}

/// `a * conj(b) / scalar`, computed in floating point.
pub fn multiply_conjugate_scaled_c8_c32(out: &mut [Complex32], a: &[ComplexI8], b: &[ComplexI8], scalar: f32) {
    let inverse = 1.0 / scalar;
    map2(out, a, b, |x, y| {
        let x = Complex32::new(x.re as f32, x.im as f32);
        let y = Complex32::new(y.re as f32, y.im as f32);
        x * y.conj() * inverse
    });
}

/// Squared distance from `point` to every element.
pub fn square_dist_c32(out: &mut [f32], point: Complex32, input: &[Complex32]) {
    map1(out, input, |x| (point - x).norm_sqr());
}

/// Squared distance from `point` to every element, multiplied by `scalar`.
pub fn square_dist_scalar_mult_c32(out: &mut [f32], point: Complex32, input: &[Complex32], scalar: f32) {
    map1(out, input, |x| (point - x).norm_sqr() * scalar);
}

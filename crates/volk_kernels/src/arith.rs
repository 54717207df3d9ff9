//! Elementwise arithmetic over real and complex vectors.
//!
//! Mixed-type kernels such as [add_f32_f64] widen the narrower operand before operating.  Complex `i16` arithmetic
//! wraps on overflow.
use num::complex::Complex32;

use crate::{map1, map2, ComplexI16};

pub fn add_f32(out: &mut [f32], a: &[f32], b: &[f32]) {
    map2(out, a, b, |x, y| x + y);
}

pub fn add_f32_f64(out: &mut [f64], a: &[f32], b: &[f64]) {
    map2(out, a, b, |x, y| x as f64 + y);
}

pub fn add_f64(out: &mut [f64], a: &[f64], b: &[f64]) {
    map2(out, a, b, |x, y| x + y);
}

pub fn add_c32(out: &mut [Complex32], a: &[Complex32], b: &[Complex32]) {
    map2(out, a, b, |x, y| x + y);
}

/// Add a real vector to the real part of a complex vector.
pub fn add_c32_f32(out: &mut [Complex32], a: &[Complex32], b: &[f32]) {
    map2(out, a, b, |x, y| x + y);
}

pub fn add_scalar_f32(out: &mut [f32], input: &[f32], scalar: f32) {
    map1(out, input, |x| x + scalar);
}

pub fn subtract_f32(out: &mut [f32], a: &[f32], b: &[f32]) {
    map2(out, a, b, |x, y| x - y);
}

pub fn multiply_f32_f64(out: &mut [f64], a: &[f32], b: &[f64]) {
    map2(out, a, b, |x, y| x as f64 * y);
}

pub fn multiply_f64(out: &mut [f64], a: &[f64], b: &[f64]) {
    map2(out, a, b, |x, y| x * y);
}

/// Complex multiply with wrapping `i16` arithmetic.
pub fn multiply_c16(out: &mut [ComplexI16], a: &[ComplexI16], b: &[ComplexI16]) {
    map2(out, a, b, |x, y| {
        ComplexI16::new(
            x.re.wrapping_mul(y.re).wrapping_sub(x.im.wrapping_mul(y.im)),
            x.re.wrapping_mul(y.im).wrapping_add(x.im.wrapping_mul(y.re)),
        )
    });
}

pub fn multiply_c32(out: &mut [Complex32], a: &[Complex32], b: &[Complex32]) {
    map2(out, a, b, |x, y| x * y);
}

/// Scale each complex element by the matching real element.
pub fn multiply_c32_f32(out: &mut [Complex32], a: &[Complex32], b: &[f32]) {
    map2(out, a, b, |x, y| x * y);
}

pub fn multiply_scalar_f32(out: &mut [f32], input: &[f32], scalar: f32) {
    map1(out, input, |x| x * scalar);
}

pub fn multiply_scalar_c32(out: &mut [Complex32], input: &[Complex32], scalar: Complex32) {
    map1(out, input, |x| x * scalar);
}

pub fn divide_f32(out: &mut [f32], a: &[f32], b: &[f32]) {
    map2(out, a, b, |x, y| x / y);
}

pub fn divide_c32(out: &mut [Complex32], a: &[Complex32], b: &[Complex32]) {
    map2(out, a, b, |x, y| x / y);
}

pub fn max_f32(out: &mut [f32], a: &[f32], b: &[f32]) {
    map2(out, a, b, |x, y| if x > y { x } else { y });
}

pub fn max_f64(out: &mut [f64], a: &[f64], b: &[f64]) {
    map2(out, a, b, |x, y| if x > y { x } else { y });
}

pub fn min_f32(out: &mut [f32], a: &[f32], b: &[f32]) {
    map2(out, a, b, |x, y| if x < y { x } else { y });
}

pub fn min_f64(out: &mut [f64], a: &[f64], b: &[f64]) {
    map2(out, a, b, |x, y| if x < y { x } else { y });
}

/// Divide every element by `scalar`, in place.
pub fn normalize_f32(vec: &mut [f32], scalar: f32) {
    let inverse = 1.0 / scalar;
    for x in vec.iter_mut() {
        *x *= inverse;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::close_floats::{close_complex32, close_slices32};

    #[test]
    fn test_add_mixed() {
        let mut out = [0.0f64; 3];
        add_f32_f64(&mut out, &[1.5, -2.0, 0.25], &[0.5, 2.0, 1.0]);
        assert_eq!(out, [2.0, 0.0, 1.25]);

        let mut out = [Complex32::default(); 2];
        add_c32_f32(
            &mut out,
            &[Complex32::new(1.0, 2.0), Complex32::new(-1.0, 0.5)],
            &[3.0, 1.0],
        );
        assert_eq!(out, [Complex32::new(4.0, 2.0), Complex32::new(0.0, 0.5)]);
    }

    #[test]
    fn test_multiply_c16() {
        let mut out = [ComplexI16::default(); 2];
        multiply_c16(
            &mut out,
            &[ComplexI16::new(0, 1), ComplexI16::new(2, 3)],
            &[ComplexI16::new(-9, -8), ComplexI16::new(4, -5)],
        );
        assert_eq!(out, [ComplexI16::new(8, -9), ComplexI16::new(23, 2)]);
    }

    #[test]
    fn test_multiply_c16_wraps() {
        let mut out = [ComplexI16::default(); 1];
        multiply_c16(
            &mut out,
            &[ComplexI16::new(i16::MAX, 0)],
            &[ComplexI16::new(2, 0)],
        );
        assert_eq!(out[0], ComplexI16::new(-2, 0));
    }

    #[test]
    fn test_divide_c32() {
        let mut out = [Complex32::default(); 3];
        divide_c32(
            &mut out,
            &[
                Complex32::new(-3.0, -2.0),
                Complex32::new(-1.0, 1.0),
                Complex32::new(2.0, 3.0),
            ],
            &[
                Complex32::new(0.5, -0.25),
                Complex32::new(0.125, -8.0),
                Complex32::new(4.0, -2.0),
            ],
        );
        let expected = [
            Complex32::new(-3.2, -5.6),
            Complex32::new(-0.12692, -0.12301),
            Complex32::new(0.1, 0.8),
        ];
        for (o, e) in out.iter().zip(expected.iter()) {
            close_complex32(*o, *e, 1e-3);
        }
    }

    #[test]
    fn test_min_max() {
        let a = [1.0f32, -2.0, 3.0];
        let b = [0.5f32, -1.0, 3.5];
        let mut out = [0.0f32; 3];

        max_f32(&mut out, &a, &b);
        assert_eq!(out, [1.0, -1.0, 3.5]);
        min_f32(&mut out, &a, &b);
        assert_eq!(out, [0.5, -2.0, 3.0]);
    }

    #[test]
    fn test_normalize() {
        let mut vec = [2.0f32, -4.0, 10.0];
        normalize_f32(&mut vec, 4.0);
        close_slices32(&vec, &[0.5, -1.0, 2.5], 1e-6);
    }

    #[test]
    fn test_shortest_slice_wins() {
        let mut out = [0.0f32; 4];
        add_f32(&mut out, &[1.0, 2.0], &[1.0, 2.0, 3.0]);
        assert_eq!(out, [2.0, 4.0, 0.0, 0.0]);
    }
}

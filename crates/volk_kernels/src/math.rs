//! Elementwise transcendental functions over `f32`.
use crate::{map1, map2};

macro_rules! unary_f32 {
    ($name:ident, $method:ident) => {
        pub fn $name(out: &mut [f32], input: &[f32]) {
            map1(out, input, f32::$method);
        }
    };
}

unary_f32!(acos_f32, acos);
unary_f32!(asin_f32, asin);
unary_f32!(atan_f32, atan);
unary_f32!(cos_f32, cos);
unary_f32!(sin_f32, sin);
unary_f32!(tan_f32, tan);
unary_f32!(tanh_f32, tanh);
unary_f32!(sqrt_f32, sqrt);
unary_f32!(log2_f32, log2);
// Full-precision `e^x`; see `exp_fast_f32` for the approximation.
unary_f32!(exp_f32, exp);

/// `1 / sqrt(x)`.
pub fn invsqrt_f32(out: &mut [f32], input: &[f32]) {
    map1(out, input, |x| x.sqrt().recip());
}

// Constants for the exponent-field trick: 2^23, the bit pattern of 1.0, and a correction minimizing mean error.
const FAST_EXP_A: f32 = 8_388_608.0;
const FAST_EXP_B: f32 = 1_065_353_216.0;
const FAST_EXP_C: f32 = 60_801.0;

/// Approximate `e^x` by writing `x / ln 2` directly into the exponent field.
///
/// Relative error is up to about 7%.  Results below the smallest representable value flush to zero, and results
/// above the largest saturate to `f32::MAX`.
pub fn exp_fast_f32(out: &mut [f32], input: &[f32]) {
    map1(out, input, |x| {
        let bits = (FAST_EXP_A / std::f32::consts::LN_2) * x + (FAST_EXP_B - FAST_EXP_C);
        // The float-to-int cast saturates, sending NaN and negative patterns to 0.
        f32::from_bits((bits as u32).min(f32::MAX.to_bits()))
    });
}

/// `base ^ exponent`, elementwise.
///
/// The exponent vector comes first, matching the port order of the block which binds this kernel.
pub fn pow_f32(out: &mut [f32], exponent: &[f32], base: &[f32]) {
    map2(out, exponent, base, |e, b| b.powf(e));
}

/// Raise every element to a fixed power.
pub fn power_f32(out: &mut [f32], input: &[f32], power: f32) {
    map1(out, input, |x| x.powf(power));
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::close_floats::{close_floats32, close_slices32};

    #[test]
    fn test_trig() {
        let mut out = [0.0f32; 3];

        acos_f32(&mut out, &[0.0, 0.5, 1.0]);
        close_slices32(
            &out,
            &[std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_3, 0.0],
            1e-3,
        );

        tan_f32(&mut out, &[0.0, std::f32::consts::FRAC_PI_4, -std::f32::consts::FRAC_PI_4]);
        close_slices32(&out, &[0.0, 1.0, -1.0], 1e-3);
    }

    #[test]
    fn test_invsqrt() {
        let mut out = [0.0f32; 3];
        invsqrt_f32(&mut out, &[0.125, 0.5, 2.0]);
        close_slices32(&out, &[2.828427, 1.414213, 0.707106], 1e-3);
    }

    #[test]
    fn test_exp_fast_is_close() {
        let inputs = [-4.0f32, -1.0, 0.0, 0.5, 1.0, 3.0, 10.0];
        let mut fast = [0.0f32; 7];
        exp_fast_f32(&mut fast, &inputs);

        for (x, approx) in inputs.iter().zip(fast.iter()) {
            let exact = x.exp();
            let rel = (approx - exact).abs() / exact;
            assert!(rel < 0.07, "exp({x}): {approx} vs {exact}");
        }
    }

    #[test]
    fn test_exp_fast_saturates() {
        let mut out = [1.0f32; 3];
        exp_fast_f32(&mut out, &[-1000.0, 1000.0, f32::NAN]);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], f32::MAX);
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn test_pow_takes_exponent_first() {
        let mut out = [0.0f32; 5];
        pow_f32(
            &mut out,
            &[0.5, 1.0, 1.5, 2.0, 2.5],
            &[1.0, 1.5, 2.0, 2.5, 3.0],
        );
        close_slices32(&out, &[1.0, 1.5, 2.82843, 6.25, 15.58846], 1e-3);
    }

    #[test]
    fn test_power() {
        let mut out = [0.0f32; 4];
        power_f32(&mut out, &[0.0, 0.5, 1.5, 3.5], 2.0);
        for (o, e) in out.iter().zip([0.0, 0.25, 2.25, 12.25]) {
            close_floats32(*o, e, 1e-6);
        }
    }
}

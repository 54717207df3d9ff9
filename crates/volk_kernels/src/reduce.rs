//! Reductions, range wrapping, and the fixed-point max-star family.
//!
//! max-star here is the cheap decoder approximation: of two values pick the first if the wrapped difference is
//! positive.  It is not a true maximum near the edges of the `i16` range, and the kernels deliberately keep that.
use std::ops::Add;

use num::Zero;

/// Sum every element of a vector.
pub fn accumulator<T: Zero + Add<Output = T> + Copy>(input: &[T]) -> T {
    input.iter().fold(T::zero(), |acc, x| acc + *x)
}

/// Estimate the noise floor of a spectrum and write it to every element of `out`.
///
/// The floor is the mean of all samples no greater than `mean + spectral_exclusion_value`.  If nothing qualifies, the
/// threshold itself is used.  Empty input leaves `out` alone.
pub fn calc_spectral_noise_floor_f32(out: &mut [f32], input: &[f32], spectral_exclusion_value: f32) {
    if input.is_empty() {
        return;
    }

    let threshold = accumulator(input) / input.len() as f32 + spectral_exclusion_value;
    let (sum, count) = input
        .iter()
        .filter(|x| **x <= threshold)
        .fold((0.0f32, 0usize), |(s, c), x| (s + x, c + 1));
    let floor = if count == 0 {
        threshold
    } else {
        sum / count as f32
    };

    out.fill(floor);
}

#[inline(always)]
fn max_star(a: i16, b: i16) -> i16 {
    if a.wrapping_sub(b) > 0 {
        a
    } else {
        b
    }
}

/// Pairwise max-star of adjacent elements.
///
/// `out[i]` receives the result for `input[2i]` and `input[2i + 1]`.  The pairs only fill the first half of `out`, and
/// the rest is zeroed so that callers always see the whole buffer written.
pub fn max_star_horizontal_i16(out: &mut [i16], input: &[i16]) {
    let n = out.len().min(input.len());
    let pairs = n / 2;

    for (o, pair) in out[..pairs].iter_mut().zip(input.chunks_exact(2)) {
        *o = max_star(pair[0], pair[1]);
    }
    out[pairs..n].fill(0);
}

/// Max-star across four vectors.
pub fn quad_max_star_i16(out: &mut [i16], a: &[i16], b: &[i16], c: &[i16], d: &[i16]) {
    for ((((o, &a), &b), &c), &d) in out.iter_mut().zip(a).zip(b).zip(c).zip(d) {
        *o = max_star(max_star(a, b), max_star(c, d));
    }
}

/// Add `base` to each of four vectors, writing four outputs.
pub fn add_quad_i16(outs: [&mut [i16]; 4], base: &[i16], addends: [&[i16]; 4]) {
    for (out, addend) in outs.into_iter().zip(addends) {
        for ((o, &x), &y) in out.iter_mut().zip(base).zip(addend) {
            *o = x.wrapping_add(y);
        }
    }
}

/// Wrap values into `[lower_bound, upper_bound]` by whole multiples of the range width.
///
/// Values already inside the range, including the bounds themselves, pass through unchanged.  An empty or inverted
/// range produces whatever the arithmetic produces; the kernel does not validate its bounds.  With an empty range,
/// values outside it become NaN.
pub fn mod_range_f32(out: &mut [f32], input: &[f32], lower_bound: f32, upper_bound: f32) {
    let distance = upper_bound - lower_bound;

    // The period count stays in f32 so that huge ratios and zero widths can't overflow an integer.
    crate::map1(out, input, |x| {
        if x < lower_bound {
            let count = ((lower_bound - x) / distance).trunc() + 1.0;
            x + count * distance
        } else if x > upper_bound {
            let count = ((x - upper_bound) / distance).trunc() + 1.0;
            x - count * distance
        } else {
            x
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use num::complex::Complex32;
    use pretty_assertions::assert_eq;

    use crate::close_floats::{close_floats32, close_slices32};

    #[test]
    fn test_accumulator() {
        assert_eq!(accumulator(&[1.0f32, 2.5, -0.5]), 3.0);
        assert_eq!(
            accumulator(&[Complex32::new(1.0, -1.0), Complex32::new(2.0, 3.0)]),
            Complex32::new(3.0, 2.0)
        );
        assert_eq!(accumulator::<f32>(&[]), 0.0);
    }

    #[test]
    fn test_noise_floor() {
        let mut out = [0.0f32; 5];

        // Mean is 22, so the two outliers are excluded.
        calc_spectral_noise_floor_f32(&mut out, &[1.0, 2.0, 3.0, 50.0, 54.0], 0.0);
        for o in out {
            close_floats32(o, 2.0, 1e-6);
        }

        // With a large exclusion value everything counts.
        calc_spectral_noise_floor_f32(&mut out, &[1.0, 2.0, 3.0, 50.0, 54.0], 100.0);
        close_floats32(out[0], 22.0, 1e-4);
    }

    #[test]
    fn test_noise_floor_when_nothing_qualifies() {
        let mut out = [0.0f32; 2];
        calc_spectral_noise_floor_f32(&mut out, &[4.0, 4.0], -1.0);
        assert_eq!(out, [3.0, 3.0]);
    }

    #[test]
    fn test_max_star_horizontal() {
        let mut out = [7i16; 5];
        max_star_horizontal_i16(&mut out, &[1, 2, 9, -3, 4]);
        assert_eq!(out, [2, 9, 0, 0, 0]);
    }

    #[test]
    fn test_max_star_wraps() {
        // 32767 - (-2) wraps negative, so the approximation picks the second value.
        let mut out = [0i16; 1];
        quad_max_star_i16(&mut out, &[i16::MAX], &[-2], &[-5], &[-6]);
        assert_eq!(out, [-2]);
    }

    #[test]
    fn test_add_quad() {
        let base = [1i16, 2, 3];
        let (mut o0, mut o1, mut o2, mut o3) = ([0i16; 3], [0i16; 3], [0i16; 3], [0i16; 3]);
        add_quad_i16(
            [&mut o0, &mut o1, &mut o2, &mut o3],
            &base,
            [&[-4, -3, -2], &[4, 5, 6], &[10, 20, 30], &[i16::MAX, 0, 0]],
        );
        assert_eq!(o0, [-3, -1, 1]);
        assert_eq!(o1, [5, 7, 9]);
        assert_eq!(o2, [11, 22, 33]);
        assert_eq!(o3, [i16::MIN, 2, 3]);
    }

    #[test]
    fn test_mod_range() {
        let mut out = [0.0f32; 6];
        mod_range_f32(&mut out, &[0.9, 2.1, 1.0, 2.0, 1.5, -1.25], 1.0, 2.0);
        close_slices32(&out, &[1.9, 1.1, 1.0, 2.0, 1.5, 1.75], 1e-3);
    }

    #[test]
    fn test_mod_range_far_outside() {
        let mut out = [0.0f32; 3];
        mod_range_f32(&mut out, &[1000.5, -1000.25, 1.0e30], 1.0, 2.0);
        assert_eq!(&out[..2], &[1.5f32, 1.75][..]);

        // At this magnitude the result is only as good as f32 allows, but it must not panic.
        mod_range_f32(&mut out[..1], &[1.0e30], 0.0, 1.0);
        assert_eq!(out[0], 0.0);
    }

    #[test]
    fn test_mod_range_empty_range() {
        let mut out = [7.0f32; 3];
        mod_range_f32(&mut out, &[0.0, 1.0, -1.0], 0.0, 0.0);
        assert_eq!(out[0], 0.0);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
    }

    #[test]
    fn test_mod_range_inverted_bounds() {
        let mut out = [0.0f32; 3];
        mod_range_f32(&mut out, &[0.0, 1.5, 3.0], 2.0, 1.0);
        assert_eq!(out, [1.0, 0.5, 2.0]);
    }
}

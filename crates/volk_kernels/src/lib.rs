//! Portable implementations of the VOLK kernel family used by `volk_blocks`.
//!
//! Every kernel is a plain function over slices: outputs first, then inputs, then any scalar arguments.  A kernel
//! processes as many elements as the shortest slice holds; callers are expected to pass slices of equal length.  The
//! loops are written so that the optimizer can vectorize them, and the element types are the same ones VOLK uses, so
//! buffers move between the two without conversion.
//!
//! Naming follows the kernel's element types: `add_f32_f64` adds an `f32` vector to an `f64` vector, `convert_i8_i16`
//! converts `i8` to `i16`, and so on.  Complex element types are spelled `c8`, `c16` and `c32`.
pub mod alloc;
pub mod arith;
pub mod bits;
pub mod complex;
pub mod convert;
pub mod math;
pub mod profile;
pub mod reduce;

#[cfg(test)]
mod close_floats;

pub use num::complex::Complex32;

/// A complex number made of two `i8`, the layout of VOLK's `lv_8sc_t`.
pub type ComplexI8 = num::Complex<i8>;

/// A complex number made of two `i16`, the layout of VOLK's `lv_16sc_t`.
pub type ComplexI16 = num::Complex<i16>;

/// Apply `f` elementwise from `input` into `out`.
#[inline(always)]
pub(crate) fn map1<I: Copy, O>(out: &mut [O], input: &[I], f: impl Fn(I) -> O) {
    for (o, &i) in out.iter_mut().zip(input.iter()) {
        *o = f(i);
    }
}

/// Apply `f` elementwise over two inputs into `out`.
#[inline(always)]
pub(crate) fn map2<A: Copy, B: Copy, O>(out: &mut [O], a: &[A], b: &[B], f: impl Fn(A, B) -> O) {
    for ((o, &x), &y) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
        *o = f(x, y);
    }
}

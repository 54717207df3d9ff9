//! Generic blocks which wrap a kernel function: pull the available input, call the kernel, push the output.
//!
//! Kernels are plain function pointers, so one adapter type serves every kernel of the same shape.
pub mod one_to_one;
pub mod one_to_two;
pub mod two_to_one;

pub use one_to_one::*;
pub use one_to_two::*;
pub use two_to_one::*;

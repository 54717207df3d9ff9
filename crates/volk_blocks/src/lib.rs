//! Stream-processing blocks built on VOLK-style SIMD kernels.
//!
//! Blocks are created by path through the [registry], wired together in a [framework::Topology], and tuned through
//! named calls.  Blocks whose kernels exist for several element types take the dtypes to use as factory arguments.
pub mod adapters;
pub mod allocator;
pub mod blocks;
pub mod config;
pub(crate) mod dispatch;
pub mod dtype;
mod error;
pub mod framework;
mod module;
pub mod registry;
pub mod value;

pub use dispatch::DispatchError;
pub use dtype::{DType, Element, ElementKind};
pub use error::{Error, Result};
pub use framework::{Block, BoxedBlock};
pub use module::{check_kernel_profile, registry};
pub use registry::{BlockArg, BlockRegistry};
pub use value::Value;

#[cfg(test)]
pub(crate) mod test_support {
    pub fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}

//! Every block this crate registers, grouped by what the kernels do.
//!
//! Most blocks are one of the generic [adapters](crate::adapters) bound to a kernel.  The ones with state or unusual
//! port layouts have their own types.
pub mod accumulator;
pub mod arith;
pub mod byteswap;
pub mod complex;
pub mod convert;
pub mod math;
pub mod mod_range;
pub mod normalize;
pub mod popcnt;
pub mod power_spectral_density;
pub mod quad;
pub mod square_dist;

pub use accumulator::Accumulator;
pub use byteswap::Byteswap;
pub use mod_range::ModRange;
pub use normalize::Normalize;
pub use popcnt::PopCnt;
pub use power_spectral_density::PowerSpectralDensity;
pub use quad::{AddQuad, QuadMaxStar};
pub use square_dist::{Scaling, SquareDist};

use crate::registry::BlockRegistry;
use crate::Result;

pub(crate) fn register_all(registry: &mut BlockRegistry) -> Result<()> {
    accumulator::register(registry)?;
    arith::register(registry)?;
    byteswap::register(registry)?;
    complex::register(registry)?;
    convert::register(registry)?;
    math::register(registry)?;
    mod_range::register(registry)?;
    normalize::register(registry)?;
    popcnt::register(registry)?;
    power_spectral_density::register(registry)?;
    quad::register(registry)?;
    square_dist::register(registry)?;
    Ok(())
}

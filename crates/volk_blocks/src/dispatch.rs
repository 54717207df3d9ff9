//! Picking a monomorphized block from runtime dtypes.
//!
//! A factory lists the type combinations it supports, in order; the first combination whose types all match the dtypes
//! it was given wins:
//!
//! ```ignore
//! dispatch!(&[input, output], {
//!     (i8, i16) => OneToOne::new(PATH, convert::convert_i8_i16),
//!     (f32, f64) => OneToOne::new(PATH, convert::convert_f32_f64),
//! });
//! Err(unsupported(PATH, &[input], &[output], &[]))
//! ```
use itertools::Itertools;

use crate::dtype::{DType, Element};
use crate::Error;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error(
        "{context}: unsupported dtype combination (inputs: [{}], outputs: [{}], scalars: [{}])",
        dtype_list(.inputs),
        dtype_list(.outputs),
        dtype_list(.scalars)
    )]
    UnsupportedDTypes {
        context: String,
        inputs: Vec<DType>,
        outputs: Vec<DType>,
        scalars: Vec<DType>,
    },

    #[error("{context} mode: {mode}")]
    UnsupportedMode { context: String, mode: String },
}

fn dtype_list(dtypes: &[DType]) -> String {
    dtypes.iter().join(", ")
}

/// A tuple of [Element] types, matched position by position against a dtype list.
pub trait TypeList {
    fn matches(dtypes: &[DType]) -> bool;
}

impl<A: Element> TypeList for (A,) {
    fn matches(dtypes: &[DType]) -> bool {
        matches!(dtypes, [a] if a.matches::<A>())
    }
}

impl<A: Element, B: Element> TypeList for (A, B) {
    fn matches(dtypes: &[DType]) -> bool {
        matches!(dtypes, [a, b] if a.matches::<A>() && b.matches::<B>())
    }
}

impl<A: Element, B: Element, C: Element> TypeList for (A, B, C) {
    fn matches(dtypes: &[DType]) -> bool {
        matches!(dtypes, [a, b, c] if a.matches::<A>() && b.matches::<B>() && c.matches::<C>())
    }
}

/// Return the block built by the first arm whose types match.  Falls through if none do.
macro_rules! dispatch {
    ($dtypes: expr, { $(($($t: ty),+) => $make: expr),+ $(,)? }) => {{
        let dtypes: &[$crate::dtype::DType] = $dtypes;
        $(
            if <($($t,)+) as $crate::dispatch::TypeList>::matches(dtypes) {
                return Ok(Box::new($make) as $crate::framework::BoxedBlock);
            }
        )+
    }};
}

pub(crate) use dispatch;

/// The error for a factory which fell through every arm.
pub fn unsupported(context: &str, inputs: &[DType], outputs: &[DType], scalars: &[DType]) -> Error {
    let err = DispatchError::UnsupportedDTypes {
        context: context.to_string(),
        inputs: inputs.to_vec(),
        outputs: outputs.to_vec(),
        scalars: scalars.to_vec(),
    };
    log::debug!("Rejecting block construction: {}", err);
    err.into()
}

/// The error for a factory given a mode string it does not know.
pub fn unsupported_mode(context: &str, mode: &str) -> Error {
    let err = DispatchError::UnsupportedMode {
        context: context.to_string(),
        mode: mode.to_string(),
    };
    log::debug!("Rejecting block construction: {}", err);
    err.into()
}

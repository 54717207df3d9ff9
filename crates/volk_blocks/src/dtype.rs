//! Runtime element type descriptors, and the compile-time types they correspond to.
//!
//! Factories receive [DType]s from whoever is building a topology, and have to pick a monomorphized block from them.
//! [Element] is the bridge: every type a port may carry implements it, and [DType::matches] compares the two.
use std::fmt::{self, Display};
use std::str::FromStr;

use num::complex::{Complex32, Complex64};
use num::Complex;

/// The scalar kind of a single lane of an element.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, derive_more::IsVariant)]
pub enum ElementKind {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    ComplexInt8,
    ComplexInt16,
    ComplexInt32,
    ComplexFloat32,
    ComplexFloat64,
}

impl ElementKind {
    pub const ALL: [ElementKind; 15] = [
        ElementKind::Int8,
        ElementKind::Int16,
        ElementKind::Int32,
        ElementKind::Int64,
        ElementKind::UInt8,
        ElementKind::UInt16,
        ElementKind::UInt32,
        ElementKind::UInt64,
        ElementKind::Float32,
        ElementKind::Float64,
        ElementKind::ComplexInt8,
        ElementKind::ComplexInt16,
        ElementKind::ComplexInt32,
        ElementKind::ComplexFloat32,
        ElementKind::ComplexFloat64,
    ];

    /// The canonical name, as accepted by [DType::from_str].
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Int8 => "int8",
            ElementKind::Int16 => "int16",
            ElementKind::Int32 => "int32",
            ElementKind::Int64 => "int64",
            ElementKind::UInt8 => "uint8",
            ElementKind::UInt16 => "uint16",
            ElementKind::UInt32 => "uint32",
            ElementKind::UInt64 => "uint64",
            ElementKind::Float32 => "float32",
            ElementKind::Float64 => "float64",
            ElementKind::ComplexInt8 => "complex_int8",
            ElementKind::ComplexInt16 => "complex_int16",
            ElementKind::ComplexInt32 => "complex_int32",
            ElementKind::ComplexFloat32 => "complex_float32",
            ElementKind::ComplexFloat64 => "complex_float64",
        }
    }

    /// Size of one lane in bytes.
    pub fn size(&self) -> usize {
        match self {
            ElementKind::Int8 | ElementKind::UInt8 => 1,
            ElementKind::Int16 | ElementKind::UInt16 | ElementKind::ComplexInt8 => 2,
            ElementKind::Int32 | ElementKind::UInt32 | ElementKind::Float32 | ElementKind::ComplexInt16 => 4,
            ElementKind::Int64
            | ElementKind::UInt64
            | ElementKind::Float64
            | ElementKind::ComplexInt32
            | ElementKind::ComplexFloat32 => 8,
            ElementKind::ComplexFloat64 => 16,
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(
            self,
            ElementKind::ComplexInt8
                | ElementKind::ComplexInt16
                | ElementKind::ComplexInt32
                | ElementKind::ComplexFloat32
                | ElementKind::ComplexFloat64
        )
    }

    fn from_name(name: &str) -> Option<ElementKind> {
        let canonical = match name {
            "float" => "float32",
            "double" => "float64",
            "complex_float" => "complex_float32",
            "complex_double" => "complex_float64",
            x => x,
        };

        Self::ALL.iter().copied().find(|k| k.name() == canonical)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DTypeError {
    #[error("unknown element type {0:?}")]
    UnknownName(String),

    #[error("dimension must be a positive integer, got {0:?}")]
    InvalidDimension(String),
}

/// A runtime element type: a scalar kind, and how many lanes of it make one element.
///
/// Equality is structural.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct DType {
    kind: ElementKind,
    dimension: usize,
}

impl DType {
    pub const fn new(kind: ElementKind) -> DType {
        DType { kind, dimension: 1 }
    }

    pub fn with_dimension(kind: ElementKind, dimension: usize) -> Result<DType, DTypeError> {
        if dimension == 0 {
            return Err(DTypeError::InvalidDimension(dimension.to_string()));
        }

        Ok(DType { kind, dimension })
    }

    /// The descriptor for a compile-time element type.
    pub fn of<T: Element>() -> DType {
        DType::new(T::KIND)
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Size of a whole element, all lanes included, in bytes.
    pub fn size(&self) -> usize {
        self.kind.size() * self.dimension
    }

    /// Does this descriptor, reduced to a single lane, describe `T`?
    pub fn matches<T: Element>(&self) -> bool {
        self.kind == T::KIND
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dimension == 1 {
            write!(f, "{}", self.kind.name())
        } else {
            write!(f, "{}:{}", self.kind.name(), self.dimension)
        }
    }
}

impl FromStr for DType {
    type Err = DTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, dimension) = match s.split_once(':') {
            Some((name, dim)) => {
                let dimension = dim
                    .parse::<usize>()
                    .map_err(|_| DTypeError::InvalidDimension(dim.to_string()))?;
                (name, dimension)
            }
            None => (s, 1),
        };

        let kind = ElementKind::from_name(name.trim())
            .ok_or_else(|| DTypeError::UnknownName(name.to_string()))?;
        DType::with_dimension(kind, dimension)
    }
}

impl From<ElementKind> for DType {
    fn from(kind: ElementKind) -> Self {
        DType::new(kind)
    }
}

/// Keeps the set of [Element] types closed.
mod sealed {
    pub trait Sealed {}
}

/// A type which a port may carry.
pub trait Element:
    bytemuck::Pod + Default + fmt::Debug + PartialEq + Send + Sync + sealed::Sealed + 'static
{
    const KIND: ElementKind;
}

macro_rules! element {
    ($t: ty, $kind: ident) => {
        impl sealed::Sealed for $t {}

        impl Element for $t {
            const KIND: ElementKind = ElementKind::$kind;
        }
    };
}

element!(i8, Int8);
element!(i16, Int16);
element!(i32, Int32);
element!(i64, Int64);
element!(u8, UInt8);
element!(u16, UInt16);
element!(u32, UInt32);
element!(u64, UInt64);
element!(f32, Float32);
element!(f64, Float64);
element!(Complex<i8>, ComplexInt8);
element!(Complex<i16>, ComplexInt16);
element!(Complex<i32>, ComplexInt32);
element!(Complex32, ComplexFloat32);
element!(Complex64, ComplexFloat64);

/// Does `dtype` describe `T`?  Lanes beyond the first are ignored.
pub fn matches<T: Element>(dtype: &DType) -> bool {
    dtype.matches::<T>()
}

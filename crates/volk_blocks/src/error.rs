use crate::dispatch::DispatchError;
use crate::dtype::DTypeError;
use crate::framework::{BufferError, TopologyError};
use crate::registry::RegistryError;
use crate::value::CallError;

#[derive(Debug, derive_more::Display, derive_more::IsVariant)]
enum ErrorPayload {
    #[display(fmt = "{}", _0)]
    Dispatch(DispatchError),

    #[display(fmt = "Invalid dtype: {}", _0)]
    DType(DTypeError),

    #[display(fmt = "Registry error: {}", _0)]
    Registry(RegistryError),

    #[display(fmt = "Call error: {}", _0)]
    Call(CallError),

    #[display(fmt = "Buffer error: {}", _0)]
    Buffer(BufferError),

    #[display(fmt = "Topology error: {}", _0)]
    Topology(TopologyError),
}

#[derive(Debug, thiserror::Error)]
#[error("{payload}")]
pub struct Error {
    payload: ErrorPayload,
}

macro_rules! conv {
    ($variant: ident, $from_err: path) => {
        impl From<$from_err> for Error {
            fn from(value: $from_err) -> Error {
                Error {
                    payload: ErrorPayload::$variant(value),
                }
            }
        }
    };
}

conv!(Dispatch, DispatchError);
conv!(DType, DTypeError);
conv!(Registry, RegistryError);
conv!(Call, CallError);
conv!(Buffer, BufferError);
conv!(Topology, TopologyError);

impl Error {
    /// Did a factory reject the dtypes it was given?
    pub fn is_unsupported_dtypes(&self) -> bool {
        matches!(
            self.payload,
            ErrorPayload::Dispatch(DispatchError::UnsupportedDTypes { .. })
        )
    }

    /// Did a factory reject a mode string?
    pub fn is_unsupported_mode(&self) -> bool {
        matches!(
            self.payload,
            ErrorPayload::Dispatch(DispatchError::UnsupportedMode { .. })
        )
    }

    pub fn is_registry_error(&self) -> bool {
        self.payload.is_registry()
    }

    pub fn is_call_error(&self) -> bool {
        self.payload.is_call()
    }

    pub fn is_dtype_error(&self) -> bool {
        matches!(self.payload, ErrorPayload::DType(_))
    }

    pub fn is_topology_error(&self) -> bool {
        self.payload.is_topology()
    }

    /// The dispatch failure behind this error, if that is what it is.
    pub fn as_dispatch_error(&self) -> Option<&DispatchError> {
        match &self.payload {
            ErrorPayload::Dispatch(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

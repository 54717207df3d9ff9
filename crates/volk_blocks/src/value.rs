//! Values passed through the control plane, and the getter/setter plumbing blocks use to expose their parameters.
use num::complex::{Complex32, Complex64};
use num::Complex;

/// A dynamically typed argument or return value of a block call.
#[derive(Clone, Debug, PartialEq, derive_more::IsVariant)]
pub enum Value {
    Unit,
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    C8(Complex<i8>),
    C16(Complex<i16>),
    C32(Complex32),
    C64(Complex64),
    Str(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::I8(_) => i8::TYPE_NAME,
            Value::I16(_) => i16::TYPE_NAME,
            Value::I32(_) => i32::TYPE_NAME,
            Value::I64(_) => i64::TYPE_NAME,
            Value::U8(_) => u8::TYPE_NAME,
            Value::U16(_) => u16::TYPE_NAME,
            Value::U32(_) => u32::TYPE_NAME,
            Value::U64(_) => u64::TYPE_NAME,
            Value::F32(_) => f32::TYPE_NAME,
            Value::F64(_) => f64::TYPE_NAME,
            Value::C8(_) => <Complex<i8>>::TYPE_NAME,
            Value::C16(_) => <Complex<i16>>::TYPE_NAME,
            Value::C32(_) => Complex32::TYPE_NAME,
            Value::C64(_) => Complex64::TYPE_NAME,
            Value::Str(_) => "string",
        }
    }

    /// Extract a scalar of type `T`.  No numeric conversion is performed.
    pub fn get<T: ScalarValue>(&self) -> Option<T> {
        T::from_value(self)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

/// A type which can be stored in a block parameter and moved through [Value].
pub trait ScalarValue: Copy + Default + Send + 'static {
    const TYPE_NAME: &'static str;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! scalar_value {
    ($t: ty, $variant: ident, $name: literal) => {
        impl ScalarValue for $t {
            const TYPE_NAME: &'static str = $name;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(x) => Some(*x),
                    _ => None,
                }
            }
        }

        impl From<$t> for Value {
            fn from(value: $t) -> Value {
                Value::$variant(value)
            }
        }
    };
}

scalar_value!(i8, I8, "int8");
scalar_value!(i16, I16, "int16");
scalar_value!(i32, I32, "int32");
scalar_value!(i64, I64, "int64");
scalar_value!(u8, U8, "uint8");
scalar_value!(u16, U16, "uint16");
scalar_value!(u32, U32, "uint32");
scalar_value!(u64, U64, "uint64");
scalar_value!(f32, F32, "float32");
scalar_value!(f64, F64, "float64");
scalar_value!(Complex<i8>, C8, "complex_int8");
scalar_value!(Complex<i16>, C16, "complex_int16");
scalar_value!(Complex32, C32, "complex_float32");
scalar_value!(Complex64, C64, "complex_float64");

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CallError {
    #[error("{path} has no call named {call:?}")]
    UnknownCall { path: String, call: String },

    #[error("{call} takes {expected} argument(s), got {got}")]
    WrongArgCount {
        call: String,
        expected: usize,
        got: usize,
    },

    #[error("{call} expects a {expected}, got a {got}")]
    WrongArgType {
        call: String,
        expected: &'static str,
        got: &'static str,
    },
}

/// Check that a call received exactly `N` arguments.
pub fn expect_args<'a, const N: usize>(call: &str, args: &'a [Value]) -> Result<&'a [Value; N], CallError> {
    args.try_into().map_err(|_| CallError::WrongArgCount {
        call: call.to_string(),
        expected: N,
        got: args.len(),
    })
}

/// Extract an argument of type `T`, or say why not.
pub fn expect_arg<T: ScalarValue>(call: &str, arg: &Value) -> Result<T, CallError> {
    T::from_value(arg).ok_or_else(|| CallError::WrongArgType {
        call: call.to_string(),
        expected: T::TYPE_NAME,
        got: arg.type_name(),
    })
}

impl CallError {
    pub fn unknown(path: &str, call: &str) -> CallError {
        CallError::UnknownCall {
            path: path.to_string(),
            call: call.to_string(),
        }
    }
}

/// Something which answers some of a block's calls.
pub trait CallHandler {
    /// `None` if `name` is not one of ours.
    fn handle(&mut self, name: &str, args: &[Value]) -> Option<Result<Value, CallError>>;

    fn names(&self) -> Vec<&'static str>;
}

/// Offer a call to each handler in turn, failing with [CallError::UnknownCall] if none claims it.
pub fn call_handlers(
    path: &str,
    name: &str,
    args: &[Value],
    handlers: &mut [&mut dyn CallHandler],
) -> crate::Result<Value> {
    for handler in handlers.iter_mut() {
        if let Some(result) = handler.handle(name, args) {
            return Ok(result?);
        }
    }

    Err(CallError::unknown(path, name).into())
}

/// A block parameter reachable through a named getter and setter.
///
/// Setters accept any representable value without validation.
#[derive(Clone, Debug)]
pub struct ScalarParam<S> {
    getter: &'static str,
    setter: &'static str,
    value: S,
}

impl<S: ScalarValue> ScalarParam<S> {
    pub fn new(getter: &'static str, setter: &'static str, value: S) -> Self {
        Self {
            getter,
            setter,
            value,
        }
    }

    pub fn get(&self) -> S {
        self.value
    }

    pub fn set(&mut self, value: S) {
        self.value = value;
    }

    pub fn setter(&self) -> &'static str {
        self.setter
    }
}

impl<S: ScalarValue> CallHandler for ScalarParam<S> {
    fn names(&self) -> Vec<&'static str> {
        vec![self.getter, self.setter]
    }

    /// Handle `name` if it is this parameter's getter or setter.
    fn handle(&mut self, name: &str, args: &[Value]) -> Option<Result<Value, CallError>> {
        if name == self.getter {
            Some(expect_args::<0>(name, args).map(|_| self.value.into_value()))
        } else if name == self.setter {
            Some(
                expect_args::<1>(name, args)
                    .and_then(|[arg]| expect_arg::<S>(name, arg))
                    .map(|v| {
                        self.value = v;
                        Value::Unit
                    }),
            )
        } else {
            None
        }
    }
}

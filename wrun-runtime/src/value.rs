//! Numeric WebAssembly values exchanged with guest functions.
//!
//! The invoker only speaks numbers: integer arguments coming from the command
//! line are coerced to the declared parameter types, and results are mapped
//! back into [`Value`].

use core::fmt;

use wasmtime::{Val, ValType};
use wrun_error::{kinds, Result};

/// Represents a numeric WebAssembly runtime value
#[derive(Debug, Clone, Copy)]
pub enum Value {
    /// 32-bit integer
    I32(i32),
    /// 64-bit integer
    I64(i64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
}

// NaN compares equal to NaN so results can be asserted on directly.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => (a.is_nan() && b.is_nan()) || (a == b),
            (Value::F64(a), Value::F64(b)) => (a.is_nan() && b.is_nan()) || (a == b),
            _ => false,
        }
    }
}

impl Value {
    /// Attempts to extract an i32 value if this Value is an I32.
    #[must_use]
    pub const fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract an i64 value if this Value is an I64.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Name of the value's WebAssembly type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
        }
    }

    /// Interpret the value as a guest address or length.
    ///
    /// `i32` values are read as unsigned, matching wasm32 pointers. Negative
    /// `i64` values and floats are rejected.
    pub fn as_address(&self) -> Result<usize> {
        match *self {
            Self::I32(v) => Ok(v as u32 as usize),
            Self::I64(v) => usize::try_from(v).map_err(|_| {
                kinds::type_mismatch(format!("{v} is not a valid memory address or length"))
            }),
            Self::F32(_) | Self::F64(_) => Err(kinds::type_mismatch(format!(
                "expected an integer address, got {}",
                self.type_name()
            ))),
        }
    }

    /// Convert a host runtime value into a [`Value`].
    pub fn from_val(val: &Val) -> Result<Self> {
        match val {
            Val::I32(v) => Ok(Self::I32(*v)),
            Val::I64(v) => Ok(Self::I64(*v)),
            Val::F32(bits) => Ok(Self::F32(f32::from_bits(*bits))),
            Val::F64(bits) => Ok(Self::F64(f64::from_bits(*bits))),
            other => Err(kinds::unsupported_value_type(format!("{other:?}"))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Name of a host value type, as written in the text format.
#[must_use]
pub fn val_type_name(ty: &ValType) -> &'static str {
    match ty {
        ValType::I32 => "i32",
        ValType::I64 => "i64",
        ValType::F32 => "f32",
        ValType::F64 => "f64",
        ValType::V128 => "v128",
        _ => "ref",
    }
}

/// Coerce an integer argument to the declared parameter type.
///
/// `i32` parameters accept `i32::MIN..=u32::MAX`; values above `i32::MAX`
/// keep their two's-complement bit pattern.
pub fn coerce_arg(position: usize, arg: i64, ty: &ValType) -> Result<Val> {
    match ty {
        ValType::I32 => {
            if arg < i64::from(i32::MIN) || arg > i64::from(u32::MAX) {
                return Err(kinds::argument_out_of_range(position, arg, "i32"));
            }
            Ok(Val::I32(arg as u32 as i32))
        }
        ValType::I64 => Ok(Val::I64(arg)),
        ValType::F32 => Ok(Val::F32((arg as f32).to_bits())),
        ValType::F64 => Ok(Val::F64((arg as f64).to_bits())),
        other => Err(kinds::unsupported_value_type(format!(
            "parameter {position} has type {}",
            val_type_name(other)
        ))),
    }
}

/// Zero value used as the result slot for a declared result type.
pub fn result_slot(ty: &ValType) -> Result<Val> {
    match ty {
        ValType::I32 => Ok(Val::I32(0)),
        ValType::I64 => Ok(Val::I64(0)),
        ValType::F32 => Ok(Val::F32(0)),
        ValType::F64 => Ok(Val::F64(0)),
        other => Err(kinds::unsupported_value_type(format!(
            "result type {}",
            val_type_name(other)
        ))),
    }
}

/// Render call results the way the CLI prints them.
///
/// A single result prints as the bare number, several results as a list.
#[must_use]
pub fn display_results(results: &[Value]) -> String {
    match results {
        [] => "(no result)".to_string(),
        [single] => single.to_string(),
        many => format!(
            "[{}]",
            many.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

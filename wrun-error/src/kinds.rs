// WRUN - wrun-error
// Module: Error Kinds
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Constructors for the errors raised along the invocation pipeline.

use crate::{codes, Error, ErrorCategory};

/// Create an engine initialization error
#[must_use]
pub fn initialization_error(message: impl Into<String>) -> Error {
    Error::new(
        ErrorCategory::Initialization,
        codes::ENGINE_INITIALIZATION_FAILED,
        message,
    )
}

/// Create a missing-argument (usage) error
#[must_use]
pub fn missing_argument(name: &str) -> Error {
    Error::new(
        ErrorCategory::Parameter,
        codes::MISSING_ARGUMENT,
        format!("missing required argument: {name}"),
    )
}

/// Create an error for an argument token that is not an integer
#[must_use]
pub fn invalid_argument(position: usize, token: &str) -> Error {
    Error::new(
        ErrorCategory::Parameter,
        codes::INVALID_ARGUMENT,
        format!("argument {position} is not a base-10 integer: {token:?}"),
    )
}

/// Create an error for an integer that does not fit its parameter type
#[must_use]
pub fn argument_out_of_range(position: usize, value: i64, ty: &str) -> Error {
    Error::new(
        ErrorCategory::Parameter,
        codes::ARGUMENT_OUT_OF_RANGE,
        format!("argument {position} ({value}) is out of range for {ty}"),
    )
}

/// Create an error for an empty module byte sequence
#[must_use]
pub fn empty_module() -> Error {
    Error::new(
        ErrorCategory::Compilation,
        codes::EMPTY_MODULE,
        "module bytes are empty",
    )
}

/// Create a compilation error
#[must_use]
pub fn compilation_error(message: impl Into<String>) -> Error {
    Error::new(
        ErrorCategory::Compilation,
        codes::COMPILATION_FAILED,
        message,
    )
}

/// Create a link error for imports outside the fixed environment
#[must_use]
pub fn unsatisfied_imports(imports: &[String]) -> Error {
    Error::new(
        ErrorCategory::Link,
        codes::UNSATISFIED_IMPORT,
        format!(
            "module requires imports not provided by the environment: {}",
            imports.join(", ")
        ),
    )
}

/// Create a link error raised by instantiation itself
#[must_use]
pub fn link_error(message: impl Into<String>) -> Error {
    Error::new(ErrorCategory::Link, codes::INSTANTIATION_FAILED, message)
}

/// Create an error for host memory/table allocation failures
#[must_use]
pub fn environment_error(message: impl Into<String>) -> Error {
    Error::new(
        ErrorCategory::Link,
        codes::ENVIRONMENT_ALLOCATION_FAILED,
        message,
    )
}

/// Create an export-not-found error listing the available export names
#[must_use]
pub fn export_not_found<'a>(name: &str, available: impl IntoIterator<Item = &'a str>) -> Error {
    let available = available.into_iter().collect::<Vec<_>>().join(", ");
    Error::new(
        ErrorCategory::Export,
        codes::EXPORT_NOT_FOUND,
        format!("{name} not found in wasm exports: {available}"),
    )
}

/// Create an error for an instance without exports
#[must_use]
pub fn no_exports() -> Error {
    Error::new(ErrorCategory::Export, codes::NO_EXPORTS, "no exports found")
}

/// Create an arity mismatch error
#[must_use]
pub fn arity_mismatch(name: &str, expected: usize, actual: usize) -> Error {
    Error::new(
        ErrorCategory::Type,
        codes::ARITY_MISMATCH,
        format!("{name} expects {expected} argument(s), got {actual}"),
    )
}

/// Create a type mismatch error
#[must_use]
pub fn type_mismatch(message: impl Into<String>) -> Error {
    Error::new(ErrorCategory::Type, codes::TYPE_MISMATCH, message)
}

/// Create an error for value types the invoker cannot represent
#[must_use]
pub fn unsupported_value_type(ty: impl core::fmt::Display) -> Error {
    Error::new(
        ErrorCategory::Type,
        codes::UNSUPPORTED_VALUE_TYPE,
        format!("unsupported value type: {ty}"),
    )
}

/// Create a memory out-of-bounds error
#[must_use]
pub fn memory_out_of_bounds(offset: usize, length: usize, memory_size: usize) -> Error {
    Error::new(
        ErrorCategory::Memory,
        codes::MEMORY_OUT_OF_BOUNDS,
        format!(
            "read of {length} bytes at offset {offset} exceeds memory size {memory_size}"
        ),
    )
}

/// Create an unaligned memory access error
#[must_use]
pub fn unaligned_memory_access(offset: usize, alignment: usize) -> Error {
    Error::new(
        ErrorCategory::Memory,
        codes::UNALIGNED_MEMORY_ACCESS,
        format!("offset {offset} is not a multiple of {alignment}"),
    )
}

/// Create a trap error
#[must_use]
pub fn trap(message: impl Into<String>) -> Error {
    Error::new(ErrorCategory::RuntimeTrap, codes::TRAP, message)
}

/// Create an error for a guest call that failed without a trap code
#[must_use]
pub fn execution_error(message: impl Into<String>) -> Error {
    Error::new(ErrorCategory::RuntimeTrap, codes::EXECUTION_FAILED, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_not_found_lists_names() {
        let error = export_not_found("add2", ["add1", "memory"]);
        assert!(error.is_export_error());
        assert_eq!(error.message, "add2 not found in wasm exports: add1, memory");
    }

    #[test]
    fn test_unsatisfied_imports_joins_names() {
        let error = unsatisfied_imports(&["env.log".to_string(), "env.abort".to_string()]);
        assert!(error.is_link_error());
        assert!(error.message.ends_with("env.log, env.abort"));
    }

    #[test]
    fn test_arity_mismatch_message() {
        let error = arity_mismatch("add", 2, 1);
        assert_eq!(error.code, codes::ARITY_MISMATCH);
        assert_eq!(error.message, "add expects 2 argument(s), got 1");
    }
}

// WRUN - wrun-error
// Module: Error Codes
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for wrun

// Setup error codes (1000-1099)
/// Host engine could not be created
pub const ENGINE_INITIALIZATION_FAILED: u16 = 1000;
/// Required command-line argument missing
pub const MISSING_ARGUMENT: u16 = 1001;
/// Argument token is not a base-10 integer
pub const INVALID_ARGUMENT: u16 = 1002;
/// Argument does not fit the parameter type
pub const ARGUMENT_OUT_OF_RANGE: u16 = 1003;
/// Module file could not be read
pub const IO_ERROR: u16 = 1010;

// Loading error codes (2000-2199)
/// Module bytes empty
pub const EMPTY_MODULE: u16 = 2000;
/// Module bytes failed to compile or validate
pub const COMPILATION_FAILED: u16 = 2001;
/// Module requires an import outside the fixed environment
pub const UNSATISFIED_IMPORT: u16 = 2100;
/// Instantiation rejected the provided imports
pub const INSTANTIATION_FAILED: u16 = 2101;
/// Host memory or table could not be allocated
pub const ENVIRONMENT_ALLOCATION_FAILED: u16 = 2102;

// Invocation error codes (3000-3299)
/// Requested export is missing
pub const EXPORT_NOT_FOUND: u16 = 3000;
/// Instance exports nothing
pub const NO_EXPORTS: u16 = 3001;
/// Argument count differs from the declared parameter count
pub const ARITY_MISMATCH: u16 = 3100;
/// Export or value has an unexpected type
pub const TYPE_MISMATCH: u16 = 3101;
/// Value type not representable by the invoker
pub const UNSUPPORTED_VALUE_TYPE: u16 = 3102;
/// Memory-region read exceeds the memory's byte length
pub const MEMORY_OUT_OF_BOUNDS: u16 = 3200;
/// Memory-region read starts at an offset not aligned to the element size
pub const UNALIGNED_MEMORY_ACCESS: u16 = 3201;

// Execution error codes (4000-4099)
/// Guest code trapped
pub const TRAP: u16 = 4000;
/// Guest call failed without a trap code
pub const EXECUTION_FAILED: u16 = 4001;

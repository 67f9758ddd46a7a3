// WRUN - wrun-error
// Module: Error Handling
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! wrun error handling library
//!
//! Every failure the invoker can produce is an [`Error`] carrying an
//! [`ErrorCategory`], a numeric code from [`codes`] and a human-readable
//! message. Categories follow the stages of the invocation pipeline:
//!
//! ## Setup (1000-1099)
//! - Host engine initialisation
//! - Command-line parameters and argument tokens
//! - Reading the module file
//!
//! ## Loading (2000-2199)
//! - Compilation of module bytes
//! - Linking against the fixed `memory`/`table` import record
//!
//! ## Invocation (3000-3299)
//! - Export lookup
//! - Signature checks (arity, value types)
//! - Memory-region access
//!
//! ## Execution (4000-4099)
//! - Traps raised by guest code
//!
//! # Usage
//!
//! ```
//! use wrun_error::{codes, kinds, Error, ErrorCategory};
//!
//! let error = Error::new(
//!     ErrorCategory::Export,
//!     codes::EXPORT_NOT_FOUND,
//!     "add2 not found in wasm exports: add1, memory",
//! );
//! assert!(error.is_export_error());
//!
//! let trap = kinds::trap("wasm trap: integer divide by zero");
//! assert!(trap.is_trap());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Error codes for wrun
pub mod codes;
/// Error and error category types
pub mod errors;
/// Constructors for the error kinds raised by the pipeline
pub mod kinds;

pub use errors::{Error, ErrorCategory};

/// A specialized `Result` type for wrun operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error conversion trait for converting to specific error categories
///
/// Lets callers classify foreign errors (for example host runtime errors)
/// before wrapping them.
pub trait ToErrorCategory {
    /// Convert the error to a specific category
    fn to_category(&self) -> ErrorCategory;
}

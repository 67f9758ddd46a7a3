// WRUN - wrun-runtime
// Module: Invocation Pipeline
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Invocation pipeline for the wrun WebAssembly invoker.
//!
//! Loads module bytes, compiles them, instantiates the module against a fixed
//! environment of one linear memory (`memory`) and one empty indirect-call
//! table (`table`), and calls a single exported function with integer
//! arguments. The returned [`ExportTable`] keeps the instance alive so callers
//! can read guest memory or call further exports afterwards.
//!
//! # Usage
//!
//! ```no_run
//! use wrun_runtime::{parse_int_args, InvokeConfig, Invoker};
//!
//! # fn main() -> wrun_runtime::Result<()> {
//! let bytes = std::fs::read("arithmetic.wasm")?;
//! let mut invoker = Invoker::new(InvokeConfig::default())?;
//! let args = parse_int_args("10")?;
//! let invocation = invoker.compile_and_run(&bytes, "add1", &args)?;
//! println!("{:?}", invocation.results);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Integer argument parsing
pub mod args;
/// Invocation configuration
pub mod config;
/// The fixed `memory`/`table` import environment
pub mod environment;
/// Export table of a live instance
pub mod exports;
/// Compile, instantiate and call
pub mod invoker;
/// Memory-region reader
pub mod memory;
/// Trace-buffer reader
pub mod tracer;
/// Numeric WebAssembly values
pub mod value;

pub use args::parse_int_args;
pub use config::{InvokeConfig, TracerNames};
pub use environment::Environment;
pub use exports::{Export, ExportKind, ExportTable};
pub use invoker::{Invocation, Invoker, InvokerStats};
pub use memory::{read_i32, read_region, MemoryView};
pub use tracer::{read_trace, TraceBuffer};
pub use value::Value;
pub use wrun_error::{Error, ErrorCategory, Result};

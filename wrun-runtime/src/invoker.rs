// WRUN - wrun-runtime
// Module: Invoker
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Compile, instantiate and call.
//!
//! The [`Invoker`] owns the host engine and runs the straight-line pipeline:
//! compile the module bytes, allocate a fresh memory and table, link the
//! module against them, look up the requested export and call it. Every
//! stage fails fast; nothing is retried.

use std::time::Instant;

use tracing::{debug, info};
use wasmtime::{Config, Engine, Instance, Module, Store};
use wrun_error::{kinds, Result};

use crate::{
    config::InvokeConfig,
    environment::Environment,
    exports::{classify_call_error, ExportTable},
    value::Value,
};

/// Counters describing what an [`Invoker`] has done so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokerStats {
    /// Modules compiled successfully
    pub modules_compiled:  u64,
    /// Instances created successfully
    pub instances_created: u64,
    /// Exported functions called through [`Invoker::compile_and_run`]
    pub functions_invoked: u64,
}

/// Outcome of [`Invoker::compile_and_run`].
#[derive(Debug)]
pub struct Invocation {
    /// Values returned by the function
    pub results: Vec<Value>,
    /// Exports of the instance, kept alive for further inspection
    pub exports: ExportTable,
}

impl Invocation {
    /// First result, if the function returned any
    #[must_use]
    pub fn result(&self) -> Option<Value> {
        self.results.first().copied()
    }
}

/// Runs exported functions of WebAssembly modules.
pub struct Invoker {
    engine: Engine,
    config: InvokeConfig,
    stats:  InvokerStats,
}

impl Invoker {
    /// Create an invoker.
    ///
    /// Building the host engine is the one-time check that WebAssembly
    /// compilation is available on this host.
    pub fn new(config: InvokeConfig) -> Result<Self> {
        let engine = Engine::new(&Config::new()).map_err(|e| {
            kinds::initialization_error(format!("WebAssembly engine unavailable: {e:#}"))
        })?;
        debug!(?config, "Initialized WebAssembly engine");

        Ok(Self {
            engine,
            config,
            stats: InvokerStats::default(),
        })
    }

    /// Create an invoker with the default 256-page memory and empty table.
    pub fn with_defaults() -> Result<Self> {
        Self::new(InvokeConfig::default())
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &InvokeConfig {
        &self.config
    }

    /// Pipeline counters
    #[must_use]
    pub fn stats(&self) -> &InvokerStats {
        &self.stats
    }

    /// Compile and validate binary module bytes.
    pub fn compile(&mut self, bytes: &[u8]) -> Result<Module> {
        if bytes.is_empty() {
            return Err(kinds::empty_module());
        }

        let compile_start = Instant::now();
        let module = Module::from_binary(&self.engine, bytes)
            .map_err(|e| kinds::compilation_error(format!("{e:#}")))?;
        info!(
            "Compiled {} bytes of WebAssembly code in {:?}",
            bytes.len(),
            compile_start.elapsed()
        );

        self.stats.modules_compiled += 1;
        Ok(module)
    }

    /// Instantiate `module` against a fresh memory and table.
    pub fn instantiate(&mut self, module: &Module) -> Result<ExportTable> {
        let mut store = Store::new(&self.engine, ());
        let environment = Environment::new(&mut store, &self.config)?;
        let imports = environment.resolve(module)?;

        let inst_start = Instant::now();
        let instance = Instance::new(&mut store, module, &imports).map_err(|e| {
            // A trapping start function is a trap, not a linking problem.
            if e.downcast_ref::<wasmtime::Trap>().is_some() {
                classify_call_error(&e)
            } else {
                kinds::link_error(format!("{e:#}"))
            }
        })?;
        info!("Module instantiated in {:?}", inst_start.elapsed());

        self.stats.instances_created += 1;
        Ok(ExportTable::new(store, &instance, environment))
    }

    /// Compile `bytes`, instantiate the module and call `func` with `args`.
    ///
    /// Returns the call's results together with the instance's exports so
    /// the caller can inspect memory or call other exports afterwards.
    pub fn compile_and_run(&mut self, bytes: &[u8], func: &str, args: &[i64]) -> Result<Invocation> {
        if func.is_empty() {
            return Err(kinds::missing_argument("function name"));
        }

        let module = self.compile(bytes)?;
        let mut exports = self.instantiate(&module)?;
        drop(module);

        if exports.is_empty() {
            return Err(kinds::no_exports());
        }

        info!("Invoking exported function {} with arguments {:?}", func, args);
        let results = exports.call(func, args)?;
        self.stats.functions_invoked += 1;

        Ok(Invocation { results, exports })
    }
}

//! Export table of a live instance.
//!
//! Exports are kept as a tagged variant per name and type-checked when they
//! are looked up, so asking for a function that turns out to be a memory is
//! a typed error rather than a failed dynamic call.

use core::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};
use wasmtime::{Extern, Func, Global, Instance, Memory, Store, Table};
use wrun_error::{kinds, Result};

use crate::{
    config::MEMORY_NAME,
    environment::Environment,
    memory::{self, MemoryView},
    value::{self, Value},
};

/// Kind of an exported item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Callable function
    Function,
    /// Linear memory
    Memory,
    /// Table
    Table,
    /// Global
    Global,
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Function => "function",
            Self::Memory => "memory",
            Self::Table => "table",
            Self::Global => "global",
        };
        f.write_str(name)
    }
}

/// An exported item of an instance
#[derive(Debug, Clone)]
pub enum Export {
    /// Callable function
    Func(Func),
    /// Linear memory
    Memory(Memory),
    /// Table
    Table(Table),
    /// Global
    Global(Global),
}

impl Export {
    fn from_extern(item: Extern) -> Option<Self> {
        match item {
            Extern::Func(f) => Some(Self::Func(f)),
            Extern::Memory(m) => Some(Self::Memory(m)),
            Extern::Table(t) => Some(Self::Table(t)),
            Extern::Global(g) => Some(Self::Global(g)),
            _ => None,
        }
    }

    /// Kind of this export
    #[must_use]
    pub const fn kind(&self) -> ExportKind {
        match self {
            Self::Func(_) => ExportKind::Function,
            Self::Memory(_) => ExportKind::Memory,
            Self::Table(_) => ExportKind::Table,
            Self::Global(_) => ExportKind::Global,
        }
    }
}

/// Name-ordered view of an instance's exports, owning the instance's store.
///
/// Dropping the table drops the instance, its memory and its table.
pub struct ExportTable {
    store:       Store<()>,
    entries:     Vec<(String, Export)>,
    environment: Environment,
}

impl ExportTable {
    pub(crate) fn new(mut store: Store<()>, instance: &Instance, environment: Environment) -> Self {
        let entries = instance
            .exports(&mut store)
            .filter_map(|export| {
                let name = export.name().to_string();
                Export::from_extern(export.into_extern()).map(|item| (name, item))
            })
            .collect::<Vec<_>>();

        debug!(count = entries.len(), "Collected instance exports");
        Self {
            store,
            entries,
            environment,
        }
    }

    /// Number of exports
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the instance exports nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Look up an export by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Export> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, export)| export)
    }

    /// Whether `name` is an exported function
    #[must_use]
    pub fn has_func(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Export::Func(_)))
    }

    fn lookup(&self, name: &str) -> Result<&Export> {
        self.get(name).ok_or_else(|| {
            warn!("Export '{}' not found", name);
            kinds::export_not_found(name, self.names())
        })
    }

    /// Look up an exported function
    pub fn func(&self, name: &str) -> Result<Func> {
        match self.lookup(name)? {
            Export::Func(func) => Ok(*func),
            other => Err(kinds::type_mismatch(format!(
                "{name} is a {}, not a function",
                other.kind()
            ))),
        }
    }

    /// Look up an exported memory
    pub fn memory(&self, name: &str) -> Result<Memory> {
        match self.lookup(name)? {
            Export::Memory(memory) => Ok(*memory),
            other => Err(kinds::type_mismatch(format!(
                "{name} is a {}, not a memory",
                other.kind()
            ))),
        }
    }

    /// Memory used for diagnostics: the exported `memory` if the module
    /// exports one, otherwise the host-provided memory.
    #[must_use]
    pub fn diagnostic_memory(&self) -> Memory {
        match self.get(MEMORY_NAME) {
            Some(Export::Memory(memory)) => *memory,
            _ => self.environment.memory,
        }
    }

    /// Host environment the instance was linked against
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The store owning the instance
    #[must_use]
    pub fn store(&self) -> &Store<()> {
        &self.store
    }

    /// Call an exported function with integer arguments.
    ///
    /// The argument count must match the function's parameter count; each
    /// argument is coerced to its declared parameter type. Traps raised by
    /// the guest are returned as trap errors.
    pub fn call(&mut self, name: &str, args: &[i64]) -> Result<Vec<Value>> {
        let func = self.func(name)?;
        let ty = func.ty(&self.store);

        if ty.params().len() != args.len() {
            return Err(kinds::arity_mismatch(name, ty.params().len(), args.len()));
        }
        let params = ty
            .params()
            .zip(args)
            .enumerate()
            .map(|(position, (param, &arg))| value::coerce_arg(position, arg, &param))
            .collect::<Result<Vec<_>>>()?;
        let mut results = ty
            .results()
            .map(|result| value::result_slot(&result))
            .collect::<Result<Vec<_>>>()?;

        debug!("Calling {} with {} argument(s)", name, params.len());
        let call_start = Instant::now();
        func.call(&mut self.store, &params, &mut results)
            .map_err(|e| classify_call_error(&e))?;
        info!("Function {} completed in {:?}", name, call_start.elapsed());

        results.iter().map(Value::from_val).collect()
    }

    /// Read `count` `i32` values at byte `offset` of `memory`
    pub fn read_region(
        &self,
        memory: &Memory,
        offset: usize,
        count: usize,
    ) -> Result<MemoryView<'_>> {
        memory::read_region(memory, &self.store, offset, count)
    }

    /// Treat a call's single integer result as a pointer into the diagnostic
    /// memory and read `count` `i32` values there.
    pub fn dump_result(&self, results: &[Value], count: usize) -> Result<Vec<i32>> {
        let pointer = match results {
            [single] => single.as_address()?,
            _ => {
                return Err(kinds::type_mismatch(format!(
                    "expected a single pointer result, got {} value(s)",
                    results.len()
                )));
            }
        };
        let memory = self.diagnostic_memory();
        Ok(self.read_region(&memory, pointer, count)?.to_vec())
    }
}

impl fmt::Debug for ExportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, export)| (name, export.kind())))
            .finish()
    }
}

/// Map a failed host call to a trap or execution error.
pub(crate) fn classify_call_error(err: &wasmtime::Error) -> wrun_error::Error {
    match err.downcast_ref::<wasmtime::Trap>() {
        Some(trap) => kinds::trap(trap.to_string()),
        None => kinds::execution_error(format!("{err:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_kind_display() {
        assert_eq!(ExportKind::Function.to_string(), "function");
        assert_eq!(ExportKind::Memory.to_string(), "memory");
        assert_eq!(ExportKind::Table.to_string(), "table");
        assert_eq!(ExportKind::Global.to_string(), "global");
    }

    #[test]
    fn test_classify_plain_error_as_execution_failure() {
        let err = wasmtime::Error::msg("host function failed");
        let classified = classify_call_error(&err);
        assert!(classified.is_trap());
        assert_eq!(classified.code, wrun_error::codes::EXECUTION_FAILED);
    }
}

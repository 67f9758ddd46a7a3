//! The fixed import environment every module is linked against.
//!
//! The environment is an import record of exactly two entries: a linear
//! memory named `memory` and an indirect-call table named `table`. Imports
//! are matched by field name and kind; the module namespace is not checked.

use tracing::debug;
use wasmtime::{Extern, ExternType, Memory, MemoryType, Module, Ref, RefType, Store, Table, TableType};
use wrun_error::{kinds, Result};

use crate::config::{InvokeConfig, MEMORY_NAME, TABLE_NAME};

/// Host-created memory and table handed to the module as imports.
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    /// Linear memory offered as the `memory` import.
    pub memory: Memory,
    /// Indirect-call table offered as the `table` import.
    pub table:  Table,
}

impl Environment {
    /// Allocate a fresh memory and table inside `store`.
    pub fn new<T: 'static>(store: &mut Store<T>, config: &InvokeConfig) -> Result<Self> {
        let memory = Memory::new(&mut *store, MemoryType::new(config.memory_pages, None))
            .map_err(|e| kinds::environment_error(format!("failed to create memory: {e:#}")))?;
        let table = Table::new(
            &mut *store,
            TableType::new(RefType::FUNCREF, config.table_size, None),
            Ref::Func(None),
        )
        .map_err(|e| kinds::environment_error(format!("failed to create table: {e:#}")))?;

        debug!(
            memory_pages = config.memory_pages,
            table_size = config.table_size,
            "Created host environment"
        );
        Ok(Self { memory, table })
    }

    /// Resolve every import `module` declares against this environment.
    ///
    /// Returns the externs in import order, ready for instantiation. Any
    /// import other than a memory named `memory` or a table named `table`
    /// is reported, all at once, as a link error. Type compatibility (for
    /// example a minimum size larger than the host memory) is left to
    /// instantiation.
    pub fn resolve(&self, module: &Module) -> Result<Vec<Extern>> {
        let mut externs = Vec::new();
        let mut unsatisfied = Vec::new();

        for import in module.imports() {
            match (import.name(), import.ty()) {
                (MEMORY_NAME, ExternType::Memory(_)) => externs.push(Extern::from(self.memory)),
                (TABLE_NAME, ExternType::Table(_)) => externs.push(Extern::from(self.table)),
                (name, _) => unsatisfied.push(format!("{}.{}", import.module(), name)),
            }
        }

        if !unsatisfied.is_empty() {
            return Err(kinds::unsatisfied_imports(&unsatisfied));
        }
        Ok(externs)
    }
}

#[cfg(test)]
mod tests {
    use wasmtime::Engine;

    use super::*;

    fn compile(engine: &Engine, wat: &str) -> Module {
        let wasm = wat::parse_str(wat).expect("Failed to parse WAT");
        Module::from_binary(engine, &wasm).expect("Failed to compile module")
    }

    #[test]
    fn test_environment_sizes_follow_config() {
        let engine = Engine::default();
        let mut store = Store::new(&engine, ());
        let config = InvokeConfig::default().with_memory_pages(2).with_table_size(3);
        let env = Environment::new(&mut store, &config).unwrap();

        assert_eq!(env.memory.data_size(&store), 2 * 64 * 1024);
        assert_eq!(env.table.size(&store), 3);
    }

    #[test]
    fn test_resolve_memory_and_table_in_import_order() {
        let engine = Engine::default();
        let module = compile(
            &engine,
            r#"(module
                 (import "env" "table" (table 0 funcref))
                 (import "env" "memory" (memory 1)))"#,
        );
        let mut store = Store::new(&engine, ());
        let env = Environment::new(&mut store, &InvokeConfig::default()).unwrap();

        let externs = env.resolve(&module).unwrap();
        assert_eq!(externs.len(), 2);
        assert!(externs[0].clone().into_table().is_some());
        assert!(externs[1].clone().into_memory().is_some());
    }

    #[test]
    fn test_resolve_reports_every_foreign_import() {
        let engine = Engine::default();
        let module = compile(
            &engine,
            r#"(module
                 (import "env" "log" (func (param i32)))
                 (import "env" "memory" (memory 1))
                 (import "js" "abort" (func)))"#,
        );
        let mut store = Store::new(&engine, ());
        let env = Environment::new(&mut store, &InvokeConfig::default()).unwrap();

        let err = env.resolve(&module).unwrap_err();
        assert!(err.is_link_error());
        assert!(err.message.contains("env.log"));
        assert!(err.message.contains("js.abort"));
        assert!(!err.message.contains("env.memory"));
    }

    #[test]
    fn test_resolve_rejects_memory_name_with_wrong_kind() {
        let engine = Engine::default();
        let module = compile(
            &engine,
            r#"(module (import "env" "memory" (global i32)))"#,
        );
        let mut store = Store::new(&engine, ());
        let env = Environment::new(&mut store, &InvokeConfig::default()).unwrap();

        assert!(env.resolve(&module).unwrap_err().is_link_error());
    }
}

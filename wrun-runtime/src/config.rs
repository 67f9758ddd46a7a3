//! Configuration for an invocation.

/// Initial size of the host-provided linear memory, in pages.
pub const DEFAULT_MEMORY_PAGES: u32 = 256;

/// Initial size of the host-provided indirect-call table.
pub const DEFAULT_TABLE_SIZE: u32 = 0;

/// Size of a WebAssembly page in bytes.
pub const WASM_PAGE_SIZE: usize = 64 * 1024;

/// Import (and export) name of the linear memory.
pub const MEMORY_NAME: &str = "memory";

/// Import name of the indirect-call table.
pub const TABLE_NAME: &str = "table";

/// Export returning the trace buffer offset.
pub const EXPOSE_TRACER: &str = "__expose_tracer";

/// Export returning the trace buffer length.
pub const EXPOSE_TRACER_LEN: &str = "__expose_tracer_len";

/// Names of the exports a guest implements to opt into tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracerNames {
    /// Function returning the buffer offset in bytes.
    pub offset: String,
    /// Function returning the buffer length in `i32` entries.
    pub len:    String,
}

impl Default for TracerNames {
    fn default() -> Self {
        Self {
            offset: EXPOSE_TRACER.to_string(),
            len:    EXPOSE_TRACER_LEN.to_string(),
        }
    }
}

/// Configuration for the [`Invoker`](crate::Invoker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeConfig {
    /// Initial linear memory size in pages.
    pub memory_pages: u32,
    /// Initial indirect-call table size.
    pub table_size:   u32,
    /// Trace-buffer export names.
    pub tracer:       TracerNames,
}

impl Default for InvokeConfig {
    fn default() -> Self {
        Self {
            memory_pages: DEFAULT_MEMORY_PAGES,
            table_size:   DEFAULT_TABLE_SIZE,
            tracer:       TracerNames::default(),
        }
    }
}

impl InvokeConfig {
    /// Set the initial memory size in pages.
    #[must_use]
    pub fn with_memory_pages(mut self, pages: u32) -> Self {
        self.memory_pages = pages;
        self
    }

    /// Set the initial table size.
    #[must_use]
    pub fn with_table_size(mut self, size: u32) -> Self {
        self.table_size = size;
        self
    }

    /// Set the trace-buffer export names.
    #[must_use]
    pub fn with_tracer(mut self, tracer: TracerNames) -> Self {
        self.tracer = tracer;
        self
    }

    /// Initial memory size in bytes.
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        self.memory_pages as usize * WASM_PAGE_SIZE
    }
}

//! Optional trace buffer exposed by instrumented guests.
//!
//! A guest opts in by exporting two functions, one returning the byte offset
//! of an `i32` buffer and one returning its length in entries. Guests that
//! do not export both are simply not traced.

use tracing::debug;
use wrun_error::{kinds, Result};

use crate::{config::TracerNames, exports::ExportTable, value::Value};

/// Contents of a guest's trace buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceBuffer {
    /// Byte offset of the buffer in the diagnostic memory
    pub offset:  usize,
    /// Number of entries reported by the guest
    pub len:     usize,
    /// Buffer contents
    pub entries: Vec<i32>,
}

/// Read the trace buffer if the guest exposes one.
///
/// Returns `Ok(None)` when either tracer function is missing.
pub fn read_trace(exports: &mut ExportTable, names: &TracerNames) -> Result<Option<TraceBuffer>> {
    if !exports.has_func(&names.offset) || !exports.has_func(&names.len) {
        debug!("Module does not expose a trace buffer");
        return Ok(None);
    }

    let offset = scalar(&names.offset, &exports.call(&names.offset, &[])?)?;
    let len = scalar(&names.len, &exports.call(&names.len, &[])?)?;
    debug!(offset, len, "Reading trace buffer");

    let memory = exports.diagnostic_memory();
    let entries = exports.read_region(&memory, offset, len)?.to_vec();
    Ok(Some(TraceBuffer {
        offset,
        len,
        entries,
    }))
}

fn scalar(name: &str, results: &[Value]) -> Result<usize> {
    match results {
        [single] => single.as_address(),
        _ => Err(kinds::type_mismatch(format!(
            "{name} must return exactly one integer, got {} value(s)",
            results.len()
        ))),
    }
}

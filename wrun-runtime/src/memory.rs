//! Read-only views of guest linear memory.

use core::fmt;

use wasmtime::{Memory, Store};
use wrun_error::{kinds, Result};

/// Size in bytes of one element of a [`MemoryView`].
pub const ELEMENT_SIZE: usize = core::mem::size_of::<i32>();

/// Zero-copy view of `len` little-endian `i32` values in linear memory.
///
/// The view borrows the memory's byte buffer and never mutates it. Guest
/// writes made after the view is dropped are visible to the next read.
#[derive(Clone, Copy)]
pub struct MemoryView<'a> {
    offset: usize,
    bytes:  &'a [u8],
}

impl<'a> MemoryView<'a> {
    /// Build a view of `count` elements starting at byte `offset` of `data`.
    ///
    /// `offset` must be a multiple of [`ELEMENT_SIZE`] and the whole region
    /// must lie within `data`.
    pub fn new(data: &'a [u8], offset: usize, count: usize) -> Result<Self> {
        if offset % ELEMENT_SIZE != 0 {
            return Err(kinds::unaligned_memory_access(offset, ELEMENT_SIZE));
        }
        let byte_len = count
            .checked_mul(ELEMENT_SIZE)
            .ok_or_else(|| kinds::memory_out_of_bounds(offset, usize::MAX, data.len()))?;
        let bytes = offset
            .checked_add(byte_len)
            .and_then(|end| data.get(offset..end))
            .ok_or_else(|| kinds::memory_out_of_bounds(offset, byte_len, data.len()))?;

        Ok(Self { offset, bytes })
    }

    /// Byte offset the view starts at.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of `i32` elements in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len() / ELEMENT_SIZE
    }

    /// Whether the view has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Element at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<i32> {
        let start = index.checked_mul(ELEMENT_SIZE)?;
        let chunk = self.bytes.get(start..start.checked_add(ELEMENT_SIZE)?)?;
        Some(i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + use<'a> {
        self.bytes
            .chunks_exact(ELEMENT_SIZE)
            .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }

    /// Copy the elements out of guest memory.
    #[must_use]
    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }
}

impl fmt::Debug for MemoryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryView")
            .field("offset", &self.offset)
            .field("values", &self.to_vec())
            .finish()
    }
}

impl fmt::Display for MemoryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Read `count` `i32` values at byte `offset` of `memory`.
pub fn read_region<'a, T: 'static>(
    memory: &Memory,
    store: &'a Store<T>,
    offset: usize,
    count: usize,
) -> Result<MemoryView<'a>> {
    MemoryView::new(memory.data(store), offset, count)
}

/// Read a single `i32` at byte `offset` of `memory`.
pub fn read_i32<T: 'static>(memory: &Memory, store: &Store<T>, offset: usize) -> Result<i32> {
    let view = read_region(memory, store, offset, 1)?;
    view.get(0)
        .ok_or_else(|| kinds::memory_out_of_bounds(offset, ELEMENT_SIZE, view.bytes.len()))
}

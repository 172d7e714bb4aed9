//! Shared byte buffer backing every view of one instantiation.
//!
//! A `SharedBuffer` is a fixed-length byte region with interior mutability.
//! Cloning the handle never copies bytes: every clone aliases the same
//! storage, so a write through one view is visible through all others that
//! cover the same range. Values are encoded little-endian.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{LayoutError, Result};

/// Fixed-length byte storage with per-byte interior mutability.
#[derive(Debug)]
pub struct BufferStorage {
    bytes: Box<[Cell<u8>]>,
}

impl BufferStorage {
    /// Returns the length of the storage in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Reference-counted handle to a fixed-length byte buffer.
///
/// The handle is neither `Send` nor `Sync`. Sharing one buffer between threads
/// requires copying the bytes out with [`SharedBuffer::to_vec`].
#[derive(Debug, Clone)]
pub struct SharedBuffer {
    inner: Rc<BufferStorage>,
}

impl SharedBuffer {
    /// Allocates a zero-filled buffer of `len` bytes.
    pub fn new(len: usize) -> Self {
        Self::from_bytes(vec![0u8; len])
    }

    /// Takes ownership of existing bytes. The buffer keeps their length.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let bytes: Box<[Cell<u8>]> = bytes.into_iter().map(Cell::new).collect();
        Self {
            inner: Rc::new(BufferStorage { bytes }),
        }
    }

    /// Returns the length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if both handles alias the same storage.
    pub fn ptr_eq(&self, other: &SharedBuffer) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copies the whole buffer out.
    pub fn to_vec(&self) -> Vec<u8> {
        self.inner.bytes.iter().map(Cell::get).collect()
    }

    /// Copies `len` bytes starting at `offset`.
    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<Vec<u8>> {
        self.check_range(offset, len)?;
        Ok(self.cells(offset, len).iter().map(Cell::get).collect())
    }

    /// Overwrites bytes starting at `offset` with `src`.
    pub fn write_bytes(&self, offset: usize, src: &[u8]) -> Result<()> {
        self.check_range(offset, src.len())?;
        for (cell, byte) in self.cells(offset, src.len()).iter().zip(src) {
            cell.set(*byte);
        }
        Ok(())
    }

    /// Verifies that `offset..offset + len` lies inside the buffer.
    pub fn check_range(&self, offset: usize, len: usize) -> Result<()> {
        let in_bounds = offset
            .checked_add(len)
            .is_some_and(|end| end <= self.len());
        if in_bounds {
            Ok(())
        } else {
            Err(LayoutError::ByteRangeOutOfBounds {
                offset,
                len,
                buffer_len: self.len(),
            })
        }
    }

    /// Reads `N` raw bytes at `offset`.
    ///
    /// Callers must have verified the range; views check it once at bind time.
    pub(crate) fn read_array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        for (byte, cell) in out.iter_mut().zip(self.cells(offset, N)) {
            *byte = cell.get();
        }
        out
    }

    /// Writes `N` raw bytes at `offset`. Same precondition as [`Self::read_array`].
    pub(crate) fn write_array<const N: usize>(&self, offset: usize, bytes: [u8; N]) {
        for (cell, byte) in self.cells(offset, N).iter().zip(bytes) {
            cell.set(byte);
        }
    }

    fn cells(&self, offset: usize, len: usize) -> &[Cell<u8>] {
        &self.inner.bytes[offset..offset + len]
    }
}

impl From<Vec<u8>> for SharedBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

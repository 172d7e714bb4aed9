//! Zero-copy window over a run of primitive values.

use crate::buffer::SharedBuffer;
use crate::error::{LayoutError, Result};
use crate::types::{PrimitiveKind, Scalar};

/// Contiguous window of `len` values of one primitive kind.
///
/// Reads and writes go straight to the shared buffer; the window never
/// holds a copy of the data.
#[derive(Debug, Clone)]
pub struct VectorView {
    buffer: SharedBuffer,
    offset: usize,
    kind: PrimitiveKind,
    len: usize,
}

impl VectorView {
    pub(crate) fn new(
        buffer: SharedBuffer,
        offset: usize,
        kind: PrimitiveKind,
        len: usize,
    ) -> Self {
        Self {
            buffer,
            offset,
            kind,
            len,
        }
    }

    /// Element kind.
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Absolute byte offset of the first element.
    pub fn byte_offset(&self) -> usize {
        self.offset
    }

    /// Window size in bytes.
    pub fn byte_len(&self) -> usize {
        self.kind.size() * self.len
    }

    /// Backing buffer.
    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    /// Reads element `index`.
    pub fn get(&self, index: usize) -> Result<Scalar> {
        let offset = self.element_offset(index)?;
        Ok(self.kind.read(&self.buffer, offset))
    }

    /// Writes element `index`, converting `value` to the element kind.
    pub fn set(&self, index: usize, value: impl Into<Scalar>) -> Result<()> {
        let offset = self.element_offset(index)?;
        self.kind.write(&self.buffer, offset, value.into());
        Ok(())
    }

    /// Copies values element-wise into the window, in place.
    ///
    /// Copies `min(values.len(), self.len())` elements; elements past the end
    /// of `values` are left untouched. Returns the number copied.
    pub fn copy_from<T>(&self, values: &[T]) -> usize
    where
        T: Into<Scalar> + Copy,
    {
        let count = values.len().min(self.len);
        let size = self.kind.size();
        for (i, value) in values.iter().take(count).enumerate() {
            self.kind
                .write(&self.buffer, self.offset + i * size, (*value).into());
        }
        count
    }

    /// Iterates over the current element values.
    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        let size = self.kind.size();
        (0..self.len).map(move |i| self.kind.read(&self.buffer, self.offset + i * size))
    }

    /// Copies the current values out.
    pub fn to_vec(&self) -> Vec<Scalar> {
        self.iter().collect()
    }

    /// Copies the current values out as `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.iter().map(Scalar::as_f64).collect()
    }

    fn element_offset(&self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(LayoutError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(self.offset + index * self.kind.size())
    }
}

//! Index-addressable views over an array of structs.

use std::ops::Index;

use crate::buffer::SharedBuffer;
use crate::error::{LayoutError, Result};
use crate::layout::ArrayDescriptor;

use super::struct_view::StructView;

/// Eagerly bound element views of one array-of-struct region.
#[derive(Debug)]
pub struct ArrayView {
    descriptor: ArrayDescriptor,
    buffer: SharedBuffer,
    base_offset: usize,
    elements: Vec<StructView>,
}

impl ArrayView {
    /// Binds element `i` at `base_offset + i * stride`.
    ///
    /// The caller has verified that the whole array fits in `buffer`.
    pub(crate) fn bind(
        descriptor: ArrayDescriptor,
        buffer: SharedBuffer,
        base_offset: usize,
    ) -> Self {
        let stride = descriptor.stride();
        let elements = (0..descriptor.len())
            .map(|i| {
                StructView::bind(
                    descriptor.element().clone(),
                    buffer.clone(),
                    base_offset + i * stride,
                )
            })
            .collect();
        Self {
            descriptor,
            buffer,
            base_offset,
            elements,
        }
    }

    pub fn descriptor(&self) -> &ArrayDescriptor {
        &self.descriptor
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Absolute byte offset of element 0.
    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    /// Backing buffer shared by every element.
    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    /// Returns element `index`.
    pub fn get(&self, index: usize) -> Result<&StructView> {
        self.elements
            .get(index)
            .ok_or(LayoutError::IndexOutOfRange {
                index,
                len: self.elements.len(),
            })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StructView> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[StructView] {
        &self.elements
    }
}

impl Index<usize> for ArrayView {
    type Output = StructView;

    fn index(&self, index: usize) -> &StructView {
        &self.elements[index]
    }
}

impl<'a> IntoIterator for &'a ArrayView {
    type Item = &'a StructView;
    type IntoIter = std::slice::Iter<'a, StructView>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

//! Immutable struct and array descriptors and their view factories.

use std::sync::Arc;

use crate::buffer::SharedBuffer;
use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::view::{ArrayView, StructView};

use super::field::FieldDescriptor;
use super::report::LayoutReport;
use super::resolver::{self, ResolvedLayout};
use super::schema::Schema;

#[derive(Debug)]
struct StructLayout {
    name: Option<String>,
    fields: Vec<FieldDescriptor>,
    size: usize,
}

/// Compiled, reusable layout of one struct.
///
/// Cloning is cheap and every clone refers to the same layout. A descriptor
/// can produce any number of views, over fresh or shared buffers.
#[derive(Debug, Clone)]
pub struct StructDescriptor {
    inner: Arc<StructLayout>,
}

impl PartialEq for StructDescriptor {
    /// Descriptors are equal when their resolved layouts are equal.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.size == other.inner.size && self.inner.fields == other.inner.fields)
    }
}

impl StructDescriptor {
    fn from_resolved(name: Option<String>, resolved: ResolvedLayout) -> Self {
        Self {
            inner: Arc::new(StructLayout {
                name,
                fields: resolved.fields,
                size: resolved.size,
            }),
        }
    }

    /// Struct name, when declared through a named schema.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Total size in bytes.
    pub fn size(&self) -> usize {
        self.inner.size
    }

    /// Field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.inner.fields
    }

    /// Looks up a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.inner.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
        self.inner.fields.iter().position(|f| f.name == name)
    }

    /// Returns the byte offset of a field relative to the struct base.
    pub fn field_offset(&self, name: &str) -> Result<usize> {
        self.field(name)
            .map(|f| f.offset)
            .ok_or_else(|| LayoutError::FieldNotFound {
                field: name.to_string(),
            })
    }

    /// Returns `true` if both handles share one compiled layout.
    pub fn ptr_eq(&self, other: &StructDescriptor) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Allocates a zeroed buffer of exactly [`Self::size`] bytes and binds a view at offset 0.
    pub fn create(&self) -> StructView {
        StructView::bind(self.clone(), SharedBuffer::new(self.size()), 0)
    }

    /// Binds a view over `buffer` starting at `base_offset`.
    ///
    /// # Errors
    /// `LayoutError::BufferTooSmall` if `base_offset + size` exceeds the buffer.
    pub fn create_at(&self, buffer: &SharedBuffer, base_offset: usize) -> Result<StructView> {
        check_fits(buffer, base_offset, self.size())?;
        tracing::trace!(
            "Binding struct view ({} bytes) at offset {}",
            self.size(),
            base_offset
        );
        Ok(StructView::bind(self.clone(), buffer.clone(), base_offset))
    }

    /// Describes the layout with nested fields expanded.
    pub fn report(&self) -> LayoutReport {
        LayoutReport::from_descriptor(self)
    }
}

/// Fixed-length run of one struct, laid out back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDescriptor {
    element: StructDescriptor,
    len: usize,
    size: usize,
}

impl ArrayDescriptor {
    /// Element layout.
    pub fn element(&self) -> &StructDescriptor {
        &self.element
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; zero-length arrays cannot be built.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total size in bytes (element size times length).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Byte distance between consecutive elements.
    pub fn stride(&self) -> usize {
        self.element.size()
    }

    /// Allocates a zeroed buffer for the whole array and binds every element.
    pub fn create(&self) -> ArrayView {
        ArrayView::bind(self.clone(), SharedBuffer::new(self.size), 0)
    }

    /// Binds every element over `buffer` starting at `base_offset`.
    pub fn create_at(&self, buffer: &SharedBuffer, base_offset: usize) -> Result<ArrayView> {
        check_fits(buffer, base_offset, self.size)?;
        tracing::trace!(
            "Binding array view ({} x {} bytes) at offset {}",
            self.len,
            self.stride(),
            base_offset
        );
        Ok(ArrayView::bind(self.clone(), buffer.clone(), base_offset))
    }
}

/// Builds a struct descriptor with the default [`LayoutConfig`].
///
/// # Example
/// ```
/// use struct_buffer_core::{struct_of, Schema};
/// use struct_buffer_core::types::{float32, vec3f};
///
/// let light = struct_of(Schema::new().field("color", vec3f()).field("power", float32())).unwrap();
/// assert_eq!(light.size(), 16);
/// ```
pub fn struct_of(schema: Schema) -> Result<StructDescriptor> {
    struct_of_with(schema, &LayoutConfig::default())
}

/// Builds a struct descriptor under explicit limits.
pub fn struct_of_with(schema: Schema, config: &LayoutConfig) -> Result<StructDescriptor> {
    let resolved = resolver::resolve_with(&schema, config)?;
    Ok(StructDescriptor::from_resolved(
        schema.name().map(str::to_string),
        resolved,
    ))
}

/// Builds an array-of-struct descriptor with the default [`LayoutConfig`].
pub fn array_of(element: &StructDescriptor, len: usize) -> Result<ArrayDescriptor> {
    array_of_with(element, len, &LayoutConfig::default())
}

/// Builds an array-of-struct descriptor under explicit limits.
///
/// # Errors
/// - `InvalidLength` if `len` is zero
/// - `InvalidNestedDescriptor` if the element struct has zero size
/// - `SizeOverflow` / `StructTooLarge` if the total size is unrepresentable or over the limit
pub fn array_of_with(
    element: &StructDescriptor,
    len: usize,
    config: &LayoutConfig,
) -> Result<ArrayDescriptor> {
    let label = format!("{}[]", element.name().unwrap_or("struct"));
    resolver::check_length(&label, len, config.max_array_len)?;
    if element.size() == 0 {
        return Err(LayoutError::InvalidNestedDescriptor {
            field: label,
            reason: "array element struct has zero size".to_string(),
        });
    }
    let size = element
        .size()
        .checked_mul(len)
        .ok_or(LayoutError::SizeOverflow { field: label })?;
    if size > config.max_struct_size {
        return Err(LayoutError::StructTooLarge {
            size,
            limit: config.max_struct_size,
        });
    }
    Ok(ArrayDescriptor {
        element: element.clone(),
        len,
        size,
    })
}

fn check_fits(buffer: &SharedBuffer, base_offset: usize, required: usize) -> Result<()> {
    let fits = base_offset
        .checked_add(required)
        .is_some_and(|end| end <= buffer.len());
    if fits {
        Ok(())
    } else {
        Err(LayoutError::BufferTooSmall {
            buffer_len: buffer.len(),
            base_offset,
            required,
        })
    }
}

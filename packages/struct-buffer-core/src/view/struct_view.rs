//! Field accessors for one struct bound to a buffer region.

use std::cell::OnceCell;

use serde_json::{Map, Value};

use crate::buffer::SharedBuffer;
use crate::error::{LayoutError, Result};
use crate::layout::{FieldDescriptor, FieldKind, StructDescriptor};
use crate::types::Scalar;

use super::array_view::ArrayView;
use super::vector_view::VectorView;

/// Per-field binding state, index-aligned with the descriptor's fields.
#[derive(Debug)]
enum FieldSlot {
    Scalar,
    /// Created on first access, then reused for the life of the view.
    Vector(OnceCell<VectorView>),
    Struct(StructView),
    Array(ArrayView),
}

/// Live accessor for one struct at a fixed offset of a shared buffer.
///
/// The view stores no field data of its own. Scalars are decoded on every
/// read, vector fields hand out a cached window, and nested struct and array
/// fields hold sub-views over the same buffer.
#[derive(Debug)]
pub struct StructView {
    descriptor: StructDescriptor,
    buffer: SharedBuffer,
    base_offset: usize,
    slots: Vec<FieldSlot>,
}

impl StructView {
    /// Binds a view and, recursively, all nested struct and array sub-views.
    ///
    /// The caller has verified that `base_offset + descriptor.size()` fits in
    /// `buffer`; nested regions are contained in that range.
    pub(crate) fn bind(
        descriptor: StructDescriptor,
        buffer: SharedBuffer,
        base_offset: usize,
    ) -> Self {
        let slots = descriptor
            .fields()
            .iter()
            .map(|field| {
                let offset = base_offset + field.offset;
                match &field.kind {
                    FieldKind::Scalar(_) => FieldSlot::Scalar,
                    FieldKind::Vector { .. } => FieldSlot::Vector(OnceCell::new()),
                    FieldKind::Struct(nested) => {
                        FieldSlot::Struct(StructView::bind(nested.clone(), buffer.clone(), offset))
                    }
                    FieldKind::Array(array) => {
                        FieldSlot::Array(ArrayView::bind(array.clone(), buffer.clone(), offset))
                    }
                }
            })
            .collect();

        Self {
            descriptor,
            buffer,
            base_offset,
            slots,
        }
    }

    pub fn descriptor(&self) -> &StructDescriptor {
        &self.descriptor
    }

    /// Raw backing buffer. Not part of [`Self::field_names`].
    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    /// Absolute byte offset of this struct in the buffer.
    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    /// Size of this struct in bytes.
    pub fn size(&self) -> usize {
        self.descriptor.size()
    }

    /// Logical field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.descriptor.fields().iter().map(|f| f.name.as_str())
    }

    /// Reads a scalar field.
    pub fn get(&self, name: &str) -> Result<Scalar> {
        let (field, _) = self.lookup(name)?;
        match &field.kind {
            FieldKind::Scalar(kind) => Ok(kind.read(&self.buffer, self.absolute(field))),
            other => Err(kind_mismatch(name, "scalar", other)),
        }
    }

    /// Reads a scalar field as `f64`.
    pub fn get_f64(&self, name: &str) -> Result<f64> {
        self.get(name).map(Scalar::as_f64)
    }

    /// Writes a scalar field.
    ///
    /// The value is converted to the field's kind: non-integral values
    /// truncate and out-of-range values wrap to the kind's width.
    pub fn set(&self, name: &str, value: impl Into<Scalar>) -> Result<()> {
        let (field, _) = self.lookup(name)?;
        match &field.kind {
            FieldKind::Scalar(kind) => {
                kind.write(&self.buffer, self.absolute(field), value.into());
                Ok(())
            }
            other => Err(kind_mismatch(name, "scalar", other)),
        }
    }

    /// Returns the vector window for a field.
    ///
    /// The window is created on first access; later calls return the same
    /// object.
    pub fn vector(&self, name: &str) -> Result<&VectorView> {
        let (field, slot) = self.lookup(name)?;
        match (&field.kind, slot) {
            (FieldKind::Vector { kind, len }, FieldSlot::Vector(cell)) => {
                let offset = self.absolute(field);
                Ok(cell.get_or_init(|| VectorView::new(self.buffer.clone(), offset, *kind, *len)))
            }
            (other, _) => Err(kind_mismatch(name, "vector", other)),
        }
    }

    /// Copies `values` element-wise into a vector field without rebinding its window.
    ///
    /// Returns the number of elements copied.
    pub fn set_vector<T>(&self, name: &str, values: &[T]) -> Result<usize>
    where
        T: Into<Scalar> + Copy,
    {
        Ok(self.vector(name)?.copy_from(values))
    }

    /// Returns the sub-view of a nested struct field.
    pub fn struct_field(&self, name: &str) -> Result<&StructView> {
        let (field, slot) = self.lookup(name)?;
        match slot {
            FieldSlot::Struct(view) => Ok(view),
            _ => Err(kind_mismatch(name, "struct", &field.kind)),
        }
    }

    /// Returns the element views of an array field.
    pub fn array(&self, name: &str) -> Result<&ArrayView> {
        let (field, slot) = self.lookup(name)?;
        match slot {
            FieldSlot::Array(view) => Ok(view),
            _ => Err(kind_mismatch(name, "array", &field.kind)),
        }
    }

    /// Copies this struct's byte range out of the buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.buffer.read_bytes(self.base_offset, self.size())
    }

    /// Decodes every field into a JSON object, recursing into nested fields.
    ///
    /// Non-finite floats become `null`.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(self.slots.len());
        for (field, slot) in self.descriptor.fields().iter().zip(&self.slots) {
            let value = match (&field.kind, slot) {
                (FieldKind::Scalar(kind), _) => {
                    scalar_json(kind.read(&self.buffer, self.absolute(field)))
                }
                (FieldKind::Vector { kind, len }, _) => {
                    let size = kind.size();
                    let start = self.absolute(field);
                    Value::Array(
                        (0..*len)
                            .map(|i| scalar_json(kind.read(&self.buffer, start + i * size)))
                            .collect(),
                    )
                }
                (_, FieldSlot::Struct(view)) => view.to_json(),
                (_, FieldSlot::Array(view)) => {
                    Value::Array(view.iter().map(StructView::to_json).collect())
                }
                _ => Value::Null,
            };
            map.insert(field.name.clone(), value);
        }
        Value::Object(map)
    }

    fn lookup(&self, name: &str) -> Result<(&FieldDescriptor, &FieldSlot)> {
        let index = self
            .descriptor
            .field_index(name)
            .ok_or_else(|| LayoutError::FieldNotFound {
                field: name.to_string(),
            })?;
        Ok((&self.descriptor.fields()[index], &self.slots[index]))
    }

    fn absolute(&self, field: &FieldDescriptor) -> usize {
        self.base_offset + field.offset
    }
}

fn kind_mismatch(field: &str, expected: &'static str, actual: &FieldKind) -> LayoutError {
    LayoutError::FieldKindMismatch {
        field: field.to_string(),
        expected,
        actual: actual.name(),
    }
}

fn scalar_json(value: Scalar) -> Value {
    match value {
        // Shortest f32 text, so 0.1f32 renders as 0.1 and not its f64 widening
        Scalar::F32(v) if v.is_finite() => v
            .to_string()
            .parse::<f64>()
            .map(Value::from)
            .unwrap_or(Value::Null),
        Scalar::F32(_) => Value::Null,
        Scalar::F64(v) => Value::from(v),
        Scalar::I16(v) => Value::from(v),
        Scalar::I32(v) => Value::from(v),
        Scalar::I64(v) => Value::from(v),
        Scalar::U16(v) => Value::from(v),
        Scalar::U32(v) => Value::from(v),
        Scalar::U64(v) => Value::from(v),
    }
}

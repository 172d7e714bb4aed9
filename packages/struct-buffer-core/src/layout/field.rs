//! Resolved field descriptors.

use crate::types::PrimitiveKind;

use super::descriptor::{ArrayDescriptor, StructDescriptor};

/// Kind-specific payload of a resolved field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar(PrimitiveKind),
    Vector { kind: PrimitiveKind, len: usize },
    Struct(StructDescriptor),
    Array(ArrayDescriptor),
}

impl FieldKind {
    /// Shape name ("scalar", "vector", "struct", "array").
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Scalar(_) => "scalar",
            FieldKind::Vector { .. } => "vector",
            FieldKind::Struct(_) => "struct",
            FieldKind::Array(_) => "array",
        }
    }

    /// Human readable type, e.g. `f32`, `f32[3]`, `Item[4]`.
    pub fn type_label(&self) -> String {
        match self {
            FieldKind::Scalar(kind) => kind.name().to_string(),
            FieldKind::Vector { kind, len } => format!("{}[{}]", kind, len),
            FieldKind::Struct(descriptor) => descriptor.name().unwrap_or("struct").to_string(),
            FieldKind::Array(array) => format!(
                "{}[{}]",
                array.element().name().unwrap_or("struct"),
                array.len()
            ),
        }
    }
}

/// Field definition within a resolved struct.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Byte offset relative to the enclosing struct's base
    pub offset: usize,
    /// Field size in bytes
    pub size: usize,
    /// Shape and payload
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Returns the end offset of this field (offset + size).
    pub fn end_offset(&self) -> usize {
        self.offset + self.size
    }
}

use crate::layout::{ArrayDescriptor, StructDescriptor};

use super::primitive::PrimitiveKind;

/// Shape of one declared field in a schema.
///
/// Array-of-struct is its own variant, so the resolver never has to inspect a
/// descriptor to tell a nested struct from an array.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// One primitive value
    Scalar(PrimitiveKind),
    /// `len` contiguous values of one primitive kind
    Vector { kind: PrimitiveKind, len: usize },
    /// Nested struct laid out inline
    Struct(StructDescriptor),
    /// Fixed-length run of one struct laid out inline
    Array(ArrayDescriptor),
}

impl FieldSpec {
    /// Short shape name used in error messages and reports.
    pub fn shape_name(&self) -> &'static str {
        match self {
            FieldSpec::Scalar(_) => "scalar",
            FieldSpec::Vector { .. } => "vector",
            FieldSpec::Struct(_) => "struct",
            FieldSpec::Array(_) => "array",
        }
    }
}

impl From<PrimitiveKind> for FieldSpec {
    fn from(kind: PrimitiveKind) -> Self {
        FieldSpec::Scalar(kind)
    }
}

impl From<StructDescriptor> for FieldSpec {
    fn from(descriptor: StructDescriptor) -> Self {
        FieldSpec::Struct(descriptor)
    }
}

impl From<&StructDescriptor> for FieldSpec {
    fn from(descriptor: &StructDescriptor) -> Self {
        FieldSpec::Struct(descriptor.clone())
    }
}

impl From<ArrayDescriptor> for FieldSpec {
    fn from(descriptor: ArrayDescriptor) -> Self {
        FieldSpec::Array(descriptor)
    }
}

impl From<&ArrayDescriptor> for FieldSpec {
    fn from(descriptor: &ArrayDescriptor) -> Self {
        FieldSpec::Array(descriptor.clone())
    }
}

//! Schema to packed layout resolution.
//!
//! Fields are packed densely in declaration order: each field starts where
//! the previous one ends, with no alignment padding. The resulting byte
//! layout is a binary-compatibility contract and must not change.

use std::collections::HashSet;

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::types::FieldSpec;

use super::field::{FieldDescriptor, FieldKind};
use super::schema::Schema;

/// Ordered field descriptors and total size produced by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayout {
    pub fields: Vec<FieldDescriptor>,
    pub size: usize,
}

/// Resolves a schema with the default [`LayoutConfig`].
pub fn resolve(schema: &Schema) -> Result<ResolvedLayout> {
    resolve_with(schema, &LayoutConfig::default())
}

/// Resolves a schema into offset-annotated fields.
///
/// # Arguments
/// * `schema` - Ordered field declarations
/// * `config` - Size and length limits
///
/// # Returns
/// `Result<ResolvedLayout, LayoutError>`; every error names the offending field.
pub fn resolve_with(schema: &Schema, config: &LayoutConfig) -> Result<ResolvedLayout> {
    let mut seen_names = HashSet::with_capacity(schema.len());
    let mut fields = Vec::with_capacity(schema.len());
    let mut current_offset = 0usize;

    for (name, spec) in schema.entries() {
        if !seen_names.insert(name.as_str()) {
            return Err(LayoutError::DuplicateField {
                field: name.clone(),
            });
        }

        let (kind, size) = classify_field(name, spec, config)?;
        fields.push(FieldDescriptor {
            name: name.clone(),
            offset: current_offset,
            size,
            kind,
        });

        current_offset = current_offset
            .checked_add(size)
            .ok_or_else(|| LayoutError::SizeOverflow {
                field: name.clone(),
            })?;
    }

    if current_offset > config.max_struct_size {
        return Err(LayoutError::StructTooLarge {
            size: current_offset,
            limit: config.max_struct_size,
        });
    }

    tracing::debug!(
        "Resolved layout{}: {} fields, {} bytes",
        schema.name().map(|n| format!(" '{}'", n)).unwrap_or_default(),
        fields.len(),
        current_offset
    );

    Ok(ResolvedLayout {
        fields,
        size: current_offset,
    })
}

/// Maps one declared shape to its resolved kind and byte size.
fn classify_field(
    name: &str,
    spec: &FieldSpec,
    config: &LayoutConfig,
) -> Result<(FieldKind, usize)> {
    match spec {
        FieldSpec::Scalar(kind) => Ok((FieldKind::Scalar(*kind), kind.size())),
        FieldSpec::Vector { kind, len } => {
            check_length(name, *len, config.max_vector_len)?;
            let size = kind
                .size()
                .checked_mul(*len)
                .ok_or_else(|| LayoutError::SizeOverflow {
                    field: name.to_string(),
                })?;
            Ok((
                FieldKind::Vector {
                    kind: *kind,
                    len: *len,
                },
                size,
            ))
        }
        FieldSpec::Struct(descriptor) => {
            if descriptor.size() == 0 {
                return Err(LayoutError::InvalidNestedDescriptor {
                    field: name.to_string(),
                    reason: "nested struct has zero size".to_string(),
                });
            }
            Ok((FieldKind::Struct(descriptor.clone()), descriptor.size()))
        }
        FieldSpec::Array(array) => {
            check_length(name, array.len(), config.max_array_len)?;
            if array.element().size() == 0 {
                return Err(LayoutError::InvalidNestedDescriptor {
                    field: name.to_string(),
                    reason: "array element struct has zero size".to_string(),
                });
            }
            Ok((FieldKind::Array(array.clone()), array.size()))
        }
    }
}

/// Rejects zero lengths and lengths above `limit`.
pub(crate) fn check_length(field: &str, len: usize, limit: usize) -> Result<()> {
    if len == 0 {
        return Err(LayoutError::InvalidLength {
            field: field.to_string(),
            length: len.to_string(),
        });
    }
    if len > limit {
        return Err(LayoutError::LengthLimitExceeded {
            field: field.to_string(),
            length: len,
            limit,
        });
    }
    Ok(())
}

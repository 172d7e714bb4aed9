//! Serializable layout reports for tooling.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::descriptor::StructDescriptor;
use super::field::{FieldDescriptor, FieldKind};

/// Layout of one struct with nested fields expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    /// Struct name, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Total size in bytes
    pub size: usize,
    /// Top-level fields in declaration order
    pub fields: Vec<FieldReport>,
}

/// One field of a [`LayoutReport`].
///
/// Offsets are absolute from the reported struct's base. Array children
/// describe the first element; later elements follow at `stride` intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    pub name: String,
    /// Shape name ("scalar", "vector", "struct", "array")
    pub kind: String,
    /// Type label, e.g. `f32[3]`
    #[serde(rename = "type")]
    pub type_label: String,
    pub offset: usize,
    pub size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stride: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldReport>,
}

impl LayoutReport {
    pub(crate) fn from_descriptor(descriptor: &StructDescriptor) -> Self {
        Self {
            name: descriptor.name().map(str::to_string),
            size: descriptor.size(),
            fields: field_reports(descriptor, 0),
        }
    }
}

fn field_reports(descriptor: &StructDescriptor, base: usize) -> Vec<FieldReport> {
    descriptor
        .fields()
        .iter()
        .map(|field| field_report(field, base))
        .collect()
}

fn field_report(field: &FieldDescriptor, base: usize) -> FieldReport {
    let offset = base + field.offset;
    let (len, stride, children) = match &field.kind {
        FieldKind::Scalar(_) => (None, None, Vec::new()),
        FieldKind::Vector { kind, len } => (Some(*len), Some(kind.size()), Vec::new()),
        FieldKind::Struct(nested) => (None, None, field_reports(nested, offset)),
        FieldKind::Array(array) => (
            Some(array.len()),
            Some(array.stride()),
            field_reports(array.element(), offset),
        ),
    };
    FieldReport {
        name: field.name.clone(),
        kind: field.kind.name().to_string(),
        type_label: field.kind.type_label(),
        offset,
        size: field.size,
        len,
        stride,
        children,
    }
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} bytes)",
            self.name.as_deref().unwrap_or("<anonymous>"),
            self.size
        )?;
        writeln!(f, "{:>8} {:>8}  {:<24} type", "offset", "size", "field")?;
        for field in &self.fields {
            write_field(f, field, 0)?;
        }
        Ok(())
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &FieldReport, depth: usize) -> fmt::Result {
    let name = format!("{}{}", "  ".repeat(depth), field.name);
    writeln!(
        f,
        "{:>8} {:>8}  {:<24} {}",
        field.offset, field.size, name, field.type_label
    )?;
    for child in &field.children {
        write_field(f, child, depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::layout::{array_of, struct_of, Schema};
    use crate::types::{float32, uint32, vec3f};

    #[test]
    fn test_report_expands_nested_fields() {
        let rgb = struct_of(
            Schema::named("Rgb")
                .field("r", float32())
                .field("g", float32())
                .field("b", float32()),
        )
        .unwrap();
        let item = struct_of(Schema::named("Item").field("color", vec3f())).unwrap();
        let root = struct_of(
            Schema::named("Scene")
                .field("id", uint32())
                .field("tint", &rgb)
                .field("items", array_of(&item, 2).unwrap()),
        )
        .unwrap();

        let report = root.report();
        assert_eq!(report.name.as_deref(), Some("Scene"));
        assert_eq!(report.size, 4 + 12 + 24);

        let tint = &report.fields[1];
        assert_eq!(tint.kind, "struct");
        assert_eq!(tint.type_label, "Rgb");
        assert_eq!(tint.children[2].name, "b");
        assert_eq!(tint.children[2].offset, 12);

        let items = &report.fields[2];
        assert_eq!(items.type_label, "Item[2]");
        assert_eq!(items.len, Some(2));
        assert_eq!(items.stride, Some(12));
        assert_eq!(items.children[0].offset, 16);
        assert_eq!(items.children[0].type_label, "f32[3]");
    }

    #[test]
    fn test_report_json_shape() {
        let descriptor = struct_of(Schema::new().field("v", vec3f())).unwrap();
        let json = serde_json::to_value(descriptor.report()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "size": 12,
                "fields": [
                    {"name": "v", "kind": "vector", "type": "f32[3]",
                     "offset": 0, "size": 12, "len": 3, "stride": 4}
                ]
            })
        );
    }

    #[test]
    fn test_report_text_table() {
        let descriptor =
            struct_of(Schema::named("Pair").field("a", uint32()).field("b", float32())).unwrap();
        let text = descriptor.report().to_string();
        assert!(text.starts_with("Pair (8 bytes)\n"));
        assert!(text.contains("       4        4  b"));
    }
}

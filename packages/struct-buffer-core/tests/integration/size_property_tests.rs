//! Size and offset properties over a spread of generated schemas.

use ntest::timeout;

use struct_buffer_core::types::vector;
use struct_buffer_core::{
    array_of, struct_of, FieldKind, FieldSpec, PrimitiveKind, Schema, StructDescriptor,
};

fn expected_size(spec: &FieldSpec) -> usize {
    match spec {
        FieldSpec::Scalar(kind) => kind.size(),
        FieldSpec::Vector { kind, len } => kind.size() * len,
        FieldSpec::Struct(descriptor) => descriptor.size(),
        FieldSpec::Array(array) => array.element().size() * array.len(),
    }
}

/// Deterministic mix of every field shape.
fn generated_schemas() -> Vec<Schema> {
    let leaf = struct_of(
        Schema::new()
            .field("a", PrimitiveKind::U16)
            .field("b", PrimitiveKind::F64),
    )
    .unwrap();

    (1..=12usize)
        .map(|n| {
            let mut schema = Schema::new();
            for i in 0..n {
                let kind = PrimitiveKind::ALL[(i * 5 + n) % PrimitiveKind::ALL.len()];
                let spec: FieldSpec = match (i + n) % 4 {
                    0 => kind.into(),
                    1 => vector(kind, 1 + (i % 5)),
                    2 => (&leaf).into(),
                    _ => array_of(&leaf, 1 + (n % 3)).unwrap().into(),
                };
                schema.push(format!("f{}", i), spec);
            }
            schema
        })
        .collect()
}

fn check_offsets(descriptor: &StructDescriptor, schema: &Schema) {
    let mut running = 0;
    for (field, (name, spec)) in descriptor.fields().iter().zip(schema.entries()) {
        assert_eq!(&field.name, name);
        assert_eq!(field.offset, running);
        assert_eq!(field.size, expected_size(spec));
        running = field.end_offset();
    }
    assert_eq!(descriptor.size(), running);
}

#[timeout(5000)]
#[test]
fn test_size_is_sum_of_field_sizes() {
    for schema in generated_schemas() {
        let expected: usize = schema.entries().iter().map(|(_, s)| expected_size(s)).sum();
        let descriptor = struct_of(schema.clone()).unwrap();

        assert_eq!(descriptor.size(), expected);
        assert_eq!(descriptor.create().buffer().len(), expected);
        check_offsets(&descriptor, &schema);
    }
}

#[timeout(5000)]
#[test]
fn test_scalar_after_nested_struct_offset() {
    let nested = struct_of(
        Schema::new()
            .field("x", PrimitiveKind::F32)
            .field("y", PrimitiveKind::F32),
    )
    .unwrap();
    let descriptor = struct_of(
        Schema::new()
            .field("a", PrimitiveKind::U32)
            .field("b", nested)
            .field("c", PrimitiveKind::U16),
    )
    .unwrap();

    assert_eq!(descriptor.field_offset("b").unwrap(), 4);
    assert_eq!(descriptor.field_offset("c").unwrap(), 12);
    assert!(matches!(
        descriptor.field("b").unwrap().kind,
        FieldKind::Struct(_)
    ));
}

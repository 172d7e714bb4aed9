//! Schema files written to and loaded from disk.

use ntest::timeout;
use serde_json::Number;
use tempfile::tempdir;

use struct_buffer_core::schema_file::{
    load_schema_file, load_schema_file_with, FieldSchema, SchemaFile, StructSchema,
    SCHEMA_VERSION,
};
use struct_buffer_core::{LayoutConfig, LayoutError, Scalar};

fn field(name: &str, ty: &str, len: Option<u64>) -> FieldSchema {
    FieldSchema {
        name: name.to_string(),
        r#type: ty.to_string(),
        len: len.map(Number::from),
    }
}

fn light_schema() -> SchemaFile {
    SchemaFile {
        version: SCHEMA_VERSION,
        structs: vec![
            StructSchema {
                name: "Light".to_string(),
                fields: vec![
                    field("color", "vec3f", None),
                    field("intensity", "f32", None),
                    field("samples", "Sample", Some(2)),
                ],
            },
            StructSchema {
                name: "Sample".to_string(),
                fields: vec![field("offset", "i16", Some(2)), field("weight", "u16", None)],
            },
        ],
    }
}

#[timeout(5000)]
#[test]
fn test_schema_file_round_trip_through_disk() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("lights.json");
    light_schema().write_to(&path)?;

    let reloaded = SchemaFile::from_json(&std::fs::read_to_string(&path)?)?;
    assert_eq!(reloaded, light_schema());

    let registry = load_schema_file(&path)?;
    let light = registry.require("Light")?;
    assert_eq!(registry.require("Sample")?.size(), 6);
    assert_eq!(light.size(), 12 + 4 + 12);

    let view = light.create();
    let samples = view.array("samples")?;
    samples[1].vector("offset")?.set(0, -3i16)?;
    samples[1].set("weight", 9u16)?;
    assert_eq!(samples[1].base_offset(), 22);
    assert_eq!(view.buffer().read_bytes(22, 2)?, (-3i16).to_le_bytes().to_vec());
    assert_eq!(samples[1].get("weight")?, Scalar::U16(9));
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_missing_file_reports_io_error() {
    let dir = tempdir().unwrap();
    let result = load_schema_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(LayoutError::IoError(_))));
}

#[timeout(5000)]
#[test]
fn test_malformed_json_reports_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"version\": 1, \"structs\": [ ").unwrap();
    assert!(matches!(
        load_schema_file(&path),
        Err(LayoutError::SchemaParse(_))
    ));
}

#[timeout(5000)]
#[test]
fn test_config_limits_apply_to_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lights.json");
    light_schema().write_to(&path).unwrap();

    let config = LayoutConfig {
        max_array_len: 1,
        ..Default::default()
    };
    assert!(matches!(
        load_schema_file_with(&path, &config),
        Err(LayoutError::LengthLimitExceeded { .. })
    ));
}

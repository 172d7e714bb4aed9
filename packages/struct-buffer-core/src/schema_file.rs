//! JSON schema files declaring named structs.
//!
//! ```json
//! { "version": 1,
//!   "structs": [
//!     { "name": "Item", "fields": [ { "name": "color", "type": "f32", "len": 3 } ] },
//!     { "name": "Scene", "fields": [ { "name": "items", "type": "Item", "len": 4 },
//!                                    { "name": "view", "type": "mat4f" } ] } ] }
//! ```
//!
//! `type` is a primitive name, a vector/matrix shorthand, or another struct
//! in the same file. `len` turns a primitive into a vector and a struct into
//! an array. Structs may reference structs declared later in the file.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::layout::{array_of_with, struct_of_with, Schema, StructDescriptor};
use crate::registry::StructRegistry;
use crate::types::{builtin_alias, vector, FieldSpec, PrimitiveKind};

/// Supported schema file format version.
pub const SCHEMA_VERSION: u32 = 1;

/// Schema file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Format version
    pub version: u32,
    /// Struct definitions
    pub structs: Vec<StructSchema>,
}

/// One named struct in a schema file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructSchema {
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldSchema>,
}

/// One field in a schema file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSchema {
    pub name: String,
    /// Primitive name, shorthand, or struct name
    pub r#type: String,
    /// Element count for vectors and arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<serde_json::Number>,
}

impl SchemaFile {
    /// Parses a schema file from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the schema file as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the schema file to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Resolves every struct into a registry using the default limits.
    pub fn to_registry(&self) -> Result<StructRegistry> {
        self.to_registry_with(&LayoutConfig::default())
    }

    /// Resolves every struct into a registry.
    ///
    /// # Errors
    /// Unknown types, invalid lengths, duplicate or cyclic struct names, and
    /// any resolver error for an individual struct.
    pub fn to_registry_with(&self, config: &LayoutConfig) -> Result<StructRegistry> {
        if self.version != SCHEMA_VERSION {
            return Err(LayoutError::SchemaParse(format!(
                "unsupported schema version {} (expected {})",
                self.version, SCHEMA_VERSION
            )));
        }

        let mut definitions = HashMap::with_capacity(self.structs.len());
        for definition in &self.structs {
            if is_builtin_name(&definition.name) {
                return Err(LayoutError::ReservedStructName {
                    name: definition.name.clone(),
                });
            }
            if definitions
                .insert(definition.name.as_str(), definition)
                .is_some()
            {
                return Err(LayoutError::StructAlreadyRegistered {
                    name: definition.name.clone(),
                });
            }
        }

        let mut builder = RegistryBuilder {
            definitions,
            registry: StructRegistry::new(),
            in_progress: HashSet::new(),
            config,
        };
        for definition in &self.structs {
            builder.build(&definition.name)?;
        }

        tracing::debug!("Loaded schema with {} structs", builder.registry.len());
        Ok(builder.registry)
    }
}

/// Parses JSON schema text and resolves it into a registry.
pub fn parse_schema(json: &str) -> Result<StructRegistry> {
    SchemaFile::from_json(json)?.to_registry()
}

/// Reads and resolves a schema file from disk.
pub fn load_schema_file(path: impl AsRef<Path>) -> Result<StructRegistry> {
    load_schema_file_with(path, &LayoutConfig::default())
}

/// Reads and resolves a schema file from disk under explicit limits.
pub fn load_schema_file_with(
    path: impl AsRef<Path>,
    config: &LayoutConfig,
) -> Result<StructRegistry> {
    let path = path.as_ref();
    tracing::debug!("Loading schema file {}", path.display());
    let json = std::fs::read_to_string(path)?;
    SchemaFile::from_json(&json)?.to_registry_with(config)
}

/// Depth-first resolution of struct definitions in dependency order.
struct RegistryBuilder<'a> {
    definitions: HashMap<&'a str, &'a StructSchema>,
    registry: StructRegistry,
    in_progress: HashSet<&'a str>,
    config: &'a LayoutConfig,
}

impl<'a> RegistryBuilder<'a> {
    fn build(&mut self, name: &str) -> Result<StructDescriptor> {
        if let Some(descriptor) = self.registry.get(name) {
            return Ok(descriptor);
        }

        let definition: &'a StructSchema = self.definitions.get(name).copied().ok_or_else(|| {
            LayoutError::StructNotFound {
                name: name.to_string(),
            }
        })?;

        if !self.in_progress.insert(definition.name.as_str()) {
            return Err(LayoutError::CyclicReference {
                name: name.to_string(),
            });
        }

        let mut schema = Schema::named(definition.name.as_str());
        for field in &definition.fields {
            let spec = self.field_spec(field)?;
            schema.push(field.name.as_str(), spec);
        }
        let descriptor = struct_of_with(schema, self.config)?;

        self.in_progress.remove(definition.name.as_str());
        self.registry
            .register(definition.name.as_str(), descriptor.clone())?;
        Ok(descriptor)
    }

    fn field_spec(&mut self, field: &FieldSchema) -> Result<FieldSpec> {
        let len = field
            .len
            .as_ref()
            .map(|n| parse_length(&field.name, n))
            .transpose()?;

        if let Some(kind) = PrimitiveKind::from_name(&field.r#type) {
            return Ok(match len {
                Some(len) => vector(kind, len),
                None => FieldSpec::Scalar(kind),
            });
        }

        if let Some(spec) = builtin_alias(&field.r#type) {
            return match len {
                None => Ok(spec),
                Some(len) => Err(LayoutError::UnknownFieldType {
                    field: field.name.clone(),
                    type_name: format!("{}[{}]", field.r#type, len),
                }),
            };
        }

        if self.definitions.contains_key(field.r#type.as_str()) {
            let element = self.build(&field.r#type)?;
            return match len {
                None => Ok(FieldSpec::Struct(element)),
                Some(len) => Ok(FieldSpec::Array(array_of_with(&element, len, self.config)?)),
            };
        }

        Err(LayoutError::UnknownFieldType {
            field: field.name.clone(),
            type_name: field.r#type.clone(),
        })
    }
}

fn is_builtin_name(name: &str) -> bool {
    PrimitiveKind::from_name(name).is_some() || builtin_alias(name).is_some()
}

/// Accepts only positive whole numbers, written either as `3` or `3.0`.
fn parse_length(field: &str, number: &serde_json::Number) -> Result<usize> {
    let whole = match number.as_u64() {
        Some(len) => Some(len),
        None => number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f < u64::MAX as f64)
            .map(|f| f as u64),
    };
    whole
        .filter(|&len| len > 0)
        .and_then(|len| usize::try_from(len).ok())
        .ok_or_else(|| LayoutError::InvalidLength {
            field: field.to_string(),
            length: number.to_string(),
        })
}

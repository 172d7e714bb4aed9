use super::field_spec::FieldSpec;
use super::primitive::PrimitiveKind;

/// 32-bit float scalar.
pub fn float32() -> FieldSpec {
    FieldSpec::Scalar(PrimitiveKind::F32)
}

/// 64-bit float scalar.
pub fn float64() -> FieldSpec {
    FieldSpec::Scalar(PrimitiveKind::F64)
}

pub fn int16() -> FieldSpec {
    FieldSpec::Scalar(PrimitiveKind::I16)
}

pub fn int32() -> FieldSpec {
    FieldSpec::Scalar(PrimitiveKind::I32)
}

pub fn int64() -> FieldSpec {
    FieldSpec::Scalar(PrimitiveKind::I64)
}

pub fn uint16() -> FieldSpec {
    FieldSpec::Scalar(PrimitiveKind::U16)
}

pub fn uint32() -> FieldSpec {
    FieldSpec::Scalar(PrimitiveKind::U32)
}

pub fn uint64() -> FieldSpec {
    FieldSpec::Scalar(PrimitiveKind::U64)
}

/// `len` contiguous values of `kind`.
///
/// The length is validated when the enclosing schema is resolved.
pub fn vector(kind: PrimitiveKind, len: usize) -> FieldSpec {
    FieldSpec::Vector { kind, len }
}

pub fn vec2f() -> FieldSpec {
    vector(PrimitiveKind::F32, 2)
}

pub fn vec3f() -> FieldSpec {
    vector(PrimitiveKind::F32, 3)
}

pub fn vec4f() -> FieldSpec {
    vector(PrimitiveKind::F32, 4)
}

pub fn vec2d() -> FieldSpec {
    vector(PrimitiveKind::F64, 2)
}

pub fn vec3d() -> FieldSpec {
    vector(PrimitiveKind::F64, 3)
}

pub fn vec4d() -> FieldSpec {
    vector(PrimitiveKind::F64, 4)
}

pub fn vec2i() -> FieldSpec {
    vector(PrimitiveKind::I32, 2)
}

pub fn vec3i() -> FieldSpec {
    vector(PrimitiveKind::I32, 3)
}

pub fn vec4i() -> FieldSpec {
    vector(PrimitiveKind::I32, 4)
}

pub fn vec2u() -> FieldSpec {
    vector(PrimitiveKind::U32, 2)
}

pub fn vec3u() -> FieldSpec {
    vector(PrimitiveKind::U32, 3)
}

pub fn vec4u() -> FieldSpec {
    vector(PrimitiveKind::U32, 4)
}

/// 3x3 matrix of 32-bit floats, stored as 9 contiguous values.
pub fn mat3f() -> FieldSpec {
    vector(PrimitiveKind::F32, 9)
}

/// 4x4 matrix of 32-bit floats, stored as 16 contiguous values.
pub fn mat4f() -> FieldSpec {
    vector(PrimitiveKind::F32, 16)
}

/// Names of the vector and matrix shorthands accepted in schema files.
pub const BUILTIN_ALIASES: [&str; 14] = [
    "vec2f", "vec3f", "vec4f", "vec2d", "vec3d", "vec4d", "vec2i", "vec3i", "vec4i", "vec2u",
    "vec3u", "vec4u", "mat3f", "mat4f",
];

/// Resolves a vector or matrix shorthand by name.
pub fn builtin_alias(name: &str) -> Option<FieldSpec> {
    let spec = match name {
        "vec2f" => vec2f(),
        "vec3f" => vec3f(),
        "vec4f" => vec4f(),
        "vec2d" => vec2d(),
        "vec3d" => vec3d(),
        "vec4d" => vec4d(),
        "vec2i" => vec2i(),
        "vec3i" => vec3i(),
        "vec4i" => vec4i(),
        "vec2u" => vec2u(),
        "vec3u" => vec3u(),
        "vec4u" => vec4u(),
        "mat3f" => mat3f(),
        "mat4f" => mat4f(),
        _ => return None,
    };
    Some(spec)
}

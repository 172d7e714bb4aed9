//! Primitive registry, numeric codecs, and field specifications.

mod builtin_types;
mod field_spec;
mod primitive;

pub use builtin_types::{
    builtin_alias, float32, float64, int16, int32, int64, mat3f, mat4f, uint16, uint32, uint64,
    vec2d, vec2f, vec2i, vec2u, vec3d, vec3f, vec3i, vec3u, vec4d, vec4f, vec4i, vec4u, vector,
    BUILTIN_ALIASES,
};
pub use field_spec::FieldSpec;
pub use primitive::{NumericDomain, PrimitiveKind, Scalar};

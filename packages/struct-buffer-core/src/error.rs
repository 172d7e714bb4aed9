//! Layout and view error types.

use thiserror::Error;

/// Errors raised while declaring layouts or accessing views.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Field name declared twice in one schema
    #[error("Field '{field}' declared more than once")]
    DuplicateField { field: String },

    /// Vector or array length is not a positive whole number
    #[error("Field '{field}' has invalid length {length}: expected a positive whole number")]
    InvalidLength { field: String, length: String },

    /// Declared length above the configured limit
    #[error("Field '{field}' length {length} exceeds configured limit {limit}")]
    LengthLimitExceeded {
        field: String,
        length: usize,
        limit: usize,
    },

    /// Field type name is not a primitive, alias, or known struct
    #[error("Field '{field}' has unknown type '{type_name}'")]
    UnknownFieldType { field: String, type_name: String },

    /// Referenced struct or array descriptor cannot back a field
    #[error("Field '{field}' references an invalid descriptor: {reason}")]
    InvalidNestedDescriptor { field: String, reason: String },

    /// Size arithmetic overflowed `usize`
    #[error("Size overflow while laying out field '{field}'")]
    SizeOverflow { field: String },

    /// Resolved struct exceeds the configured size limit
    #[error("Struct size {size} exceeds configured limit {limit}")]
    StructTooLarge { size: usize, limit: usize },

    /// Buffer cannot hold the descriptor at the requested offset
    #[error(
        "Buffer of {buffer_len} bytes cannot hold {required} bytes at offset {base_offset}"
    )]
    BufferTooSmall {
        buffer_len: usize,
        base_offset: usize,
        required: usize,
    },

    /// Raw byte range outside the buffer
    #[error("Byte range {offset}..{offset}+{len} outside buffer of {buffer_len} bytes")]
    ByteRangeOutOfBounds {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    /// Field name not present in the struct
    #[error("Field '{field}' not found")]
    FieldNotFound { field: String },

    /// Field accessed through the wrong accessor
    #[error("Field '{field}' is a {actual} field, not a {expected} field")]
    FieldKindMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Element index past the end of a vector or array
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Named struct missing from the registry
    #[error("Struct '{name}' not found")]
    StructNotFound { name: String },

    /// Named struct registered twice
    #[error("Struct '{name}' already registered")]
    StructAlreadyRegistered { name: String },

    /// Struct validation against expectations failed
    #[error("Struct '{name}' validation failed: {message}")]
    ValidationFailed { name: String, message: String },

    /// Schema file declares a struct under a builtin type name
    #[error("Struct name '{name}' is reserved for a builtin type")]
    ReservedStructName { name: String },

    /// Schema file references form a cycle
    #[error("Cyclic struct reference involving '{name}'")]
    CyclicReference { name: String },

    /// Schema file could not be parsed
    #[error("Schema parse error: {0}")]
    SchemaParse(String),

    /// I/O error while reading a schema file
    #[error("I/O error: {0}")]
    IoError(String),

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

impl From<std::io::Error> for LayoutError {
    fn from(err: std::io::Error) -> Self {
        LayoutError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::SchemaParse(err.to_string())
    }
}

//! Layout resolver configuration.

/// Limits applied while resolving schemas into descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Maximum total struct size in bytes (default: unlimited)
    pub max_struct_size: usize,
    /// Maximum element count of a vector field
    pub max_vector_len: usize,
    /// Maximum element count of an array-of-struct field
    pub max_array_len: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_struct_size: usize::MAX,
            max_vector_len: u32::MAX as usize,
            max_array_len: u32::MAX as usize,
        }
    }
}

impl LayoutConfig {
    /// Returns a config with the given struct size limit and default length limits.
    pub fn with_max_struct_size(max_struct_size: usize) -> Self {
        Self {
            max_struct_size,
            ..Default::default()
        }
    }
}

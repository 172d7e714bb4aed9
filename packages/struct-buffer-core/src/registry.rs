//! Named struct descriptor registry.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{LayoutError, Result};
use crate::layout::StructDescriptor;

/// Registry of struct descriptors by name.
///
/// Provides thread-safe registration and retrieval. Descriptors are
/// immutable, so lookups hand out cheap clones.
#[derive(Debug, Default)]
pub struct StructRegistry {
    structs: RwLock<HashMap<String, StructDescriptor>>,
}

impl StructRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            structs: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a descriptor under `name`.
    ///
    /// # Returns
    /// `Ok(())` if successful, `Err(LayoutError)` if the name is already taken.
    pub fn register(&self, name: impl Into<String>, descriptor: StructDescriptor) -> Result<()> {
        let name = name.into();
        let mut structs = self.structs.write().map_err(|_| LayoutError::LockPoisoned)?;

        if structs.contains_key(&name) {
            return Err(LayoutError::StructAlreadyRegistered { name });
        }

        tracing::debug!("Registered struct '{}' ({} bytes)", name, descriptor.size());
        structs.insert(name, descriptor);
        Ok(())
    }

    /// Retrieves a descriptor by name.
    pub fn get(&self, name: &str) -> Option<StructDescriptor> {
        let structs = self.structs.read().ok()?;
        structs.get(name).cloned()
    }

    /// Retrieves a descriptor by name or fails with `StructNotFound`.
    pub fn require(&self, name: &str) -> Result<StructDescriptor> {
        self.get(name).ok_or_else(|| LayoutError::StructNotFound {
            name: name.to_string(),
        })
    }

    /// Checks if a struct is registered.
    pub fn contains(&self, name: &str) -> bool {
        match self.structs.read() {
            Ok(guard) => guard.contains_key(name),
            Err(_) => false,
        }
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let structs = match self.structs.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut names: Vec<String> = structs.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.structs.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes a registration.
    ///
    /// # Returns
    /// `true` if the struct was removed, `false` if it wasn't found.
    pub fn remove(&self, name: &str) -> bool {
        let mut structs = match self.structs.write() {
            Ok(guard) => guard,
            Err(_) => return false,
        };
        structs.remove(name).is_some()
    }

    /// Validates that a struct is registered and, optionally, has the expected size.
    pub fn validate_struct(
        &self,
        name: &str,
        expected_size: Option<usize>,
    ) -> Result<StructDescriptor> {
        let descriptor = self.require(name)?;

        if let Some(size) = expected_size {
            if descriptor.size() != size {
                return Err(LayoutError::ValidationFailed {
                    name: name.to_string(),
                    message: format!("size mismatch: expected {}, got {}", size, descriptor.size()),
                });
            }
        }

        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{struct_of, Schema};
    use crate::types::{float32, vec3f};

    fn light() -> StructDescriptor {
        struct_of(
            Schema::named("Light")
                .field("color", vec3f())
                .field("power", float32()),
        )
        .unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let registry = StructRegistry::new();
        assert!(registry.is_empty());
        registry.register("Light", light()).unwrap();

        assert!(registry.contains("Light"));
        assert_eq!(registry.get("Light").unwrap().size(), 16);
        assert_eq!(registry.names(), vec!["Light".to_string()]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = StructRegistry::new();
        registry.register("Light", light()).unwrap();
        assert_eq!(
            registry.register("Light", light()),
            Err(LayoutError::StructAlreadyRegistered {
                name: "Light".to_string()
            })
        );
    }

    #[test]
    fn test_remove_and_require() {
        let registry = StructRegistry::new();
        registry.register("Light", light()).unwrap();
        assert!(registry.remove("Light"));
        assert!(!registry.remove("Light"));
        assert_eq!(
            registry.require("Light").unwrap_err(),
            LayoutError::StructNotFound {
                name: "Light".to_string()
            }
        );
    }

    #[test]
    fn test_validate_struct_size() {
        let registry = StructRegistry::new();
        registry.register("Light", light()).unwrap();
        assert!(registry.validate_struct("Light", Some(16)).is_ok());
        assert!(registry.validate_struct("Light", None).is_ok());
        assert!(matches!(
            registry.validate_struct("Light", Some(12)),
            Err(LayoutError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = std::sync::Arc::new(StructRegistry::new());
        registry.register("Light", light()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.get("Light").map(|d| d.size()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(16));
        }
    }
}

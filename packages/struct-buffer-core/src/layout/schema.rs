//! Ordered schema builder.

use crate::types::FieldSpec;

/// Ordered list of named field specifications.
///
/// Declaration order is significant: it fixes every field's offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    name: Option<String>,
    entries: Vec<(String, FieldSpec)>,
}

impl Schema {
    /// Creates an empty, anonymous schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty schema whose descriptor will carry `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            entries: Vec::new(),
        }
    }

    /// Appends a field and returns the schema for chaining.
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.push(name, spec);
        self
    }

    /// Appends a field in place.
    pub fn push(&mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) {
        self.entries.push((name.into(), spec.into()));
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared fields in order.
    pub fn entries(&self) -> &[(String, FieldSpec)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, S> FromIterator<(N, S)> for Schema
where
    N: Into<String>,
    S: Into<FieldSpec>,
{
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, spec) in iter {
            schema.push(name, spec);
        }
        schema
    }
}

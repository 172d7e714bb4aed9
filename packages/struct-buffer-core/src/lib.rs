//! Schema-driven packed binary layouts.
//!
//! Provides a primitive registry, a layout resolver that turns an ordered
//! schema into offset-annotated fields, reusable struct descriptors, and
//! views that read and write those fields in place over a shared buffer.

pub mod buffer;
pub mod config;
pub mod error;
pub mod layout;
pub mod registry;
pub mod schema_file;
pub mod types;
pub mod view;

pub use buffer::SharedBuffer;
pub use config::LayoutConfig;
pub use error::{LayoutError, Result};
pub use layout::{
    array_of, array_of_with, struct_of, struct_of_with, ArrayDescriptor, FieldDescriptor,
    FieldKind, LayoutReport, Schema, StructDescriptor,
};
pub use registry::StructRegistry;
pub use types::{FieldSpec, NumericDomain, PrimitiveKind, Scalar};
pub use view::{ArrayView, StructView, VectorView};

//! Layout resolution, field descriptors, and reusable struct descriptors.

mod descriptor;
mod field;
mod report;
mod resolver;
mod schema;

pub use descriptor::{
    array_of, array_of_with, struct_of, struct_of_with, ArrayDescriptor, StructDescriptor,
};
pub use field::{FieldDescriptor, FieldKind};
pub use report::{FieldReport, LayoutReport};
pub use resolver::{resolve, resolve_with, ResolvedLayout};
pub use schema::Schema;

//! Buffer-bound views over resolved layouts.
//!
//! Every view produced from one root `create` call (nested struct and array
//! element views included) shares a single [`SharedBuffer`](crate::SharedBuffer).

mod array_view;
mod struct_view;
mod vector_view;

pub use array_view::ArrayView;
pub use struct_view::StructView;
pub use vector_view::VectorView;

#[cfg(test)]
mod tests {
    include!("tests.rs");
}

//! Integration test suite.
//!
//! 1. End-to-end layout and view scenarios
//! 2. Schema files loaded from disk
//! 3. Size properties over generated schemas

pub mod end_to_end_tests;
pub mod schema_file_tests;
pub mod size_property_tests;

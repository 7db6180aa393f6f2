//! Deferra Schema
//!
//! This crate provides the "locked" schema representation for deferra.
//! A locked schema is a validated form of a package definition that the
//! invoker can use directly.
//!
//! Key differences from `deferra-config`:
//! - Property types are resolved to a [`ValueKind`] used for checking values
//! - Required fields are checked against declared properties
//! - Declared defaults are checked against their property type
//! - Each function exposes an explicit default table, keyed by field name

mod error;
mod field;
mod function;
mod kind;
mod package;

pub use error::SchemaError;
pub use field::FieldSpec;
pub use function::{DefaultTable, FunctionSchema};
pub use kind::ValueKind;
pub use package::PackageSchema;

//! Deferra Config
//!
//! This crate contains the serializable package schema types for deferra.
//! A package schema declares the functions a provider exposes, the shape of
//! their argument and result records, and the default value of each optional
//! argument.
//!
//! Package schemas are loaded from JSON files (via the CLI or
//! [`PackageDef::load`]) and are validated into a locked form by
//! `deferra-schema` before anything is invoked.
//!
//! # Example
//!
//! ```json
//! {
//!   "name": "madeup-package",
//!   "version": "1.0.0",
//!   "functions": {
//!     "madeup-package:codegentest:funcWithDefaultValue": {
//!       "inputs": {
//!         "properties": {
//!           "a": { "type": "string" },
//!           "b": { "type": "string", "default": "b-default" }
//!         },
//!         "required": ["a"]
//!       },
//!       "outputs": {
//!         "properties": { "r": { "type": "string" } },
//!         "required": ["r"]
//!       }
//!     }
//!   }
//! }
//! ```

mod error;
mod function;
mod package;
mod property;

pub use error::ConfigError;
pub use function::{FunctionDef, ObjectTypeDef};
pub use package::PackageDef;
pub use property::{PropertyDef, PropertyType};

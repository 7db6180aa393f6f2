//! Deferra Mock
//!
//! An in-memory [`Provider`](deferra_runtime::Provider) for tests. Handlers
//! are registered per token and every call is recorded. The
//! [`codegentest`] module ships handlers and a package definition for the
//! `madeup-package:codegentest` fixture functions.

pub mod codegentest;
mod provider;
mod render;

pub use provider::{Handler, MockCall, MockProvider};
pub use render::{NULL, arg_or_null, render_value};

//! Deferra Runtime
//!
//! This crate invokes provider functions whose arguments may still be pending
//! asynchronous computations.
//!
//! The lowest-level primitive is [`Deferred`], a value that may not be known
//! yet, carrying [`ValueMeta`] (secret and known flags) alongside it. Callers
//! supply each argument as an [`Input`] (a literal or a deferred value). The
//! [`Invoker`] boxes every supplied field, waits for all of them with
//! [`Deferred::combine_all`], applies the function's declared defaults via
//! [`materialize`], calls the [`Provider`] and parses the reply into a
//! [`ResultRecord`].
//!
//! ```text
//! FieldInputs ─box─▶ Deferred<Boxed<Value>>* ─combine_all─▶ materialize
//!     ─▶ ArgsRecord ─flatten─▶ Provider::invoke ─▶ ResultRecord
//! ```

mod boxed;
mod deferred;
mod error;
mod input;
mod invoker;
mod materialize;
mod meta;
mod provider;
mod result;

pub use boxed::Boxed;
pub use deferred::{Deferred, Resolved};
pub use error::{InvokeError, ProviderError};
pub use input::{FieldInputs, Input, literal_inputs};
pub use invoker::{InvocationPhase, InvokeArgs, InvokeOptions, Invoker, InvokerConfig};
pub use materialize::{ArgsRecord, box_fields, collect_args, materialize};
pub use meta::ValueMeta;
pub use provider::{InvokeRequest, InvokeResponse, Provider, ValueMap};
pub use result::ResultRecord;

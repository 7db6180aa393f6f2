//! Handlers for the `madeup-package:codegentest` fixture package.
//!
//! Each `funcWith*` function echoes its `a` and `b` arguments back in a
//! single `r` result field, so tests can see exactly which arguments reached
//! the provider after defaults were applied. The remaining functions echo
//! their arguments inside nested results.

use deferra_runtime::{InvokeResponse, ProviderError, ValueMap};
use serde_json::{Value, json};

use crate::provider::MockProvider;
use crate::render::{NULL, arg_or_null, render_value};

pub const FUNC_WITH_ALL_OPTIONAL_INPUTS: &str =
  "madeup-package:codegentest:funcWithAllOptionalInputs";
pub const FUNC_WITH_DEFAULT_VALUE: &str = "madeup-package:codegentest:funcWithDefaultValue";
pub const FUNC_WITH_DICT_PARAM: &str = "madeup-package:codegentest:funcWithDictParam";
pub const FUNC_WITH_LIST_PARAM: &str = "madeup-package:codegentest:funcWithListParam";
pub const GET_INTEGRATION_RUNTIME_OBJECT_METADATUM: &str =
  "madeup-package:codegentest:getIntegrationRuntimeObjectMetadatum";
pub const LIST_STORAGE_ACCOUNT_KEYS: &str = "madeup-package:codegentest:listStorageAccountKeys";

/// Package definition (JSON) declaring the fixture functions.
pub const PACKAGE_JSON: &str = include_str!("../fixtures/codegentest.json");

/// A mock provider with every fixture handler registered.
pub fn provider() -> MockProvider {
  MockProvider::new()
    .with_handler(FUNC_WITH_ALL_OPTIONAL_INPUTS, echo_pair)
    .with_handler(FUNC_WITH_DEFAULT_VALUE, echo_pair)
    .with_handler(FUNC_WITH_DICT_PARAM, echo_dict)
    .with_handler(FUNC_WITH_LIST_PARAM, echo_list)
    .with_handler(GET_INTEGRATION_RUNTIME_OBJECT_METADATUM, object_metadatum)
    .with_handler(LIST_STORAGE_ACCOUNT_KEYS, storage_account_keys)
}

/// `r = "a=<a> b=<b>"`.
fn echo_pair(args: &ValueMap) -> Result<InvokeResponse, ProviderError> {
  let r = format!("a={} b={}", arg_or_null(args, "a"), arg_or_null(args, "b"));
  Ok(reply(r))
}

/// `r = "a=[K1: v1, ...] b=<b>"`.
fn echo_dict(args: &ValueMap) -> Result<InvokeResponse, ProviderError> {
  let a = match args.get("a") {
    None => format!("[{}]", NULL),
    Some(value @ Value::Object(_)) => render_value(value),
    Some(other) => return Err(wrong_type("a", "a map", other)),
  };
  Ok(reply(format!("a={} b={}", a, arg_or_null(args, "b"))))
}

/// `r = "a=[e1, ...] b=<b>"`.
fn echo_list(args: &ValueMap) -> Result<InvokeResponse, ProviderError> {
  let a = match args.get("a") {
    None => format!("[{}]", NULL),
    Some(value @ Value::Array(_)) => render_value(value),
    Some(other) => return Err(wrong_type("a", "a list", other)),
  };
  Ok(reply(format!("a={} b={}", a, arg_or_null(args, "b"))))
}

/// One `"<name>: <value>"` entry per argument, names ascending.
fn object_metadatum(args: &ValueMap) -> Result<InvokeResponse, ProviderError> {
  let mut names: Vec<&String> = args.keys().collect();
  names.sort();
  let value: Vec<Value> = names
    .into_iter()
    .map(|name| Value::String(format!("{}: {}", name, render_value(&args[name.as_str()]))))
    .collect();

  let mut outputs = ValueMap::new();
  outputs.insert("nextLink".to_string(), Value::String("my-next-link".to_string()));
  outputs.insert("value".to_string(), Value::Array(value));
  Ok(InvokeResponse::new(outputs))
}

/// A single key whose `value` is the rendered argument map.
fn storage_account_keys(args: &ValueMap) -> Result<InvokeResponse, ProviderError> {
  let rendered = render_value(&Value::Object(
    args.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
  ));
  let key = json!({
    "creationTime": "my-creation-time",
    "keyName": "my-key-name",
    "permissions": "my-permissions",
    "value": rendered,
  });

  let mut outputs = ValueMap::new();
  outputs.insert("keys".to_string(), Value::Array(vec![key]));
  Ok(InvokeResponse::new(outputs))
}

fn reply(r: String) -> InvokeResponse {
  let mut outputs = ValueMap::new();
  outputs.insert("r".to_string(), Value::String(r));
  InvokeResponse::new(outputs)
}

fn wrong_type(field: &str, expected: &str, got: &Value) -> ProviderError {
  ProviderError::Call {
    message: format!("argument '{}' must be {}, got {}", field, expected, got),
  }
}

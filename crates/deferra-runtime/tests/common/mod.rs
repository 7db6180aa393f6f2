//! Shared fixtures: the `madeup-package:codegentest` package and typed
//! argument records for its functions.

#![allow(dead_code)]

use std::sync::Arc;

use deferra_config::PackageDef;
use deferra_mock::MockProvider;
use deferra_runtime::{
  Deferred, FieldInputs, Input, InvokeArgs, InvokeOptions, Invoker, InvokerConfig,
};
use deferra_schema::{FunctionSchema, PackageSchema};
use indexmap::IndexMap;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

pub use deferra_mock::codegentest::{
  FUNC_WITH_ALL_OPTIONAL_INPUTS, FUNC_WITH_DEFAULT_VALUE, FUNC_WITH_DICT_PARAM,
  FUNC_WITH_LIST_PARAM, GET_INTEGRATION_RUNTIME_OBJECT_METADATUM, LIST_STORAGE_ACCOUNT_KEYS,
};

pub fn package() -> PackageSchema {
  let def = PackageDef::from_json(deferra_mock::codegentest::PACKAGE_JSON)
    .expect("fixture package should parse");
  PackageSchema::from_def(def).expect("fixture package should lock")
}

pub fn function(token: &str) -> FunctionSchema {
  package()
    .function(token)
    .expect("fixture function should exist")
    .clone()
}

pub fn invoker(provider: &MockProvider) -> Invoker {
  Invoker::new(Arc::new(provider.clone()), InvokerConfig::default())
}

pub fn preview_invoker(provider: &MockProvider) -> Invoker {
  let config = InvokerConfig {
    dry_run: true,
    ..Default::default()
  };
  Invoker::new(Arc::new(provider.clone()), config)
}

/// The single result field every fixture function returns.
#[derive(Debug, Deserialize, PartialEq)]
pub struct EchoResult {
  pub r: String,
}

/// Invoke a fixture function with typed arguments and return `r`.
pub async fn invoke_r<A: InvokeArgs>(invoker: &Invoker, token: &str, args: A) -> String {
  let result: EchoResult = invoker
    .invoke_typed(
      &function(token),
      args,
      InvokeOptions::default(),
      CancellationToken::new(),
    )
    .await
    .expect("invocation should succeed");
  result.r
}

/// A deferred string that resolves after yielding to the runtime.
pub fn later(value: &str) -> Input<String> {
  let value = value.to_string();
  Input::Deferred(Deferred::from_future(async move {
    tokio::task::yield_now().await;
    Ok(value)
  }))
}

fn insert(inputs: &mut FieldInputs, name: &str, input: Option<Input<String>>) {
  if let Some(input) = input {
    inputs.insert(name.to_string(), input.into_wire());
  }
}

#[derive(Debug, Default)]
pub struct FuncWithAllOptionalInputsArgs {
  pub a: Option<Input<String>>,
  pub b: Option<Input<String>>,
}

impl InvokeArgs for FuncWithAllOptionalInputsArgs {
  fn into_inputs(self) -> FieldInputs {
    let mut inputs = FieldInputs::new();
    insert(&mut inputs, "a", self.a);
    insert(&mut inputs, "b", self.b);
    inputs
  }
}

#[derive(Debug, Default)]
pub struct FuncWithDefaultValueArgs {
  pub a: Option<Input<String>>,
  pub b: Option<Input<String>>,
}

impl InvokeArgs for FuncWithDefaultValueArgs {
  fn into_inputs(self) -> FieldInputs {
    let mut inputs = FieldInputs::new();
    insert(&mut inputs, "a", self.a);
    insert(&mut inputs, "b", self.b);
    inputs
  }
}

/// `a` is always supplied; an untouched map is sent as `{}`.
#[derive(Debug, Default)]
pub struct FuncWithDictParamArgs {
  pub a: IndexMap<String, Input<String>>,
  pub b: Option<Input<String>>,
}

impl InvokeArgs for FuncWithDictParamArgs {
  fn into_inputs(self) -> FieldInputs {
    let mut inputs = FieldInputs::new();
    inputs.insert("a".to_string(), Input::from_map(self.a));
    insert(&mut inputs, "b", self.b);
    inputs
  }
}

/// `a` is always supplied; an untouched list is sent as `[]`.
#[derive(Debug, Default)]
pub struct FuncWithListParamArgs {
  pub a: Vec<Input<String>>,
  pub b: Option<Input<String>>,
}

impl InvokeArgs for FuncWithListParamArgs {
  fn into_inputs(self) -> FieldInputs {
    let mut inputs = FieldInputs::new();
    inputs.insert("a".to_string(), Input::from_list(self.a));
    insert(&mut inputs, "b", self.b);
    inputs
  }
}

#[derive(Debug, Default)]
pub struct GetIntegrationRuntimeObjectMetadatumArgs {
  pub factory_name: Option<Input<String>>,
  pub integration_runtime_name: Option<Input<String>>,
  pub metadata_path: Option<Input<String>>,
  pub resource_group_name: Option<Input<String>>,
}

impl InvokeArgs for GetIntegrationRuntimeObjectMetadatumArgs {
  fn into_inputs(self) -> FieldInputs {
    let mut inputs = FieldInputs::new();
    insert(&mut inputs, "factoryName", self.factory_name);
    insert(&mut inputs, "integrationRuntimeName", self.integration_runtime_name);
    insert(&mut inputs, "metadataPath", self.metadata_path);
    insert(&mut inputs, "resourceGroupName", self.resource_group_name);
    inputs
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIntegrationRuntimeObjectMetadatumResult {
  pub next_link: Option<String>,
  pub value: Option<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct ListStorageAccountKeysArgs {
  pub account_name: Option<Input<String>>,
  pub expand: Option<Input<String>>,
  pub resource_group_name: Option<Input<String>>,
}

impl InvokeArgs for ListStorageAccountKeysArgs {
  fn into_inputs(self) -> FieldInputs {
    let mut inputs = FieldInputs::new();
    insert(&mut inputs, "accountName", self.account_name);
    insert(&mut inputs, "expand", self.expand);
    insert(&mut inputs, "resourceGroupName", self.resource_group_name);
    inputs
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccountKeyResponse {
  pub creation_time: String,
  pub key_name: String,
  pub permissions: String,
  pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ListStorageAccountKeysResult {
  pub keys: Vec<StorageAccountKeyResponse>,
}

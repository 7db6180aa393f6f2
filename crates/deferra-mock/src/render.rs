//! Canonical text rendering of wire values.
//!
//! Handlers echo their arguments back as strings. Maps and lists are rendered
//! in a canonical order so results do not depend on how the caller built them.

use std::cmp::Ordering;

use deferra_runtime::ValueMap;
use serde_json::Value;

/// Placeholder rendered for an absent argument.
pub const NULL: &str = "null";

/// Render an argument, or [`NULL`] when the caller did not supply it.
///
/// The placeholder only exists in rendered output; the argument map itself
/// never carries it.
pub fn arg_or_null(args: &ValueMap, name: &str) -> String {
  args
    .get(name)
    .map(render_value)
    .unwrap_or_else(|| NULL.to_string())
}

/// Render a value for comparison in tests.
///
/// Strings render without quotes. Maps render as `[K1: v1, K2: v2]` with keys
/// ascending, lists as `[e1, e2]` with elements in natural order.
pub fn render_value(value: &Value) -> String {
  match value {
    Value::Null => NULL.to_string(),
    Value::String(s) => s.clone(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    Value::Array(items) => {
      let mut sorted: Vec<&Value> = items.iter().collect();
      sorted.sort_by(|a, b| natural_cmp(a, b));
      let rendered: Vec<String> = sorted.into_iter().map(render_value).collect();
      format!("[{}]", rendered.join(", "))
    }
    Value::Object(map) => {
      let mut keys: Vec<&String> = map.keys().collect();
      keys.sort();
      let rendered: Vec<String> = keys
        .into_iter()
        .map(|k| format!("{}: {}", k, render_value(&map[k.as_str()])))
        .collect();
      format!("[{}]", rendered.join(", "))
    }
  }
}

/// Values order by type first (null, bool, number, string, list, map), then
/// within the type: numbers numerically, everything else by rendered text.
fn natural_cmp(a: &Value, b: &Value) -> Ordering {
  type_rank(a).cmp(&type_rank(b)).then_with(|| match (a, b) {
    (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
    (Value::Number(x), Value::Number(y)) => number_cmp(x, y),
    (Value::String(x), Value::String(y)) => x.cmp(y),
    _ => render_value(a).cmp(&render_value(b)),
  })
}

fn type_rank(value: &Value) -> u8 {
  match value {
    Value::Null => 0,
    Value::Bool(_) => 1,
    Value::Number(_) => 2,
    Value::String(_) => 3,
    Value::Array(_) => 4,
    Value::Object(_) => 5,
  }
}

/// `total_cmp` keeps the order total; ties fall back to the rendered text.
fn number_cmp(x: &serde_json::Number, y: &serde_json::Number) -> Ordering {
  let (fx, fy) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
  fx.total_cmp(&fy).then_with(|| x.to_string().cmp(&y.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_map_keys_render_ascending() {
    let value = json!({ "K2": "my-k2", "K1": "my-k1" });
    assert_eq!(render_value(&value), "[K1: my-k1, K2: my-k2]");
  }

  #[test]
  fn test_list_renders_in_natural_order() {
    assert_eq!(render_value(&json!(["e3", "e1", "e2"])), "[e1, e2, e3]");
    assert_eq!(render_value(&json!([10, 9, 1])), "[1, 9, 10]");
  }

  #[test]
  fn test_mixed_list_is_independent_of_input_order() {
    let orders = [
      json!([10, 9, "5"]),
      json!(["5", 10, 9]),
      json!([9, "5", 10]),
      json!([true, "5", null, 9, [1], { "k": 1 }, 10]),
    ];

    for list in &orders[..3] {
      assert_eq!(render_value(list), "[9, 10, 5]");
    }
    assert_eq!(render_value(&orders[3]), "[null, true, 9, 10, 5, [1], [k: 1]]");
  }

  #[test]
  fn test_mixed_list_permutations_agree() {
    let items = [json!("b"), json!(2), json!(false), json!("a"), json!(1.5), json!(null)];
    let expected = render_value(&Value::Array(items.to_vec()));

    for shift in 1..items.len() {
      let mut rotated = items.to_vec();
      rotated.rotate_left(shift);
      assert_eq!(render_value(&Value::Array(rotated)), expected);
    }
    assert_eq!(expected, "[null, false, 1.5, 2, a, b]");
  }

  #[test]
  fn test_empty_collections() {
    assert_eq!(render_value(&json!({})), "[]");
    assert_eq!(render_value(&json!([])), "[]");
  }

  #[test]
  fn test_scalars() {
    assert_eq!(render_value(&json!("my-a")), "my-a");
    assert_eq!(render_value(&json!(true)), "true");
    assert_eq!(render_value(&json!(42)), "42");
    assert_eq!(render_value(&Value::Null), "null");
  }

  #[test]
  fn test_nested_map_in_list() {
    let value = json!([{ "b": 2, "a": 1 }]);
    assert_eq!(render_value(&value), "[[a: 1, b: 2]]");
  }

  #[test]
  fn test_arg_or_null() {
    let mut args = ValueMap::new();
    args.insert("a".to_string(), json!("my-a"));

    assert_eq!(arg_or_null(&args, "a"), "my-a");
    assert_eq!(arg_or_null(&args, "b"), "null");
  }
}

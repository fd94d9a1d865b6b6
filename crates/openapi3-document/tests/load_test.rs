use openapi3_document::{DocumentPath, LoadError, Value};
use serde_json::json;

#[test]
fn test_json_numbers_keep_integer_and_float_apart() {
    let value = Value::try_from(json!({"count": 3, "ratio": 0.5})).unwrap();
    assert_eq!(value.get("count"), Some(&Value::Integer(3)));
    assert_eq!(value.get("ratio"), Some(&Value::Float(0.5)));
}

#[test]
fn test_json_preserves_key_order() {
    let value = Value::from_json_str(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
    let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_yaml_numeric_keys_become_strings() {
    let yaml = r#"
responses:
  200:
    description: ok
  default:
    description: error
"#;
    let value = Value::from_yaml_str(yaml).unwrap();
    let responses = value.get("responses").unwrap().as_map().unwrap();
    let keys: Vec<_> = responses.keys().cloned().collect();
    assert_eq!(keys, vec!["200", "default"]);
}

#[test]
fn test_yaml_reads_json_text() {
    let value = Value::from_yaml_str(r#"{"openapi": "3.0.0"}"#).unwrap();
    assert_eq!(value.get("openapi").and_then(Value::as_str), Some("3.0.0"));
}

#[test]
fn test_yaml_rejects_sequence_keys() {
    let result = Value::from_yaml_str("? [a, b]\n: value\n");
    assert!(matches!(result, Err(LoadError::UnsupportedKey { .. })));
}

#[test]
fn test_invalid_json_is_reported() {
    assert!(matches!(
        Value::from_json_str("{not json"),
        Err(LoadError::Json(_))
    ));
}

#[test]
fn test_pointer_into_loaded_yaml() {
    let yaml = r#"
paths:
  /pets:
    get:
      tags: [pets, animals]
"#;
    let value = Value::from_yaml_str(yaml).unwrap();
    let path = DocumentPath::from_pointer("/paths/~1pets/get/tags/1").unwrap();
    assert_eq!(value.pointer(&path), Some(&Value::from("animals")));
}

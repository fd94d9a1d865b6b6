use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::prelude_internal::*;

/// Decode JSON text into a [`Value`].
pub fn from_json_str(input: &str) -> Result<Value, LoadError> {
    let json: JsonValue = serde_json::from_str(input)?;
    json_to_value(json)
}

/// Decode YAML text into a [`Value`].
///
/// JSON is a subset of YAML, so this also accepts JSON documents.
pub fn from_yaml_str(input: &str) -> Result<Value, LoadError> {
    let yaml: YamlValue = serde_yaml::from_str(input)?;
    yaml_to_value(yaml)
}

pub fn json_to_value(json: JsonValue) -> Result<Value, LoadError> {
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Bool(b)),
        JsonValue::Number(n) => json_number(&n),
        JsonValue::String(s) => Ok(Value::String(s)),
        JsonValue::Array(items) => items
            .into_iter()
            .map(json_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        JsonValue::Object(object) => {
            let mut map = Map::new();
            for (key, value) in object {
                map.insert(key, json_to_value(value)?);
            }
            Ok(Value::Map(map))
        }
    }
}

fn json_number(n: &serde_json::Number) -> Result<Value, LoadError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Integer(i));
    }
    // u64 above i64::MAX and every non-integral number
    n.as_f64()
        .map(Value::Float)
        .ok_or_else(|| LoadError::UnsupportedNumber(n.to_string()))
}

pub fn yaml_to_value(yaml: YamlValue) -> Result<Value, LoadError> {
    match yaml {
        YamlValue::Null => Ok(Value::Null),
        YamlValue::Bool(b) => Ok(Value::Bool(b)),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else {
                n.as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| LoadError::UnsupportedNumber(n.to_string()))
            }
        }
        YamlValue::String(s) => Ok(Value::String(s)),
        YamlValue::Sequence(items) => items
            .into_iter()
            .map(yaml_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                let key = yaml_key(key)?;
                if map.contains_key(&key) {
                    return Err(LoadError::DuplicateKey { key });
                }
                map.insert(key, yaml_to_value(value)?);
            }
            Ok(Value::Map(map))
        }
        // Tags carry no meaning for OpenAPI documents
        YamlValue::Tagged(tagged) => yaml_to_value(tagged.value),
    }
}

/// Response codes and similar keys are often written unquoted in YAML
/// (`200:`), which decodes them as numbers; they are keys by text here.
fn yaml_key(key: YamlValue) -> Result<String, LoadError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        other => Err(LoadError::UnsupportedKey {
            key: format!("{other:?}"),
        }),
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = LoadError;

    fn try_from(json: JsonValue) -> Result<Self, Self::Error> {
        json_to_value(json)
    }
}

impl TryFrom<YamlValue> for Value {
    type Error = LoadError;

    fn try_from(yaml: YamlValue) -> Result<Self, Self::Error> {
        yaml_to_value(yaml)
    }
}

impl Value {
    pub fn from_json_str(input: &str) -> Result<Self, LoadError> {
        from_json_str(input)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, LoadError> {
        from_yaml_str(input)
    }
}

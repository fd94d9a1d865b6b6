use core::fmt::Display;

use crate::prelude_internal::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Map,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::Map => write!(f, "object"),
        }
    }
}

/// A decoded document value.
///
/// Mappings keep their keys in source order and only allow string keys, which
/// is what OpenAPI documents use. Numbers are split into integers and floats so
/// that schemas can tell `1` from `1.5`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Map(Map),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        if let Self::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// Numeric value of either number representation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        if let Self::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        if let Self::Map(map) = self {
            Some(map)
        } else {
            None
        }
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Walk `path` from this value.
    ///
    /// Key segments also address array elements when they are a decimal index,
    /// so paths parsed from a JSON pointer can reach into sequences.
    pub fn pointer(&self, path: &DocumentPath) -> Option<&Value> {
        path.iter()
            .try_fold(self, |current, segment| current.step(segment))
    }

    /// Walk `path` and return it rewritten so that every segment that went
    /// through an array is an index segment.
    ///
    /// Two paths that reach the same value through the same route compare
    /// equal after canonicalization, whichever way they were written.
    pub fn canonical_path(&self, path: &DocumentPath) -> Option<DocumentPath> {
        let mut current = self;
        let mut canonical = DocumentPath::root();
        for segment in path.iter() {
            let next = current.step(segment)?;
            canonical = match (current, segment) {
                (Value::Array(_), PathSegment::Key(key)) => {
                    canonical.join_index(key.parse().ok()?)
                }
                _ => canonical.join(segment.clone()),
            };
            current = next;
        }
        Some(canonical)
    }

    fn step(&self, segment: &PathSegment) -> Option<&Value> {
        match (self, segment) {
            (Value::Map(map), PathSegment::Key(key)) => map.get(key),
            (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
            (Value::Array(items), PathSegment::Key(key)) => {
                key.parse::<usize>().ok().and_then(|index| items.get(index))
            }
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

/// String-keyed mapping preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
pub struct Map(IndexMap<String, Value>);

impl Map {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::Map(Map::from_iter([
            (
                "tags".to_string(),
                Value::Array(vec![Value::from("a"), Value::from("b")]),
            ),
            ("name".to_string(), Value::from("pets")),
        ]))
    }

    #[test]
    fn test_get_returns_mapping_entry() {
        assert_eq!(sample().get("name"), Some(&Value::from("pets")));
        assert_eq!(sample().get("missing"), None);
        assert_eq!(Value::from("text").get("name"), None);
    }

    #[test]
    fn test_pointer_reaches_array_elements_through_key_segments() {
        let path = DocumentPath::from_pointer("/tags/1").unwrap();
        assert_eq!(sample().pointer(&path), Some(&Value::from("b")));
    }

    #[test]
    fn test_pointer_rejects_non_numeric_array_key() {
        let path = DocumentPath::from_pointer("/tags/first").unwrap();
        assert_eq!(sample().pointer(&path), None);
    }

    #[test]
    fn test_canonical_path_turns_array_keys_into_indices() {
        let parsed = DocumentPath::from_pointer("/tags/0").unwrap();
        let built = DocumentPath::root().join_key("tags").join_index(0);
        assert_ne!(parsed, built);
        assert_eq!(sample().canonical_path(&parsed), Some(built));
    }

    #[test]
    fn test_canonical_path_of_missing_value() {
        let path = DocumentPath::from_pointer("/tags/5").unwrap();
        assert_eq!(sample().canonical_path(&path), None);
    }

    #[test]
    fn test_as_f64_accepts_both_number_kinds() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::from("3").as_f64(), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Value::Map(Map::new()).kind().to_string(), "object");
        assert_eq!(Value::Float(0.5).kind().to_string(), "number");
    }
}

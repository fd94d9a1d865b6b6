use crate::prelude_internal::*;

/// Options for reading a [`Document`](crate::Document).
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// External documents addressable from `$ref` by name, e.g.
    /// `common.yaml#/components/schemas/Error`.
    pub documents: IndexMap<String, Value>,
}

impl Config {
    pub fn with_document(mut self, name: impl Into<String>, document: Value) -> Self {
        self.documents.insert(name.into(), document);
        self
    }
}

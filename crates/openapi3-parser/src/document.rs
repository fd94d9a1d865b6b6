use openapi3_document::LoadError;
use tracing::debug;

use crate::Config;
use crate::context::DocumentContext;
use crate::prelude_internal::*;
use crate::schemas::OPENAPI;

/// An OpenAPI document with its external documents and reference registry.
pub struct Document {
    context: DocumentContext,
    root: Box<dyn NodeFactory>,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self::with_config(root, Config::default())
    }

    pub fn with_config(root: Value, config: Config) -> Self {
        let context = DocumentContext::with_documents(root, config.documents);
        let root = OPENAPI.construct(context.context());
        debug!(references = context.registry().len(), "document loaded");
        Self { context, root }
    }

    pub fn from_json_str(input: &str) -> Result<Self, LoadError> {
        Ok(Self::new(Value::from_json_str(input)?))
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, LoadError> {
        Ok(Self::new(Value::from_yaml_str(input)?))
    }

    /// Every problem in the document.
    pub fn errors(&self) -> &ErrorCollection {
        self.root.errors()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// The root node, or the first problem in the document.
    pub fn root(&self) -> Result<Node, Error> {
        self.root.node()
    }

    /// The raw `openapi` field.
    pub fn openapi_version(&self) -> Option<&str> {
        self.root.raw_input()?.get("openapi")?.as_str()
    }

    /// Number of distinct reference targets registered so far.
    pub fn reference_count(&self) -> usize {
        self.context.registry().len()
    }

    pub fn factory(&self) -> &dyn NodeFactory {
        self.root.as_ref()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("openapi", &self.openapi_version())
            .field("references", &self.reference_count())
            .finish_non_exhaustive()
    }
}

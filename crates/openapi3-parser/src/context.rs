use core::fmt::{self, Display};
use std::rc::{Rc, Weak};

use crate::prelude_internal::*;
use crate::reference::{Reference, ReferenceError, ReferenceRegistry};

/// Every value tree a document can address: the primary document and the
/// named external documents.
#[derive(Debug, Default)]
pub struct DocumentSource {
    root: Value,
    documents: IndexMap<String, Value>,
}

impl DocumentSource {
    pub fn new(root: Value, documents: IndexMap<String, Value>) -> Self {
        Self { root, documents }
    }

    /// The primary document when `name` is `None`, otherwise the named one.
    pub fn document(&self, name: Option<&str>) -> Option<&Value> {
        match name {
            None => Some(&self.root),
            Some(name) => self.documents.get(name),
        }
    }

    pub fn has_document(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }
}

/// Where a value lives: a document and a path inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// `None` for the primary document
    pub document: Option<String>,
    pub path: DocumentPath,
}

impl Location {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(document: Option<String>, path: DocumentPath) -> Self {
        Self { document, path }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(document) = &self.document {
            write!(f, "{document}")?;
        }
        write!(f, "{}", self.path)
    }
}

/// Immutable pointer into a document.
///
/// Cloning is cheap: the value trees are shared and the registry handle is
/// weak, so contexts never keep a document's registry alive.
#[derive(Clone)]
pub struct Context {
    source: Rc<DocumentSource>,
    registry: Weak<ReferenceRegistry>,
    location: Location,
}

impl Context {
    pub(crate) fn new(
        source: Rc<DocumentSource>,
        registry: Weak<ReferenceRegistry>,
        location: Location,
    ) -> Self {
        Self {
            source,
            registry,
            location,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn path(&self) -> &DocumentPath {
        &self.location.path
    }

    /// The raw value at this location, if any.
    pub fn input(&self) -> Option<&Value> {
        self.document_root()?.pointer(&self.location.path)
    }

    /// True when the value is absent or null.
    pub fn is_nil(&self) -> bool {
        self.input().is_none_or(Value::is_null)
    }

    /// Root of the document this context points into.
    pub fn document_root(&self) -> Option<&Value> {
        self.source.document(self.location.document.as_deref())
    }

    pub fn next_field(&self, key: impl Into<String>) -> Self {
        self.with_path(self.location.path.join_key(key))
    }

    pub fn next_index(&self, index: usize) -> Self {
        self.with_path(self.location.path.join_index(index))
    }

    fn with_path(&self, path: DocumentPath) -> Self {
        Self {
            source: self.source.clone(),
            registry: self.registry.clone(),
            location: Location::new(self.location.document.clone(), path),
        }
    }

    /// JSON pointer style rendering, e.g. `#/paths/~1pets/get` or
    /// `common.yaml#/components/schemas/Pet`.
    pub fn location_summary(&self) -> String {
        self.location.to_string()
    }

    pub(crate) fn registry(&self) -> Option<Rc<ReferenceRegistry>> {
        self.registry.upgrade()
    }

    /// Context of the value `reference` points to.
    ///
    /// A reference without a document part addresses the document this
    /// context belongs to.
    pub fn resolve_reference(&self, reference: &Reference) -> Result<Self, ReferenceError> {
        let document = match reference.document() {
            Some(name) if !self.source.has_document(name) => {
                return Err(ReferenceError::UnknownDocument {
                    name: name.to_string(),
                });
            }
            Some(name) => Some(name.to_string()),
            None => self.location.document.clone(),
        };
        let unresolvable = || ReferenceError::Unresolvable {
            reference: reference.to_string(),
        };
        let root = self
            .source
            .document(document.as_deref())
            .ok_or_else(unresolvable)?;
        let path = root
            .canonical_path(reference.path())
            .ok_or_else(unresolvable)?;
        Ok(Self {
            source: self.source.clone(),
            registry: self.registry.clone(),
            location: Location::new(document, path),
        })
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Owner of a document's value trees and reference registry.
///
/// Contexts handed out by [`DocumentContext::context`] stay usable for as
/// long as this value is alive.
#[derive(Debug)]
pub struct DocumentContext {
    source: Rc<DocumentSource>,
    registry: Rc<ReferenceRegistry>,
}

impl DocumentContext {
    pub fn new(root: Value) -> Self {
        Self::with_documents(root, IndexMap::new())
    }

    pub fn with_documents(root: Value, documents: IndexMap<String, Value>) -> Self {
        Self {
            source: Rc::new(DocumentSource::new(root, documents)),
            registry: Rc::new(ReferenceRegistry::new()),
        }
    }

    /// Context at the root of the primary document.
    pub fn context(&self) -> Context {
        Context::new(
            self.source.clone(),
            Rc::downgrade(&self.registry),
            Location::root(),
        )
    }

    pub fn registry(&self) -> &ReferenceRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> DocumentContext {
        let pets = Value::Map(Map::from_iter([(
            "get".to_string(),
            Value::Map(Map::from_iter([(
                "tags".to_string(),
                Value::Array(vec![Value::from("pets")]),
            )])),
        )]));
        let paths = Value::Map(Map::from_iter([("/pets".to_string(), pets)]));
        DocumentContext::new(Value::Map(Map::from_iter([(
            "paths".to_string(),
            paths,
        )])))
    }

    #[test]
    fn test_input_follows_path() {
        let doc = document();
        let context = doc
            .context()
            .next_field("paths")
            .next_field("/pets")
            .next_field("get")
            .next_field("tags")
            .next_index(0);
        assert_eq!(context.input(), Some(&Value::from("pets")));
    }

    #[test]
    fn test_missing_input_is_nil() {
        let doc = document();
        let context = doc.context().next_field("info");
        assert_eq!(context.input(), None);
        assert!(context.is_nil());
    }

    #[test]
    fn test_location_summary_escapes_keys() {
        let doc = document();
        let context = doc.context().next_field("paths").next_field("/pets");
        assert_eq!(context.location_summary(), "#/paths/~1pets");
        assert_eq!(doc.context().location_summary(), "#/");
    }

    #[test]
    fn test_location_summary_of_external_document() {
        let location = Location::new(
            Some("common.yaml".to_string()),
            DocumentPath::root().join_key("components"),
        );
        assert_eq!(location.to_string(), "common.yaml#/components");
    }

    #[test]
    fn test_resolve_reference_canonicalizes_array_segments() {
        let doc = document();
        let reference: Reference = "#/paths/~1pets/get/tags/0".parse().unwrap();
        let target = doc.context().resolve_reference(&reference).unwrap();
        let built = doc
            .context()
            .next_field("paths")
            .next_field("/pets")
            .next_field("get")
            .next_field("tags")
            .next_index(0);
        assert_eq!(target.location(), built.location());
    }

    #[test]
    fn test_resolve_reference_to_unknown_document() {
        let doc = document();
        let reference: Reference = "other.yaml#/info".parse().unwrap();
        assert_eq!(
            doc.context().resolve_reference(&reference).unwrap_err(),
            ReferenceError::UnknownDocument {
                name: "other.yaml".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_reference_to_missing_value() {
        let doc = document();
        let reference: Reference = "#/components/schemas/Pet".parse().unwrap();
        assert!(matches!(
            doc.context().resolve_reference(&reference),
            Err(ReferenceError::Unresolvable { .. })
        ));
    }
}

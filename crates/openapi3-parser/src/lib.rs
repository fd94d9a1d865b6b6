//! Schema-driven parsing and validation of OpenAPI 3 documents.
//!
//! A document is described by declarative object, map and array schemas
//! (see [`schemas`]). Every location of the document is wrapped in a
//! [`NodeFactory`] that can either report every problem it finds
//! ([`NodeFactory::errors`]) or build a [`Node`] graph, failing on the first
//! problem ([`NodeFactory::node`]). `$ref` pointers, including cyclic and
//! cross-document ones, are resolved lazily through a per-document registry.
//!
//! ```
//! use openapi3_parser::Document;
//!
//! let document = Document::from_yaml_str(r#"
//! openapi: 3.0.0
//! info:
//!   title: Pets
//!   version: "1.0"
//! paths: {}
//! "#).unwrap();
//! assert!(document.is_valid());
//! assert_eq!(document.openapi_version(), Some("3.0.0"));
//! ```

/// Document and location handles passed to every factory.
pub mod context;

/// Fail-fast error type.
pub mod error;

/// Field descriptors for object schemas.
pub mod field;

/// Node factories: object, map, array, reference and leaf values.
pub mod factory;

/// Materialized document graph.
pub mod node;

/// `$ref` parsing and the per-document reference registry.
pub mod reference;

/// Primitive type checks on raw values.
pub mod type_checker;

/// Collected validation errors.
pub mod validation;

/// Reusable validation rules shared by the OpenAPI schemas.
pub mod validators;

/// The OpenAPI 3.0 object schemas.
pub mod schemas;

mod config;
mod document;

pub use config::Config;
pub use context::{Context, DocumentContext, Location};
pub use document::Document;
pub use error::Error;
pub use factory::{FactoryKind, NodeFactory};
pub use node::{ArrayNode, MapNode, Node, ObjectNode, RecursiveNode};
pub use reference::{Reference, ReferenceError};
pub use validation::{ErrorCollection, ErrorKind, ValidationError};

pub(crate) mod prelude_internal {
    #![allow(unused_imports)]
    pub use crate::context::{Context, Location};
    pub use crate::error::Error;
    pub use crate::factory::{FactoryKind, NodeFactory};
    pub use crate::field::{FieldDefault, FieldFactory, Requirement};
    pub use crate::node::{ArrayNode, MapNode, Node, ObjectNode};
    pub use crate::type_checker::InputType;
    pub use crate::validation::{ErrorCollection, ErrorKind, Mode, Validatable, ValidationError};
    pub use indexmap::IndexMap;
    pub use openapi3_document::{DocumentPath, Map, PathSegment, Value};
}

//! Untyped value tree for OpenAPI documents.
//!
//! Documents are decoded from JSON or YAML into a [`Value`] tree. Locations
//! inside a tree are addressed with [`DocumentPath`], which renders as and
//! parses from a JSON pointer fragment (`#/paths/~1pets/get`).

/// The value tree produced by document loading.
pub mod value;

/// Paths into a value tree and the JSON pointer codec.
pub mod path;

/// Conversion from `serde_json` and `serde_yaml` values.
pub mod load;

mod error;

pub use error::{LoadError, PointerError};
pub use path::{DocumentPath, PathSegment};
pub use value::{Map, Value, ValueKind};

pub(crate) mod prelude_internal {
    #![allow(unused_imports)]
    pub use crate::error::{LoadError, PointerError};
    pub use crate::path::{DocumentPath, PathSegment};
    pub use crate::value::{Map, Value, ValueKind};
    pub use indexmap::IndexMap;
    pub use thisisplural::Plural;
}

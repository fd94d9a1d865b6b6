//! Node factories.
//!
//! A factory wraps one location of a document. Child factories are created
//! eagerly when the parent is constructed; errors and nodes are computed on
//! first request and cached, so repeated calls never re-walk the children.

use core::fmt;

use tracing::trace;

use crate::prelude_internal::*;

pub mod array;
pub mod map;
pub mod object;
pub mod reference;

pub use array::{ArrayConfig, ArrayFactory};
pub use map::{MapConfig, MapFactory};
pub use object::{ObjectFactory, ObjectSchema};
pub use reference::{ReferenceFactory, optional_reference};

/// The two-mode evaluation contract shared by all factories.
pub trait NodeFactory {
    fn context(&self) -> &Context;

    /// Name reported with errors from this factory.
    fn schema_kind(&self) -> &'static str;

    /// The raw value is absent or null.
    fn nil_input(&self) -> bool {
        self.context().is_nil()
    }

    fn raw_input(&self) -> Option<&Value> {
        self.context().input()
    }

    /// Every problem in this value and below it. Never fails.
    fn errors(&self) -> &ErrorCollection;

    fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// The built node, or the first problem found.
    fn node(&self) -> Result<Node, Error>;

    /// Raw data with every `$ref` replaced by its target's data. `None` when
    /// there is nothing to resolve to.
    fn resolved_input(&self) -> Option<Value>;
}

/// Forward-declared constructor of a factory.
///
/// Schemas name each other through `&'static FactoryKind` values instead of
/// concrete types, which is how recursive schemas such as `Schema.items`
/// refer back to themselves. Two kinds are the same kind when their names
/// match.
#[derive(Clone, Copy)]
pub struct FactoryKind {
    name: &'static str,
    construct: fn(Context) -> Box<dyn NodeFactory>,
    own_reference: bool,
}

impl FactoryKind {
    pub const fn new(name: &'static str, construct: fn(Context) -> Box<dyn NodeFactory>) -> Self {
        Self {
            name,
            construct,
            own_reference: false,
        }
    }

    /// The kind reads its own `$ref` field (see
    /// [`ObjectSchema::merge_reference`]), so a value holding `$ref` is
    /// constructed as this kind rather than as a reference to one.
    pub const fn with_own_reference(mut self) -> Self {
        self.own_reference = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn has_own_reference(&self) -> bool {
        self.own_reference
    }

    pub fn construct(&self, context: Context) -> Box<dyn NodeFactory> {
        trace!(kind = self.name, location = %context.location(), "constructing factory");
        (self.construct)(context)
    }
}

impl PartialEq for FactoryKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for FactoryKind {}

impl fmt::Debug for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FactoryKind").field(&self.name).finish()
    }
}

/// Leaf holding a raw value: declared fields without a factory, extension
/// fields and the elements of untyped containers.
pub struct ValueFactory {
    context: Context,
    schema_kind: &'static str,
    errors: ErrorCollection,
}

impl ValueFactory {
    pub fn new(context: Context, schema_kind: &'static str) -> Self {
        Self {
            context,
            schema_kind,
            errors: ErrorCollection::new(),
        }
    }
}

impl NodeFactory for ValueFactory {
    fn context(&self) -> &Context {
        &self.context
    }

    fn schema_kind(&self) -> &'static str {
        self.schema_kind
    }

    fn errors(&self) -> &ErrorCollection {
        &self.errors
    }

    fn node(&self) -> Result<Node, Error> {
        Ok(Node::Value(self.context.input().cloned().unwrap_or_default()))
    }

    fn resolved_input(&self) -> Option<Value> {
        self.context.input().cloned()
    }
}

/// Keys starting with `x-`.
pub fn is_extension(key: &str) -> bool {
    key.starts_with("x-")
}

//! Materialized document graph.
//!
//! Nodes are cheap to clone: containers are reference counted, and two
//! `$ref`s to the same target share the target's node.

use std::rc::{Rc, Weak};

use crate::prelude_internal::*;
use crate::reference::{ReferenceEntry, Stage};

#[derive(Debug, Clone)]
pub enum Node {
    /// Raw value: scalars, untyped containers and absent optional fields
    Value(Value),
    Array(Rc<ArrayNode>),
    Map(Rc<MapNode>),
    Object(Rc<ObjectNode>),
    /// A reference to a target that was still being built
    Recursive(RecursiveNode),
}

impl Node {
    /// Follow a recursive placeholder to its target. Other nodes resolve to
    /// themselves, as does a placeholder whose target cannot be reached.
    pub fn resolve(&self) -> Node {
        match self {
            Node::Recursive(recursive) => recursive.resolve().unwrap_or_else(|| self.clone()),
            _ => self.clone(),
        }
    }

    /// Object field or map entry.
    pub fn get(&self, key: &str) -> Option<Node> {
        match self.resolve() {
            Node::Object(object) => object.get(key).cloned(),
            Node::Map(map) => map.get(key).cloned(),
            _ => None,
        }
    }

    pub fn index(&self, index: usize) -> Option<Node> {
        match self.resolve() {
            Node::Array(array) => array.get(index).cloned(),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    /// Does not follow recursive placeholders; see [`Node::resolve`].
    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Node::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapNode> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayNode> {
        match self {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Value(Value::Null))
    }

    pub fn is_recursive(&self) -> bool {
        matches!(self, Node::Recursive(_))
    }

    /// Where a container node was built. Raw values carry no location.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Node::Array(array) => Some(&array.location),
            Node::Map(map) => Some(&map.location),
            Node::Object(object) => Some(&object.location),
            Node::Value(_) | Node::Recursive(_) => None,
        }
    }

    /// Schema kind of a container node.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Node::Array(array) => Some(array.kind),
            Node::Map(map) => Some(map.kind),
            Node::Object(object) => Some(object.kind),
            Node::Value(_) | Node::Recursive(_) => None,
        }
    }

    /// Same container instance, after resolving placeholders.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (self.resolve(), other.resolve()) {
            (Node::Array(a), Node::Array(b)) => Rc::ptr_eq(&a, &b),
            (Node::Map(a), Node::Map(b)) => Rc::ptr_eq(&a, &b),
            (Node::Object(a), Node::Object(b)) => Rc::ptr_eq(&a, &b),
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct ObjectNode {
    kind: &'static str,
    location: Location,
    fields: IndexMap<String, Node>,
}

impl ObjectNode {
    pub fn new(kind: &'static str, location: Location, fields: IndexMap<String, Node>) -> Self {
        Self {
            kind,
            location,
            fields,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &IndexMap<String, Node> {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Value of the extension `x-<name>`.
    pub fn extension(&self, name: &str) -> Option<&Node> {
        self.fields.get(&format!("x-{name}"))
    }

    pub fn extensions(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.iter().filter(|(name, _)| name.starts_with("x-"))
    }
}

#[derive(Debug)]
pub struct MapNode {
    kind: &'static str,
    location: Location,
    entries: IndexMap<String, Node>,
}

impl MapNode {
    pub fn new(kind: &'static str, location: Location, entries: IndexMap<String, Node>) -> Self {
        Self {
            kind,
            location,
            entries,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug)]
pub struct ArrayNode {
    kind: &'static str,
    location: Location,
    items: Vec<Node>,
}

impl ArrayNode {
    pub fn new(kind: &'static str, location: Location, items: Vec<Node>) -> Self {
        Self {
            kind,
            location,
            items,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Placeholder for a reference met while its target was being built.
///
/// It holds the registry entry weakly: once the document is dropped the
/// placeholder no longer resolves.
#[derive(Clone)]
pub struct RecursiveNode {
    entry: Weak<ReferenceEntry>,
}

impl RecursiveNode {
    pub(crate) fn new(entry: Weak<ReferenceEntry>) -> Self {
        Self { entry }
    }

    /// The target's node, once it has been built.
    pub fn resolve(&self) -> Option<Node> {
        let entry = self.entry.upgrade()?;
        entry
            .resolve(Stage::Node, |factory| factory.node().ok())
            .flatten()
    }

    pub fn location(&self) -> Option<Location> {
        self.entry
            .upgrade()
            .map(|entry| entry.context().location().clone())
    }
}

impl std::fmt::Debug for RecursiveNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.location() {
            Some(location) => write!(f, "RecursiveNode({location})"),
            None => write!(f, "RecursiveNode(<dropped>)"),
        }
    }
}

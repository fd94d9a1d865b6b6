//! `$ref` parsing and the per-document reference registry.
//!
//! Every distinct `(factory kind, target location)` pair gets exactly one
//! [`ReferenceEntry`]. The entry builds the target factory the first time it
//! is resolved and hands the same factory to every later `$ref`, so a target
//! is validated and built once however many times it is referenced.
//!
//! Resolution is guarded per [`Stage`]: if computing a target's errors (or
//! node, or resolved input) leads back to the same target, the inner request
//! gets `None` instead of recursing. Callers turn that into no errors, a
//! [`Node::Recursive`] placeholder or no resolved input.

use core::fmt::{self, Display};
use core::str::FromStr;
use std::cell::{Cell, OnceCell, RefCell};
use std::rc::{Rc, Weak};

use ahash::AHashMap;
use openapi3_document::PointerError;
use thiserror::Error;
use tracing::debug;

use crate::factory::optional_reference;
use crate::prelude_internal::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("Reference is empty")]
    Empty,

    #[error("Invalid JSON pointer: {0}")]
    InvalidPointer(#[from] PointerError),

    #[error("'{name}' is not a registered document")]
    UnknownDocument { name: String },

    #[error("'{reference}' does not point to a value")]
    Unresolvable { reference: String },
}

/// A parsed `$ref` value: `[document]#/json/pointer`, or a bare document
/// name addressing that document's root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    raw: String,
    document: Option<String>,
    path: DocumentPath,
}

impl Reference {
    pub fn parse(raw: &str) -> Result<Self, ReferenceError> {
        if raw.is_empty() {
            return Err(ReferenceError::Empty);
        }
        let (document, path) = match raw.split_once('#') {
            Some((document, fragment)) => (document, DocumentPath::from_pointer(fragment)?),
            None => (raw, DocumentPath::root()),
        };
        Ok(Self {
            raw: raw.to_string(),
            document: (!document.is_empty()).then(|| document.to_string()),
            path,
        })
    }

    /// `None` for references into the referring document.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Guarded computations on a reference target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Errors,
    Node,
    ResolvedInput,
}

impl Stage {
    fn index(self) -> usize {
        match self {
            Stage::Errors => 0,
            Stage::Node => 1,
            Stage::ResolvedInput => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceKey {
    pub kind: &'static str,
    pub location: Location,
}

/// One shared reference target.
pub struct ReferenceEntry {
    kind: &'static FactoryKind,
    context: Context,
    factory: OnceCell<Box<dyn NodeFactory>>,
    in_progress: [Cell<bool>; 3],
}

impl ReferenceEntry {
    fn new(kind: &'static FactoryKind, context: Context) -> Self {
        Self {
            kind,
            context,
            factory: OnceCell::new(),
            in_progress: Default::default(),
        }
    }

    pub fn kind(&self) -> &'static FactoryKind {
        self.kind
    }

    /// Context of the target value.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The target factory, constructed on first use. A target that is itself
    /// a `$ref` becomes a reference factory, so chains are followed.
    ///
    /// Construction only registers nested references, it never resolves
    /// them, so this cannot re-enter itself.
    pub fn factory(&self) -> &dyn NodeFactory {
        self.factory
            .get_or_init(|| optional_reference(self.kind, self.context.clone()))
            .as_ref()
    }

    /// Run `f` on the target factory unless `stage` is already running for
    /// this target further up the stack.
    pub fn resolve<T>(&self, stage: Stage, f: impl FnOnce(&dyn NodeFactory) -> T) -> Option<T> {
        let flag = &self.in_progress[stage.index()];
        if flag.replace(true) {
            debug!(
                kind = self.kind.name(),
                location = %self.context.location(),
                ?stage,
                "cycle detected, using placeholder"
            );
            return None;
        }
        let _guard = StageGuard(flag);
        Some(f(self.factory()))
    }

    pub fn is_in_progress(&self, stage: Stage) -> bool {
        self.in_progress[stage.index()].get()
    }
}

impl fmt::Debug for ReferenceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceEntry")
            .field("kind", &self.kind)
            .field("location", self.context.location())
            .finish_non_exhaustive()
    }
}

struct StageGuard<'a>(&'a Cell<bool>);

impl Drop for StageGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Reference targets of one document, keyed by kind and location.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    entries: RefCell<AHashMap<ReferenceKey, Rc<ReferenceEntry>>>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry for `kind` at `context`, created on first registration.
    pub fn register(&self, kind: &'static FactoryKind, context: Context) -> Weak<ReferenceEntry> {
        let key = ReferenceKey {
            kind: kind.name(),
            location: context.location().clone(),
        };
        let mut entries = self.entries.borrow_mut();
        if let Some(entry) = entries.get(&key) {
            return Rc::downgrade(entry);
        }
        debug!(kind = key.kind, location = %key.location, "registering reference target");
        let entry = Rc::new(ReferenceEntry::new(kind, context));
        let weak = Rc::downgrade(&entry);
        entries.insert(key, entry);
        weak
    }

    pub fn get(&self, kind: &'static str, location: &Location) -> Option<Rc<ReferenceEntry>> {
        let key = ReferenceKey {
            kind,
            location: location.clone(),
        };
        self.entries.borrow().get(&key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

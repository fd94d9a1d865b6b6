use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::node::RecursiveNode;
use crate::prelude_internal::*;
use crate::reference::{Reference, ReferenceEntry, ReferenceError, Stage};

/// The value of a `$ref` key.
///
/// The factory sits at the location of the reference string; errors and
/// nodes come from the shared target registered for its kind.
pub struct ReferenceFactory {
    kind: &'static FactoryKind,
    context: Context,
    target: Target,
    errors: OnceCell<ErrorCollection>,
    node: OnceCell<Result<Node, Error>>,
}

enum Target {
    /// No reference string
    Absent,
    Invalid(ReferenceError),
    Registered(Weak<ReferenceEntry>),
}

impl ReferenceFactory {
    pub fn new(context: Context, kind: &'static FactoryKind) -> Self {
        let target = match context.input() {
            Some(Value::String(raw)) => Self::register(&context, kind, raw),
            _ => Target::Absent,
        };
        Self {
            kind,
            context,
            target,
            errors: OnceCell::new(),
            node: OnceCell::new(),
        }
    }

    fn register(context: &Context, kind: &'static FactoryKind, raw: &str) -> Target {
        let resolved = Reference::parse(raw).and_then(|reference| context.resolve_reference(&reference));
        let target_context = match resolved {
            Ok(target_context) => target_context,
            Err(error) => return Target::Invalid(error),
        };
        match context.registry() {
            Some(registry) => Target::Registered(registry.register(kind, target_context)),
            None => Target::Invalid(ReferenceError::Unresolvable {
                reference: raw.to_string(),
            }),
        }
    }

    /// The shared target entry, when the reference resolved.
    pub fn entry(&self) -> Option<Rc<ReferenceEntry>> {
        match &self.target {
            Target::Registered(entry) => entry.upgrade(),
            _ => None,
        }
    }

    /// Context of the referenced value.
    pub fn target_context(&self) -> Option<Context> {
        self.entry().map(|entry| entry.context().clone())
    }

    fn evaluate(&self, validatable: &mut Validatable<'_>, mode: Mode) -> Result<(), Error> {
        if self.context.is_nil() {
            return Ok(());
        }
        if !crate::type_checker::check_type(validatable, mode, &self.context, InputType::String)? {
            return Ok(());
        }
        match &self.target {
            Target::Absent => Ok(()),
            Target::Invalid(error) => {
                validatable.report_here(mode, ErrorKind::InvalidReference, error.to_string())
            }
            Target::Registered(_) => {
                let Some(entry) = self.entry() else {
                    return validatable.report_here(
                        mode,
                        ErrorKind::InvalidReference,
                        "Reference target is no longer available",
                    );
                };
                match mode {
                    Mode::Collect => {
                        let errors = entry.resolve(Stage::Errors, |factory| factory.errors().clone());
                        for error in errors.into_iter().flatten() {
                            validatable.push(error);
                        }
                        Ok(())
                    }
                    // The node is what the build needs; resolving it is the check
                    Mode::FailFast => Ok(()),
                }
            }
        }
    }

    fn build_node(&self) -> Result<Node, Error> {
        let mut validatable = Validatable::new(self, self.context.clone());
        self.evaluate(&mut validatable, Mode::FailFast)?;
        let Target::Registered(weak) = &self.target else {
            return Ok(Node::Value(Value::Null));
        };
        let Some(entry) = weak.upgrade() else {
            return Ok(Node::Value(Value::Null));
        };
        match entry.resolve(Stage::Node, |factory| factory.node()) {
            Some(node) => node,
            None => {
                debug!(location = %self.context.location(), "recursive reference");
                Ok(Node::Recursive(RecursiveNode::new(weak.clone())))
            }
        }
    }
}

impl NodeFactory for ReferenceFactory {
    fn context(&self) -> &Context {
        &self.context
    }

    fn schema_kind(&self) -> &'static str {
        self.kind.name()
    }

    /// Present when the reference points at a non-null value.
    fn nil_input(&self) -> bool {
        match &self.target {
            Target::Absent => self.context.is_nil(),
            Target::Invalid(_) => false,
            Target::Registered(_) => self
                .entry()
                .is_none_or(|entry| entry.context().is_nil()),
        }
    }

    fn errors(&self) -> &ErrorCollection {
        self.errors.get_or_init(|| {
            trace!(kind = self.kind.name(), location = %self.context.location(), "collecting reference errors");
            Validatable::collect(self, |validatable, mode| self.evaluate(validatable, mode))
        })
    }

    fn node(&self) -> Result<Node, Error> {
        self.node
            .get_or_init(|| {
                trace!(kind = self.kind.name(), location = %self.context.location(), "resolving reference");
                self.build_node()
            })
            .clone()
    }

    fn resolved_input(&self) -> Option<Value> {
        self.entry()?
            .resolve(Stage::ResolvedInput, |factory| factory.resolved_input())
            .flatten()
    }
}

/// A factory for `kind` at `context`, or a reference to one when the value
/// is a mapping holding `$ref`. Keys next to `$ref` are ignored, unless the
/// kind reads its own `$ref`.
pub fn optional_reference(kind: &'static FactoryKind, context: Context) -> Box<dyn NodeFactory> {
    let is_reference = !kind.has_own_reference()
        && context
            .input()
            .and_then(Value::as_map)
            .is_some_and(|map| map.contains_key("$ref"));
    if is_reference {
        Box::new(ReferenceFactory::new(context.next_field("$ref"), kind))
    } else {
        kind.construct(context)
    }
}

use std::cell::OnceCell;
use std::rc::Rc;

use tracing::trace;

use crate::factory::{ValueFactory, is_extension};
use crate::field::FieldFactory;
use crate::prelude_internal::*;
use crate::type_checker;

/// Configuration of a string-keyed map.
#[derive(Clone)]
pub struct MapConfig {
    kind: &'static str,
    allow_extensions: bool,
    default: bool,
    value_input_type: InputType,
    value_factory: Option<FieldFactory>,
    validate: Option<fn(&mut Validatable<'_>)>,
}

impl MapConfig {
    /// A map whose absent value builds an empty map.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            allow_extensions: false,
            default: true,
            value_input_type: InputType::Any,
            value_factory: None,
            validate: None,
        }
    }

    /// `x-` keys skip the value type check and value factory.
    pub fn allow_extensions(mut self) -> Self {
        self.allow_extensions = true;
        self
    }

    /// An absent value builds a null node instead of an empty map.
    pub fn no_default(mut self) -> Self {
        self.default = false;
        self
    }

    pub fn value_input_type(mut self, input_type: InputType) -> Self {
        self.value_input_type = input_type;
        self
    }

    pub fn value_factory(mut self, factory: FieldFactory) -> Self {
        self.value_factory = Some(factory);
        self
    }

    /// Whole-map validator, run against the map's own location.
    pub fn validate(mut self, validate: fn(&mut Validatable<'_>)) -> Self {
        self.validate = Some(validate);
        self
    }

    fn bypasses_values(&self, key: &str) -> bool {
        self.allow_extensions && is_extension(key)
    }
}

pub struct MapFactory {
    config: MapConfig,
    context: Context,
    processed_input: IndexMap<String, Box<dyn NodeFactory>>,
    errors: OnceCell<ErrorCollection>,
    node: OnceCell<Result<Node, Error>>,
}

impl MapFactory {
    pub fn new(context: Context, config: MapConfig) -> Self {
        let mut processed_input: IndexMap<String, Box<dyn NodeFactory>> = IndexMap::new();
        if let Some(Value::Map(input)) = context.input() {
            for key in input.keys() {
                let child_context = context.next_field(key.clone());
                let child: Box<dyn NodeFactory> = match &config.value_factory {
                    Some(factory) if !config.bypasses_values(key) => factory.build(child_context),
                    _ => Box::new(ValueFactory::new(child_context, config.kind)),
                };
                processed_input.insert(key.clone(), child);
            }
        }
        Self {
            config,
            context,
            processed_input,
            errors: OnceCell::new(),
            node: OnceCell::new(),
        }
    }

    pub fn processed_input(&self) -> &IndexMap<String, Box<dyn NodeFactory>> {
        &self.processed_input
    }

    fn evaluate(&self, validatable: &mut Validatable<'_>, mode: Mode) -> Result<(), Error> {
        if self.nil_input() {
            return Ok(());
        }
        if !type_checker::check_type(validatable, mode, &self.context, InputType::Object)? {
            return Ok(());
        }
        let mut mistyped = Vec::new();
        for key in self.processed_input.keys() {
            if self.config.bypasses_values(key) {
                continue;
            }
            let context = self.context.next_field(key.clone());
            if !type_checker::check_type(validatable, mode, &context, self.config.value_input_type)? {
                mistyped.push(key);
            }
        }
        if let Some(validate) = self.config.validate {
            validatable.run(mode, validate, &self.context)?;
        }
        for (key, child) in &self.processed_input {
            if !mistyped.contains(&key) {
                validatable.child(mode, child.as_ref())?;
            }
        }
        Ok(())
    }

    fn build_node(&self) -> Result<Node, Error> {
        let mut validatable = Validatable::new(self, self.context.clone());
        self.evaluate(&mut validatable, Mode::FailFast)?;
        if self.nil_input() && !self.config.default {
            return Ok(Node::Value(Value::Null));
        }
        let mut entries = IndexMap::new();
        for (key, child) in &self.processed_input {
            entries.insert(key.clone(), child.node()?);
        }
        Ok(Node::Map(Rc::new(MapNode::new(
            self.config.kind,
            self.context.location().clone(),
            entries,
        ))))
    }
}

impl NodeFactory for MapFactory {
    fn context(&self) -> &Context {
        &self.context
    }

    fn schema_kind(&self) -> &'static str {
        self.config.kind
    }

    fn errors(&self) -> &ErrorCollection {
        self.errors.get_or_init(|| {
            trace!(kind = self.config.kind, location = %self.context.location(), "collecting errors");
            Validatable::collect(self, |validatable, mode| self.evaluate(validatable, mode))
        })
    }

    fn node(&self) -> Result<Node, Error> {
        self.node
            .get_or_init(|| {
                trace!(kind = self.config.kind, location = %self.context.location(), "building node");
                self.build_node()
            })
            .clone()
    }

    fn resolved_input(&self) -> Option<Value> {
        match self.context.input() {
            Some(Value::Map(_)) => Some(Value::Map(
                self.processed_input
                    .iter()
                    .filter_map(|(key, child)| Some((key.clone(), child.resolved_input()?)))
                    .collect(),
            )),
            Some(Value::Null) | None if self.config.default => Some(Value::Map(Map::new())),
            other => other.filter(|value| !value.is_null()).cloned(),
        }
    }
}

use std::cell::OnceCell;
use std::rc::Rc;

use tracing::trace;

use crate::factory::ValueFactory;
use crate::field::FieldFactory;
use crate::prelude_internal::*;
use crate::type_checker;

#[derive(Clone)]
pub struct ArrayConfig {
    kind: &'static str,
    default: bool,
    value_input_type: InputType,
    value_factory: Option<FieldFactory>,
    validate: Option<fn(&mut Validatable<'_>)>,
}

impl ArrayConfig {
    /// An array whose absent value builds an empty array.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            default: true,
            value_input_type: InputType::Any,
            value_factory: None,
            validate: None,
        }
    }

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

    /// Whole-array validator, e.g. uniqueness of element names.
    pub fn validate(mut self, validate: fn(&mut Validatable<'_>)) -> Self {
        self.validate = Some(validate);
        self
    }
}

pub struct ArrayFactory {
    config: ArrayConfig,
    context: Context,
    processed_input: Vec<Box<dyn NodeFactory>>,
    errors: OnceCell<ErrorCollection>,
    node: OnceCell<Result<Node, Error>>,
}

impl ArrayFactory {
    pub fn new(context: Context, config: ArrayConfig) -> Self {
        let processed_input: Vec<Box<dyn NodeFactory>> = match context.input() {
            Some(Value::Array(items)) => (0..items.len())
                .map(|index| {
                    let child_context = context.next_index(index);
                    match &config.value_factory {
                        Some(factory) => factory.build(child_context),
                        None => Box::new(ValueFactory::new(child_context, config.kind))
                            as Box<dyn NodeFactory>,
                    }
                })
                .collect(),
            _ => Vec::new(),
        };
        Self {
            config,
            context,
            processed_input,
            errors: OnceCell::new(),
            node: OnceCell::new(),
        }
    }

    pub fn processed_input(&self) -> &[Box<dyn NodeFactory>] {
        &self.processed_input
    }

    fn evaluate(&self, validatable: &mut Validatable<'_>, mode: Mode) -> Result<(), Error> {
        if self.nil_input() {
            return Ok(());
        }
        if !type_checker::check_type(validatable, mode, &self.context, InputType::Array)? {
            return Ok(());
        }
        let mut well_typed = Vec::with_capacity(self.processed_input.len());
        for index in 0..self.processed_input.len() {
            let context = self.context.next_index(index);
            well_typed.push(type_checker::check_type(
                validatable,
                mode,
                &context,
                self.config.value_input_type,
            )?);
        }
        if let Some(validate) = self.config.validate {
            validatable.run(mode, validate, &self.context)?;
        }
        for (child, well_typed) in self.processed_input.iter().zip(well_typed) {
            if well_typed {
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
        let items = self
            .processed_input
            .iter()
            .map(|child| child.node())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node::Array(Rc::new(ArrayNode::new(
            self.config.kind,
            self.context.location().clone(),
            items,
        ))))
    }
}

impl NodeFactory for ArrayFactory {
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
            // Elements resolving to nothing stay as nulls to keep indices stable
            Some(Value::Array(_)) => Some(Value::Array(
                self.processed_input
                    .iter()
                    .map(|child| child.resolved_input().unwrap_or_default())
                    .collect(),
            )),
            Some(Value::Null) | None if self.config.default => Some(Value::Array(Vec::new())),
            other => other.filter(|value| !value.is_null()).cloned(),
        }
    }
}

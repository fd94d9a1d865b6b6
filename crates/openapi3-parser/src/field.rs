use crate::factory::ValueFactory;
use crate::factory::object::ObjectFactory;
use crate::factory::reference::optional_reference;
use crate::prelude_internal::*;

/// Checks a present value and records what is wrong with it.
pub type FieldValidator = fn(&mut Validatable<'_>);

/// How the child factory of a field is made.
#[derive(Clone, Copy)]
pub enum FieldFactory {
    /// Construct the kind directly
    Kind(&'static FactoryKind),
    /// Construct the kind, or a reference to one when the value holds `$ref`
    Referenceable(&'static FactoryKind),
    /// Any other construction, typically a configured map or array
    Function(fn(Context) -> Box<dyn NodeFactory>),
}

impl FieldFactory {
    pub fn build(&self, context: Context) -> Box<dyn NodeFactory> {
        match self {
            FieldFactory::Kind(kind) => kind.construct(context),
            FieldFactory::Referenceable(kind) => optional_reference(kind, context),
            FieldFactory::Function(build) => build(context),
        }
    }
}

#[derive(Clone, Default)]
pub enum FieldDefault {
    #[default]
    None,
    Value(Value),
    Function(fn() -> Value),
    /// Computed from the owning object, e.g. a default that depends on a
    /// sibling field
    Owner(fn(&ObjectFactory) -> Option<Value>),
}

impl FieldDefault {
    pub fn resolve(&self, owner: &ObjectFactory) -> Option<Value> {
        match self {
            FieldDefault::None => None,
            FieldDefault::Value(value) => Some(value.clone()),
            FieldDefault::Function(default) => Some(default()),
            FieldDefault::Owner(default) => default(owner),
        }
    }
}

#[derive(Clone, Copy, Default)]
pub enum Requirement {
    #[default]
    Optional,
    Required,
    Owner(fn(&ObjectFactory) -> bool),
}

impl Requirement {
    pub fn is_required(&self, owner: &ObjectFactory) -> bool {
        match self {
            Requirement::Optional => false,
            Requirement::Required => true,
            Requirement::Owner(required) => required(owner),
        }
    }
}

/// Declaration of one object field.
#[derive(Clone, Default)]
pub struct FieldConfig {
    input_type: InputType,
    required: Requirement,
    default: FieldDefault,
    factory: Option<FieldFactory>,
    validator: Option<FieldValidator>,
}

impl FieldConfig {
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// A field holding a raw value of the given type.
    pub fn of(input_type: InputType) -> Self {
        Self::new().input_type(input_type)
    }

    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = Requirement::Required;
        self
    }

    pub fn required_when(mut self, required: fn(&ObjectFactory) -> bool) -> Self {
        self.required = Requirement::Owner(required);
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = FieldDefault::Value(value.into());
        self
    }

    pub fn default_with(mut self, default: fn() -> Value) -> Self {
        self.default = FieldDefault::Function(default);
        self
    }

    pub fn default_from(mut self, default: fn(&ObjectFactory) -> Option<Value>) -> Self {
        self.default = FieldDefault::Owner(default);
        self
    }

    pub fn factory(mut self, kind: &'static FactoryKind) -> Self {
        self.factory = Some(FieldFactory::Kind(kind));
        self
    }

    pub fn referenceable(mut self, kind: &'static FactoryKind) -> Self {
        self.factory = Some(FieldFactory::Referenceable(kind));
        self
    }

    pub fn factory_fn(mut self, build: fn(Context) -> Box<dyn NodeFactory>) -> Self {
        self.factory = Some(FieldFactory::Function(build));
        self
    }

    pub fn validate(mut self, validator: FieldValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn expected_type(&self) -> InputType {
        self.input_type
    }

    pub fn validator(&self) -> Option<FieldValidator> {
        self.validator
    }

    pub fn is_required(&self, owner: &ObjectFactory) -> bool {
        self.required.is_required(owner)
    }

    pub fn default_value(&self, owner: &ObjectFactory) -> Option<Value> {
        self.default.resolve(owner)
    }

    /// Child factory for the field at `context`. Fields without a factory
    /// hold their raw value.
    pub fn build_child(&self, context: Context, schema_kind: &'static str) -> Box<dyn NodeFactory> {
        match &self.factory {
            Some(factory) => factory.build(context),
            None => Box::new(ValueFactory::new(context, schema_kind)),
        }
    }
}

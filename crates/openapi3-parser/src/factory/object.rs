use std::cell::OnceCell;
use std::rc::Rc;

use tracing::trace;

use crate::factory::ValueFactory;
use crate::field::FieldConfig;
use crate::prelude_internal::*;
use crate::type_checker;

mod validator;

/// Checks a whole object after its fields have been checked.
pub type ObjectValidator = fn(&mut Validatable<'_>);

/// Field name of a path item's reference.
pub const REFERENCE_FIELD: &str = "$ref";

/// Fields of which at most one may be present.
#[derive(Debug, Clone)]
pub struct MutuallyExclusive {
    pub fields: Vec<&'static str>,
    /// One of the fields must be present
    pub required: bool,
}

/// Declarative description of an object: its fields and object-wide rules.
///
/// Schemas are built once and shared by every factory of their kind:
///
/// ```
/// use std::sync::LazyLock;
/// use openapi3_parser::factory::ObjectSchema;
/// use openapi3_parser::field::FieldConfig;
/// use openapi3_parser::type_checker::InputType;
///
/// static CONTACT: LazyLock<ObjectSchema> = LazyLock::new(|| {
///     ObjectSchema::new("Contact")
///         .allow_extensions()
///         .field("name", FieldConfig::of(InputType::String))
///         .field("email", FieldConfig::of(InputType::String))
/// });
/// assert_eq!(CONTACT.kind(), "Contact");
/// ```
pub struct ObjectSchema {
    kind: &'static str,
    fields: IndexMap<&'static str, FieldConfig>,
    allow_extensions: bool,
    allow_default: bool,
    mutually_exclusive: Vec<MutuallyExclusive>,
    validator: Option<ObjectValidator>,
    merges_reference: bool,
}

impl ObjectSchema {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            fields: IndexMap::new(),
            allow_extensions: false,
            allow_default: true,
            mutually_exclusive: Vec::new(),
            validator: None,
            merges_reference: false,
        }
    }

    pub fn field(mut self, name: &'static str, config: FieldConfig) -> Self {
        self.fields.insert(name, config);
        self
    }

    /// Accept `x-` keys without declaring them.
    pub fn allow_extensions(mut self) -> Self {
        self.allow_extensions = true;
        self
    }

    /// An absent value is an error instead of a null node.
    pub fn disallow_default(mut self) -> Self {
        self.allow_default = false;
        self
    }

    pub fn mutually_exclusive(mut self, fields: &[&'static str], required: bool) -> Self {
        self.mutually_exclusive.push(MutuallyExclusive {
            fields: fields.to_vec(),
            required,
        });
        self
    }

    pub fn validate(mut self, validator: ObjectValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Build nodes from the object the `$ref` field points to, with the
    /// fields present locally taking priority. The node takes the
    /// referenced object's location.
    pub fn merge_reference(mut self) -> Self {
        self.merges_reference = true;
        self
    }

    /// Apply a shared block of declarations.
    pub fn apply(self, declare: fn(Self) -> Self) -> Self {
        declare(self)
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldConfig)> {
        self.fields.iter().map(|(name, config)| (*name, config))
    }

    pub fn field_config(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }

    pub fn allows_extensions(&self) -> bool {
        self.allow_extensions
    }

    pub fn allows_default(&self) -> bool {
        self.allow_default
    }

    pub fn mutually_exclusive_fields(&self) -> &[MutuallyExclusive] {
        &self.mutually_exclusive
    }
}

/// Factory for a value described by an [`ObjectSchema`].
pub struct ObjectFactory {
    schema: &'static ObjectSchema,
    context: Context,
    processed_input: IndexMap<String, Box<dyn NodeFactory>>,
    errors: OnceCell<ErrorCollection>,
    node: OnceCell<Result<Node, Error>>,
}

impl ObjectFactory {
    /// Children are only expanded for mapping input: an absent object has
    /// no fields, which also keeps recursive schemas from expanding forever.
    pub fn new(context: Context, schema: &'static ObjectSchema) -> Self {
        let mut processed_input: IndexMap<String, Box<dyn NodeFactory>> = IndexMap::new();
        if let Some(Value::Map(input)) = context.input() {
            for (name, config) in schema.fields() {
                let child = config.build_child(context.next_field(name), schema.kind);
                processed_input.insert(name.to_string(), child);
            }
            for key in input.keys() {
                if !processed_input.contains_key(key) {
                    let child = ValueFactory::new(context.next_field(key.clone()), schema.kind);
                    processed_input.insert(key.clone(), Box::new(child));
                }
            }
        }
        Self {
            schema,
            context,
            processed_input,
            errors: OnceCell::new(),
            node: OnceCell::new(),
        }
    }

    pub fn schema(&self) -> &'static ObjectSchema {
        self.schema
    }

    /// Child factories: declared fields first, then undeclared keys.
    pub fn processed_input(&self) -> &IndexMap<String, Box<dyn NodeFactory>> {
        &self.processed_input
    }

    pub fn child(&self, name: &str) -> Option<&dyn NodeFactory> {
        self.processed_input.get(name).map(|child| child.as_ref())
    }

    /// Raw value of a field of this object.
    pub fn field_input(&self, name: &str) -> Option<&Value> {
        self.context.input()?.get(name)
    }

    fn field_is_nil(&self, name: &str) -> bool {
        self.child(name).is_none_or(|child| child.nil_input())
    }

    fn evaluate(&self, validatable: &mut Validatable<'_>, mode: Mode) -> Result<(), Error> {
        if self.nil_input() {
            if self.schema.allow_default {
                return Ok(());
            }
            return validatable.report_here(
                mode,
                ErrorKind::InvalidType,
                format!("Invalid type. Expected {}", InputType::Object),
            );
        }
        if !type_checker::check_type(validatable, mode, &self.context, InputType::Object)? {
            return Ok(());
        }
        validator::check_missing_fields(self, validatable, mode)?;
        validator::check_unexpected_fields(self, validatable, mode)?;
        validator::check_mutually_exclusive_fields(self, validatable, mode)?;
        validator::check_fields(self, validatable, mode)?;
        if let Some(validate) = self.schema.validator {
            validatable.run(mode, validate, &self.context)?;
        }
        Ok(())
    }

    fn build_node(&self) -> Result<Node, Error> {
        let mut validatable = Validatable::new(self, self.context.clone());
        self.evaluate(&mut validatable, Mode::FailFast)?;
        if self.nil_input() {
            return Ok(Node::Value(Value::Null));
        }

        let mut fields = IndexMap::new();
        for (name, child) in &self.processed_input {
            let default = if child.nil_input() {
                self.schema
                    .field_config(name)
                    .and_then(|config| config.default_value(self))
            } else {
                None
            };
            let node = match default {
                Some(value) => Node::Value(value),
                None => child.node()?,
            };
            fields.insert(name.clone(), node);
        }

        let mut location = self.context.location().clone();
        if self.schema.merges_reference
            && let Some(referenced) = self.merge_referenced_fields(&mut fields)
        {
            location = referenced;
        }
        Ok(Node::Object(Rc::new(ObjectNode::new(
            self.schema.kind,
            location,
            fields,
        ))))
    }

    /// Replace `fields` with the referenced object's fields overlaid with the
    /// locally present ones. Returns the referenced location.
    ///
    /// A reference whose target is still being built stays in `fields` as a
    /// placeholder.
    fn merge_referenced_fields(&self, fields: &mut IndexMap<String, Node>) -> Option<Location> {
        let target = fields.get(REFERENCE_FIELD)?.resolve();
        if target.is_recursive() {
            return None;
        }
        fields.shift_remove(REFERENCE_FIELD);
        let base = target.as_object()?;
        let mut merged = base.fields().clone();
        for (name, node) in fields.drain(..) {
            if !self.field_is_nil(&name) || !merged.contains_key(&name) {
                merged.insert(name, node);
            }
        }
        *fields = merged;
        Some(base.location().clone())
    }
}

impl NodeFactory for ObjectFactory {
    fn context(&self) -> &Context {
        &self.context
    }

    fn schema_kind(&self) -> &'static str {
        self.schema.kind
    }

    fn errors(&self) -> &ErrorCollection {
        self.errors.get_or_init(|| {
            trace!(kind = self.schema.kind, location = %self.context.location(), "collecting errors");
            Validatable::collect(self, |validatable, mode| self.evaluate(validatable, mode))
        })
    }

    fn node(&self) -> Result<Node, Error> {
        self.node
            .get_or_init(|| {
                trace!(kind = self.schema.kind, location = %self.context.location(), "building node");
                self.build_node()
            })
            .clone()
    }

    fn resolved_input(&self) -> Option<Value> {
        let input = self.context.input()?;
        if !matches!(input, Value::Map(_)) {
            return (!input.is_null()).then(|| input.clone());
        }
        let mut resolved = Map::new();
        for (name, child) in &self.processed_input {
            if child.nil_input() {
                continue;
            }
            if let Some(value) = child.resolved_input() {
                resolved.insert(name.clone(), value);
            }
        }
        if self.schema.merges_reference
            && let Some(Value::Map(mut base)) = resolved.remove(REFERENCE_FIELD)
        {
            for (name, value) in resolved {
                base.insert(name, value);
            }
            return Some(Value::Map(base));
        }
        Some(Value::Map(resolved))
    }
}

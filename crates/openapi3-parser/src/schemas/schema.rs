//! The Schema object, a subset of JSON Schema.
//!
//! Schemas nest through references to themselves (`items`, `properties`,
//! `allOf` and friends), so self-referencing documents are common here.

use super::prelude::*;
use super::tag::EXTERNAL_DOCUMENTATION;

pub static SCHEMA: FactoryKind = FactoryKind::new("Schema", schema);
pub static DISCRIMINATOR: FactoryKind = FactoryKind::new("Discriminator", discriminator);
pub static XML: FactoryKind = FactoryKind::new("Xml", xml);

const TYPES: [&str; 6] = ["array", "boolean", "integer", "number", "object", "string"];

static SCHEMA_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Schema")
        .allow_extensions()
        .field("title", FieldConfig::of(InputType::String))
        .field("multipleOf", FieldConfig::of(InputType::Number))
        .field("maximum", FieldConfig::of(InputType::Number))
        .field(
            "exclusiveMaximum",
            FieldConfig::of(InputType::Boolean).default(false),
        )
        .field("minimum", FieldConfig::of(InputType::Number))
        .field(
            "exclusiveMinimum",
            FieldConfig::of(InputType::Boolean).default(false),
        )
        .field("maxLength", FieldConfig::of(InputType::Integer))
        .field("minLength", FieldConfig::of(InputType::Integer).default(0i64))
        .field("pattern", FieldConfig::of(InputType::String))
        .field("maxItems", FieldConfig::of(InputType::Integer))
        .field("minItems", FieldConfig::of(InputType::Integer).default(0i64))
        .field("uniqueItems", FieldConfig::of(InputType::Boolean).default(false))
        .field("maxProperties", FieldConfig::of(InputType::Integer))
        .field(
            "minProperties",
            FieldConfig::of(InputType::Integer).default(0i64),
        )
        .field("required", FieldConfig::new().factory_fn(required_properties))
        .field("enum", FieldConfig::new().factory_fn(enumeration))
        .field(
            "type",
            FieldConfig::of(InputType::String).validate(validate_type),
        )
        .field("allOf", FieldConfig::new().factory_fn(schema_list))
        .field("oneOf", FieldConfig::new().factory_fn(schema_list))
        .field("anyOf", FieldConfig::new().factory_fn(schema_list))
        .field("not", FieldConfig::new().referenceable(&SCHEMA))
        .field("items", FieldConfig::new().referenceable(&SCHEMA))
        .field("properties", FieldConfig::new().factory_fn(properties))
        .field(
            "additionalProperties",
            FieldConfig::of(InputType::BooleanOrObject)
                .factory_fn(additional_properties)
                .default(false),
        )
        .field("description", FieldConfig::of(InputType::String))
        .field("format", FieldConfig::of(InputType::String))
        .field("default", FieldConfig::new())
        .field("nullable", FieldConfig::of(InputType::Boolean).default(false))
        .field("discriminator", FieldConfig::new().factory(&DISCRIMINATOR))
        .field("readOnly", FieldConfig::of(InputType::Boolean).default(false))
        .field("writeOnly", FieldConfig::of(InputType::Boolean).default(false))
        .field("xml", FieldConfig::new().factory(&XML))
        .field(
            "externalDocs",
            FieldConfig::new().factory(&EXTERNAL_DOCUMENTATION),
        )
        .field("example", FieldConfig::new())
        .field("deprecated", FieldConfig::of(InputType::Boolean).default(false))
        .validate(validate_schema)
});

static DISCRIMINATOR_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Discriminator")
        .field("propertyName", FieldConfig::of(InputType::String).required())
        .field("mapping", FieldConfig::new().factory_fn(mapping))
});

static XML_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Xml")
        .allow_extensions()
        .field("name", FieldConfig::of(InputType::String))
        .field(
            "namespace",
            FieldConfig::of(InputType::String).validate(validators::absolute_uri),
        )
        .field("prefix", FieldConfig::of(InputType::String))
        .field("attribute", FieldConfig::of(InputType::Boolean).default(false))
        .field("wrapped", FieldConfig::of(InputType::Boolean).default(false))
});

fn schema(context: Context) -> Box<dyn NodeFactory> {
    object(context, &SCHEMA_SCHEMA)
}

fn discriminator(context: Context) -> Box<dyn NodeFactory> {
    object(context, &DISCRIMINATOR_SCHEMA)
}

fn xml(context: Context) -> Box<dyn NodeFactory> {
    object(context, &XML_SCHEMA)
}

fn validate_type(validatable: &mut Validatable<'_>) {
    let Some(name) = validatable.input().and_then(Value::as_str) else {
        return;
    };
    if !TYPES.contains(&name) {
        validatable.add_error("type must be one of array, boolean, integer, number, object, string");
    }
}

fn validate_schema(validatable: &mut Validatable<'_>) {
    let is_true = |validatable: &Validatable<'_>, name: &str| {
        validatable
            .input()
            .and_then(|input| input.get(name))
            .and_then(Value::as_bool)
            == Some(true)
    };
    let has_items = validatable
        .input()
        .and_then(|input| input.get("items"))
        .is_some_and(|items| !items.is_null());
    if field_str(validatable, "type") == Some("array") && !has_items {
        validatable.add_error("items must be defined for a type of array");
    }
    if is_true(validatable, "readOnly") && is_true(validatable, "writeOnly") {
        validatable.add_error("readOnly and writeOnly cannot both be true");
    }
}

fn required_properties(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ArrayFactory::new(
        context,
        ArrayConfig::new("Schema")
            .no_default()
            .value_input_type(InputType::String),
    ))
}

fn enumeration(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ArrayFactory::new(context, ArrayConfig::new("Schema").no_default()))
}

fn schema_list(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ArrayFactory::new(
        context,
        ArrayConfig::new("Schema")
            .no_default()
            .value_factory(FieldFactory::Referenceable(&SCHEMA)),
    ))
}

fn properties(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Properties").value_factory(FieldFactory::Referenceable(&SCHEMA)),
    ))
}

/// `true` and `false` are kept as values; anything else is a schema.
fn additional_properties(context: Context) -> Box<dyn NodeFactory> {
    if matches!(context.input(), Some(Value::Bool(_))) {
        return Box::new(ValueFactory::new(context, "Schema"));
    }
    optional_reference(&SCHEMA, context)
}

fn mapping(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Discriminator").value_input_type(InputType::String),
    ))
}

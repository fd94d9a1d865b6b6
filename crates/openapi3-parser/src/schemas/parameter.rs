//! Parameters and headers.
//!
//! Both describe a serialized value the same way, so they share one block of
//! field declarations. Only parameters carry `name` and `in`.

use super::media_type::{EXAMPLE, MEDIA_TYPE};
use super::prelude::*;
use super::schema::SCHEMA;

pub static PARAMETER: FactoryKind = FactoryKind::new("Parameter", parameter);
pub static HEADER: FactoryKind = FactoryKind::new("Header", header);

const LOCATIONS: [&str; 4] = ["header", "query", "cookie", "path"];

static PARAMETER_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Parameter")
        .allow_extensions()
        .field("name", FieldConfig::of(InputType::String).required())
        .field(
            "in",
            FieldConfig::of(InputType::String)
                .required()
                .validate(validate_in),
        )
        .apply(serialization_fields)
        .field(
            "style",
            FieldConfig::of(InputType::String).default_from(parameter_style),
        )
        .field(
            "explode",
            FieldConfig::of(InputType::Boolean).default_from(parameter_explode),
        )
        .apply(value_fields)
        .validate(validate_path_parameter)
});

static HEADER_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Header")
        .allow_extensions()
        .apply(serialization_fields)
        .field("style", FieldConfig::of(InputType::String).default("simple"))
        .field(
            "explode",
            FieldConfig::of(InputType::Boolean).default_from(header_explode),
        )
        .apply(value_fields)
});

fn serialization_fields(schema: ObjectSchema) -> ObjectSchema {
    schema
        .field("description", FieldConfig::of(InputType::String))
        .field("required", FieldConfig::of(InputType::Boolean).default(false))
        .field("deprecated", FieldConfig::of(InputType::Boolean).default(false))
        .field(
            "allowEmptyValue",
            FieldConfig::of(InputType::Boolean).default(false),
        )
}

fn value_fields(schema: ObjectSchema) -> ObjectSchema {
    schema
        .field(
            "allowReserved",
            FieldConfig::of(InputType::Boolean).default(false),
        )
        .field("schema", FieldConfig::new().referenceable(&SCHEMA))
        .field("example", FieldConfig::new())
        .field("examples", FieldConfig::new().factory_fn(examples))
        .field("content", FieldConfig::new().factory_fn(single_content))
        .mutually_exclusive(&["example", "examples"], false)
}

fn parameter(context: Context) -> Box<dyn NodeFactory> {
    object(context, &PARAMETER_SCHEMA)
}

fn header(context: Context) -> Box<dyn NodeFactory> {
    object(context, &HEADER_SCHEMA)
}

/// Explicit `style`, or the default for the parameter's location.
fn parameter_style(owner: &ObjectFactory) -> Option<Value> {
    if let Some(style) = owner.field_input("style").and_then(Value::as_str) {
        return Some(Value::from(style));
    }
    let simple = matches!(
        owner.field_input("in").and_then(Value::as_str),
        Some("path" | "header")
    );
    Some(Value::from(if simple { "simple" } else { "form" }))
}

fn parameter_explode(owner: &ObjectFactory) -> Option<Value> {
    let style = parameter_style(owner);
    Some(Value::from(style.as_ref().and_then(Value::as_str) == Some("form")))
}

fn header_explode(owner: &ObjectFactory) -> Option<Value> {
    let style = owner.field_input("style").and_then(Value::as_str);
    Some(Value::from(style == Some("form")))
}

fn validate_in(validatable: &mut Validatable<'_>) {
    let Some(location) = validatable.input().and_then(Value::as_str) else {
        return;
    };
    if !LOCATIONS.contains(&location) {
        validatable.add_error("in can only be header, query, cookie, or path");
    }
}

fn validate_path_parameter(validatable: &mut Validatable<'_>) {
    if field_str(validatable, "in") != Some("path") {
        return;
    }
    let required = validatable
        .input()
        .and_then(|input| input.get("required"))
        .and_then(Value::as_bool);
    if required != Some(true) {
        let context = validatable.context().next_field("required");
        validatable.add_error_at("Must be included and true for a path parameter", &context);
    }
}

fn examples(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Examples")
            .no_default()
            .value_factory(FieldFactory::Referenceable(&EXAMPLE)),
    ))
}

fn single_content(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Content")
            .no_default()
            .value_factory(FieldFactory::Kind(&MEDIA_TYPE))
            .validate(validate_single_content),
    ))
}

fn validate_single_content(validatable: &mut Validatable<'_>) {
    let Some(content) = validatable.input().and_then(Value::as_map) else {
        return;
    };
    if content.len() != 1 {
        validatable.add_error("Must only have one item");
    }
}

/// `parameters` lists of path items and operations.
pub(super) fn parameters(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ArrayFactory::new(
        context,
        ArrayConfig::new("Parameters")
            .value_factory(FieldFactory::Referenceable(&PARAMETER))
            .validate(validators::duplicate_parameters),
    ))
}

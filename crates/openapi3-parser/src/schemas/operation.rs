use super::link::LINK;
use super::media_type::MEDIA_TYPE;
use super::parameter::{HEADER, parameters};
use super::paths::CALLBACK;
use super::prelude::*;
use super::security::security_requirements;
use super::server::servers;
use super::tag::EXTERNAL_DOCUMENTATION;

pub static OPERATION: FactoryKind = FactoryKind::new("Operation", operation);
pub static REQUEST_BODY: FactoryKind = FactoryKind::new("RequestBody", request_body);
pub static RESPONSES: FactoryKind = FactoryKind::new("Responses", responses);
pub static RESPONSE: FactoryKind = FactoryKind::new("Response", response);

static OPERATION_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Operation")
        .allow_extensions()
        .field("tags", FieldConfig::new().factory_fn(tag_names))
        .field("summary", FieldConfig::of(InputType::String))
        .field("description", FieldConfig::of(InputType::String))
        .field(
            "externalDocs",
            FieldConfig::new().factory(&EXTERNAL_DOCUMENTATION),
        )
        .field("operationId", FieldConfig::of(InputType::String))
        .field("parameters", FieldConfig::new().factory_fn(parameters))
        .field("requestBody", FieldConfig::new().referenceable(&REQUEST_BODY))
        .field("responses", FieldConfig::new().required().factory(&RESPONSES))
        .field("callbacks", FieldConfig::new().factory_fn(callbacks))
        .field(
            "deprecated",
            FieldConfig::of(InputType::Boolean).default(false),
        )
        .field("security", FieldConfig::new().factory_fn(security_requirements))
        .field("servers", FieldConfig::new().factory_fn(servers))
});

static REQUEST_BODY_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("RequestBody")
        .allow_extensions()
        .field("description", FieldConfig::of(InputType::String))
        .field("content", FieldConfig::new().required().factory_fn(content))
        .field("required", FieldConfig::of(InputType::Boolean).default(false))
});

static RESPONSE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Response")
        .allow_extensions()
        .field("description", FieldConfig::of(InputType::String).required())
        .field("headers", FieldConfig::new().factory_fn(headers))
        .field("content", FieldConfig::new().factory_fn(content))
        .field("links", FieldConfig::new().factory_fn(links))
});

fn operation(context: Context) -> Box<dyn NodeFactory> {
    object(context, &OPERATION_SCHEMA)
}

fn request_body(context: Context) -> Box<dyn NodeFactory> {
    object(context, &REQUEST_BODY_SCHEMA)
}

fn response(context: Context) -> Box<dyn NodeFactory> {
    object(context, &RESPONSE_SCHEMA)
}

fn responses(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Responses")
            .allow_extensions()
            .value_factory(FieldFactory::Referenceable(&RESPONSE))
            .validate(validators::response_keys),
    ))
}

fn tag_names(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ArrayFactory::new(
        context,
        ArrayConfig::new("Operation").value_input_type(InputType::String),
    ))
}

fn callbacks(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Callbacks").value_factory(FieldFactory::Referenceable(&CALLBACK)),
    ))
}

/// Media types keyed by media type range.
pub(super) fn content(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Content").value_factory(FieldFactory::Kind(&MEDIA_TYPE)),
    ))
}

pub(super) fn headers(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Headers").value_factory(FieldFactory::Referenceable(&HEADER)),
    ))
}

fn links(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Links").value_factory(FieldFactory::Referenceable(&LINK)),
    ))
}

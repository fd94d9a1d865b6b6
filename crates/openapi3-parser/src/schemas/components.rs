use super::link::LINK;
use super::media_type::EXAMPLE;
use super::operation::{REQUEST_BODY, RESPONSE};
use super::parameter::{HEADER, PARAMETER};
use super::paths::CALLBACK;
use super::prelude::*;
use super::schema::SCHEMA;
use super::security::SECURITY_SCHEME;

pub static COMPONENTS: FactoryKind = FactoryKind::new("Components", components);

/// Declares a builder for a map of reusable objects of one kind.
macro_rules! component_map {
    ($($name:ident => $kind:ident),* $(,)?) => {
        $(
            fn $name(context: Context) -> Box<dyn NodeFactory> {
                Box::new(MapFactory::new(
                    context,
                    MapConfig::new("Components")
                        .value_factory(FieldFactory::Referenceable(&$kind))
                        .validate(validators::component_keys),
                ))
            }
        )*
    };
}

component_map! {
    schemas => SCHEMA,
    responses => RESPONSE,
    parameters => PARAMETER,
    examples => EXAMPLE,
    request_bodies => REQUEST_BODY,
    headers => HEADER,
    security_schemes => SECURITY_SCHEME,
    links => LINK,
    callbacks => CALLBACK,
}

static COMPONENTS_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Components")
        .allow_extensions()
        .field("schemas", FieldConfig::new().factory_fn(schemas))
        .field("responses", FieldConfig::new().factory_fn(responses))
        .field("parameters", FieldConfig::new().factory_fn(parameters))
        .field("examples", FieldConfig::new().factory_fn(examples))
        .field("requestBodies", FieldConfig::new().factory_fn(request_bodies))
        .field("headers", FieldConfig::new().factory_fn(headers))
        .field(
            "securitySchemes",
            FieldConfig::new().factory_fn(security_schemes),
        )
        .field("links", FieldConfig::new().factory_fn(links))
        .field("callbacks", FieldConfig::new().factory_fn(callbacks))
});

fn components(context: Context) -> Box<dyn NodeFactory> {
    object(context, &COMPONENTS_SCHEMA)
}

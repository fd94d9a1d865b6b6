use super::prelude::*;
use super::server::SERVER;

pub static LINK: FactoryKind = FactoryKind::new("Link", link);

/// A link names its target operation either by reference or by id.
static LINK_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Link")
        .allow_extensions()
        .field("operationRef", FieldConfig::of(InputType::String))
        .field("operationId", FieldConfig::of(InputType::String))
        .field("parameters", FieldConfig::new().factory_fn(parameters))
        .field("requestBody", FieldConfig::new())
        .field("description", FieldConfig::of(InputType::String))
        .field("server", FieldConfig::new().factory(&SERVER))
        .mutually_exclusive(&["operationRef", "operationId"], true)
});

fn link(context: Context) -> Box<dyn NodeFactory> {
    object(context, &LINK_SCHEMA)
}

fn parameters(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(context, MapConfig::new("Link")))
}

use super::operation::OPERATION;
use super::parameter::parameters;
use super::prelude::*;
use super::server::servers;

pub static PATHS: FactoryKind = FactoryKind::new("Paths", paths);
pub static PATH_ITEM: FactoryKind =
    FactoryKind::new("PathItem", path_item).with_own_reference();
pub static CALLBACK: FactoryKind = FactoryKind::new("Callback", callback);

const OPERATIONS: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// A path item may reference another one; the referenced fields are merged
/// under the local ones.
static PATH_ITEM_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    let schema = ObjectSchema::new("PathItem")
        .allow_extensions()
        .merge_reference()
        .field(
            "$ref",
            FieldConfig::of(InputType::String).factory_fn(path_item_reference),
        )
        .field("summary", FieldConfig::of(InputType::String))
        .field("description", FieldConfig::of(InputType::String));
    OPERATIONS
        .into_iter()
        .fold(schema, |schema, method| {
            schema.field(method, FieldConfig::new().factory(&OPERATION))
        })
        .field("servers", FieldConfig::new().factory_fn(servers))
        .field("parameters", FieldConfig::new().factory_fn(parameters))
});

fn paths(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Paths")
            .allow_extensions()
            .value_factory(FieldFactory::Kind(&PATH_ITEM))
            .validate(validators::paths),
    ))
}

fn path_item(context: Context) -> Box<dyn NodeFactory> {
    object(context, &PATH_ITEM_SCHEMA)
}

fn path_item_reference(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ReferenceFactory::new(context, &PATH_ITEM))
}

/// Runtime expressions mapped to the path items they call back.
fn callback(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Callback")
            .allow_extensions()
            .value_factory(FieldFactory::Kind(&PATH_ITEM)),
    ))
}

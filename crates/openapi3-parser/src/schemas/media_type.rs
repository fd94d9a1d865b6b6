use super::operation::headers;
use super::prelude::*;
use super::schema::SCHEMA;

pub static MEDIA_TYPE: FactoryKind = FactoryKind::new("MediaType", media_type);
pub static ENCODING: FactoryKind = FactoryKind::new("Encoding", encoding);
pub static EXAMPLE: FactoryKind = FactoryKind::new("Example", example);

static MEDIA_TYPE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("MediaType")
        .allow_extensions()
        .field("schema", FieldConfig::new().referenceable(&SCHEMA))
        .field("example", FieldConfig::new())
        .field("examples", FieldConfig::new().factory_fn(examples))
        .field("encoding", FieldConfig::new().factory_fn(encodings))
        .mutually_exclusive(&["example", "examples"], false)
});

static ENCODING_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Encoding")
        .allow_extensions()
        .field("contentType", FieldConfig::of(InputType::String))
        .field("headers", FieldConfig::new().factory_fn(headers))
        .field("style", FieldConfig::of(InputType::String))
        .field(
            "explode",
            FieldConfig::of(InputType::Boolean).default_from(encoding_explode),
        )
        .field(
            "allowReserved",
            FieldConfig::of(InputType::Boolean).default(false),
        )
});

static EXAMPLE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Example")
        .allow_extensions()
        .field("summary", FieldConfig::of(InputType::String))
        .field("description", FieldConfig::of(InputType::String))
        .field("value", FieldConfig::new())
        .field("externalValue", FieldConfig::of(InputType::String))
        .mutually_exclusive(&["value", "externalValue"], false)
});

fn media_type(context: Context) -> Box<dyn NodeFactory> {
    object(context, &MEDIA_TYPE_SCHEMA)
}

fn encoding(context: Context) -> Box<dyn NodeFactory> {
    object(context, &ENCODING_SCHEMA)
}

fn example(context: Context) -> Box<dyn NodeFactory> {
    object(context, &EXAMPLE_SCHEMA)
}

// Encodings serialize as forms unless told otherwise.
fn encoding_explode(owner: &ObjectFactory) -> Option<Value> {
    let style = owner
        .field_input("style")
        .and_then(Value::as_str)
        .unwrap_or("form");
    Some(Value::from(style == "form"))
}

fn examples(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Examples").value_factory(FieldFactory::Referenceable(&EXAMPLE)),
    ))
}

fn encodings(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("Encodings").value_factory(FieldFactory::Kind(&ENCODING)),
    ))
}

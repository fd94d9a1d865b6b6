use super::prelude::*;

pub static TAG: FactoryKind = FactoryKind::new("Tag", tag);
pub static EXTERNAL_DOCUMENTATION: FactoryKind =
    FactoryKind::new("ExternalDocumentation", external_documentation);

static TAG_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Tag")
        .allow_extensions()
        .field("name", FieldConfig::of(InputType::String).required())
        .field("description", FieldConfig::of(InputType::String))
        .field(
            "externalDocs",
            FieldConfig::new().factory(&EXTERNAL_DOCUMENTATION),
        )
});

static EXTERNAL_DOCUMENTATION_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("ExternalDocumentation")
        .allow_extensions()
        .field("description", FieldConfig::of(InputType::String))
        .field(
            "url",
            FieldConfig::of(InputType::String)
                .required()
                .validate(validators::url),
        )
});

fn tag(context: Context) -> Box<dyn NodeFactory> {
    object(context, &TAG_SCHEMA)
}

fn external_documentation(context: Context) -> Box<dyn NodeFactory> {
    object(context, &EXTERNAL_DOCUMENTATION_SCHEMA)
}

/// Root `tags` list; tag names must be unique.
pub(super) fn tags(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ArrayFactory::new(
        context,
        ArrayConfig::new("Tags")
            .value_factory(FieldFactory::Kind(&TAG))
            .validate(validators::unique_tag_names),
    ))
}

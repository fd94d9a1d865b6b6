use super::prelude::*;

pub static INFO: FactoryKind = FactoryKind::new("Info", info);
pub static CONTACT: FactoryKind = FactoryKind::new("Contact", contact);
pub static LICENSE: FactoryKind = FactoryKind::new("License", license);

static INFO_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Info")
        .allow_extensions()
        .field("title", FieldConfig::of(InputType::String).required())
        .field("description", FieldConfig::of(InputType::String))
        .field(
            "termsOfService",
            FieldConfig::of(InputType::String).validate(validators::url),
        )
        .field("contact", FieldConfig::new().factory(&CONTACT))
        .field("license", FieldConfig::new().factory(&LICENSE))
        .field("version", FieldConfig::of(InputType::String).required())
});

static CONTACT_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Contact")
        .allow_extensions()
        .field("name", FieldConfig::of(InputType::String))
        .field("url", FieldConfig::of(InputType::String).validate(validators::url))
        .field(
            "email",
            FieldConfig::of(InputType::String).validate(validators::email),
        )
});

static LICENSE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("License")
        .allow_extensions()
        .field("name", FieldConfig::of(InputType::String).required())
        .field("url", FieldConfig::of(InputType::String).validate(validators::url))
});

fn info(context: Context) -> Box<dyn NodeFactory> {
    object(context, &INFO_SCHEMA)
}

fn contact(context: Context) -> Box<dyn NodeFactory> {
    object(context, &CONTACT_SCHEMA)
}

fn license(context: Context) -> Box<dyn NodeFactory> {
    object(context, &LICENSE_SCHEMA)
}

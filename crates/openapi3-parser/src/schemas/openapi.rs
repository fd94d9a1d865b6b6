use regex::Regex;

use super::components::COMPONENTS;
use super::info::INFO;
use super::paths::PATHS;
use super::prelude::*;
use super::security::security_requirements;
use super::server::servers;
use super::tag::{EXTERNAL_DOCUMENTATION, tags};

pub static OPENAPI: FactoryKind = FactoryKind::new("Openapi", openapi);

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^3\.\d+\.\d+$").expect("invalid version regex"));

/// The document root. Unlike nested objects it must be present.
static OPENAPI_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Openapi")
        .allow_extensions()
        .disallow_default()
        .field(
            "openapi",
            FieldConfig::of(InputType::String)
                .required()
                .validate(validate_version),
        )
        .field("info", FieldConfig::new().required().factory(&INFO))
        .field("servers", FieldConfig::new().factory_fn(servers))
        .field("paths", FieldConfig::new().required().factory(&PATHS))
        .field("components", FieldConfig::new().factory(&COMPONENTS))
        .field("security", FieldConfig::new().factory_fn(security_requirements))
        .field("tags", FieldConfig::new().factory_fn(tags))
        .field(
            "externalDocs",
            FieldConfig::new().factory(&EXTERNAL_DOCUMENTATION),
        )
});

fn openapi(context: Context) -> Box<dyn NodeFactory> {
    object(context, &OPENAPI_SCHEMA)
}

fn validate_version(validatable: &mut Validatable<'_>) {
    let Some(version) = validatable.input().and_then(Value::as_str) else {
        return;
    };
    if !VERSION_PATTERN.is_match(version) {
        validatable.add_error(format!(
            "Unsupported OpenAPI version: {version} - expected 3.x.y"
        ));
    }
}

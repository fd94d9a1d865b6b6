use super::prelude::*;

pub static SECURITY_REQUIREMENT: FactoryKind =
    FactoryKind::new("SecurityRequirement", security_requirement);
pub static SECURITY_SCHEME: FactoryKind = FactoryKind::new("SecurityScheme", security_scheme);
pub static OAUTH_FLOWS: FactoryKind = FactoryKind::new("OAuthFlows", oauth_flows);
pub static OAUTH_FLOW: FactoryKind = FactoryKind::new("OAuthFlow", oauth_flow);

const SCHEME_TYPES: [&str; 4] = ["apiKey", "http", "oauth2", "openIdConnect"];
const API_KEY_LOCATIONS: [&str; 3] = ["query", "header", "cookie"];

static SECURITY_SCHEME_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("SecurityScheme")
        .allow_extensions()
        .field(
            "type",
            FieldConfig::of(InputType::String)
                .required()
                .validate(validate_scheme_type),
        )
        .field("description", FieldConfig::of(InputType::String))
        .field(
            "name",
            FieldConfig::of(InputType::String).required_when(is_api_key),
        )
        .field(
            "in",
            FieldConfig::of(InputType::String)
                .required_when(is_api_key)
                .validate(validate_api_key_location),
        )
        .field("scheme", FieldConfig::of(InputType::String).required_when(is_http))
        .field("bearerFormat", FieldConfig::of(InputType::String))
        .field(
            "flows",
            FieldConfig::new().factory(&OAUTH_FLOWS).required_when(is_oauth2),
        )
        .field(
            "openIdConnectUrl",
            FieldConfig::of(InputType::String)
                .required_when(is_open_id_connect)
                .validate(validators::url),
        )
});

static OAUTH_FLOWS_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("OAuthFlows")
        .allow_extensions()
        .field("implicit", FieldConfig::new().factory(&OAUTH_FLOW))
        .field("password", FieldConfig::new().factory(&OAUTH_FLOW))
        .field("clientCredentials", FieldConfig::new().factory(&OAUTH_FLOW))
        .field("authorizationCode", FieldConfig::new().factory(&OAUTH_FLOW))
});

static OAUTH_FLOW_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("OAuthFlow")
        .allow_extensions()
        .field(
            "authorizationUrl",
            FieldConfig::of(InputType::String).validate(validators::url),
        )
        .field(
            "tokenUrl",
            FieldConfig::of(InputType::String).validate(validators::url),
        )
        .field(
            "refreshUrl",
            FieldConfig::of(InputType::String).validate(validators::url),
        )
        .field("scopes", FieldConfig::new().required().factory_fn(scopes))
});

fn scheme_type(owner: &ObjectFactory) -> Option<&str> {
    owner.field_input("type").and_then(Value::as_str)
}

fn is_api_key(owner: &ObjectFactory) -> bool {
    scheme_type(owner) == Some("apiKey")
}

fn is_http(owner: &ObjectFactory) -> bool {
    scheme_type(owner) == Some("http")
}

fn is_oauth2(owner: &ObjectFactory) -> bool {
    scheme_type(owner) == Some("oauth2")
}

fn is_open_id_connect(owner: &ObjectFactory) -> bool {
    scheme_type(owner) == Some("openIdConnect")
}

fn validate_scheme_type(validatable: &mut Validatable<'_>) {
    let Some(name) = validatable.input().and_then(Value::as_str) else {
        return;
    };
    if !SCHEME_TYPES.contains(&name) {
        validatable.add_error("type can only be apiKey, http, oauth2, or openIdConnect");
    }
}

fn validate_api_key_location(validatable: &mut Validatable<'_>) {
    let Some(location) = validatable.input().and_then(Value::as_str) else {
        return;
    };
    if !API_KEY_LOCATIONS.contains(&location) {
        validatable.add_error("in can only be query, header, or cookie");
    }
}

fn security_scheme(context: Context) -> Box<dyn NodeFactory> {
    object(context, &SECURITY_SCHEME_SCHEMA)
}

fn oauth_flows(context: Context) -> Box<dyn NodeFactory> {
    object(context, &OAUTH_FLOWS_SCHEMA)
}

fn oauth_flow(context: Context) -> Box<dyn NodeFactory> {
    object(context, &OAUTH_FLOW_SCHEMA)
}

/// Scheme names mapped to the scopes they require.
fn security_requirement(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("SecurityRequirement").value_factory(FieldFactory::Function(scope_names)),
    ))
}

fn scope_names(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ArrayFactory::new(
        context,
        ArrayConfig::new("SecurityRequirement").value_input_type(InputType::String),
    ))
}

fn scopes(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("OAuthFlow").value_input_type(InputType::String),
    ))
}

pub(super) fn security_requirements(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ArrayFactory::new(
        context,
        ArrayConfig::new("Security").value_factory(FieldFactory::Kind(&SECURITY_REQUIREMENT)),
    ))
}

use super::prelude::*;

pub static SERVER: FactoryKind = FactoryKind::new("Server", server);
pub static SERVER_VARIABLE: FactoryKind = FactoryKind::new("ServerVariable", server_variable);

static SERVER_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("Server")
        .allow_extensions()
        // Server URLs may be relative to the document
        .field("url", FieldConfig::of(InputType::String).required())
        .field("description", FieldConfig::of(InputType::String))
        .field("variables", FieldConfig::new().factory_fn(variables))
});

static SERVER_VARIABLE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new("ServerVariable")
        .allow_extensions()
        .field(
            "enum",
            FieldConfig::new()
                .factory_fn(variable_enum)
                .validate(validate_enum),
        )
        .field("default", FieldConfig::of(InputType::String).required())
        .field("description", FieldConfig::of(InputType::String))
});

fn server(context: Context) -> Box<dyn NodeFactory> {
    object(context, &SERVER_SCHEMA)
}

fn server_variable(context: Context) -> Box<dyn NodeFactory> {
    object(context, &SERVER_VARIABLE_SCHEMA)
}

fn variables(context: Context) -> Box<dyn NodeFactory> {
    Box::new(MapFactory::new(
        context,
        MapConfig::new("ServerVariables").value_factory(FieldFactory::Kind(&SERVER_VARIABLE)),
    ))
}

fn variable_enum(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ArrayFactory::new(
        context,
        ArrayConfig::new("ServerVariable")
            .no_default()
            .value_input_type(InputType::String),
    ))
}

fn validate_enum(validatable: &mut Validatable<'_>) {
    if validatable
        .input()
        .and_then(Value::as_array)
        .is_some_and(<[Value]>::is_empty)
    {
        validatable.add_error("Expected at least one value");
    }
}

/// `servers` lists of the root, path items and operations.
pub(super) fn servers(context: Context) -> Box<dyn NodeFactory> {
    Box::new(ArrayFactory::new(
        context,
        ArrayConfig::new("Servers").value_factory(FieldFactory::Kind(&SERVER)),
    ))
}

//! Object-wide checks, run in this order by both evaluation modes.

use super::ObjectFactory;
use crate::factory::is_extension;
use crate::prelude_internal::*;
use crate::type_checker;

pub(super) fn check_missing_fields(
    factory: &ObjectFactory,
    validatable: &mut Validatable<'_>,
    mode: Mode,
) -> Result<(), Error> {
    let missing: Vec<&str> = factory
        .schema()
        .fields()
        .filter(|(name, config)| config.is_required(factory) && factory.field_is_nil(name))
        .map(|(name, _)| name)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    validatable.report_here(
        mode,
        ErrorKind::MissingFields,
        format!("Missing required fields: {}", missing.join(", ")),
    )
}

pub(super) fn check_unexpected_fields(
    factory: &ObjectFactory,
    validatable: &mut Validatable<'_>,
    mode: Mode,
) -> Result<(), Error> {
    let Some(Value::Map(input)) = factory.raw_input() else {
        return Ok(());
    };
    let schema = factory.schema();
    let unexpected: Vec<&str> = input
        .keys()
        .map(String::as_str)
        .filter(|key| schema.field_config(key).is_none())
        .filter(|key| !(schema.allows_extensions() && is_extension(key)))
        .collect();
    if unexpected.is_empty() {
        return Ok(());
    }
    validatable.report_here(
        mode,
        ErrorKind::UnexpectedFields,
        format!("Unexpected fields: {}", unexpected.join(", ")),
    )
}

/// One error per group: a missing required group, or too many members.
pub(super) fn check_mutually_exclusive_fields(
    factory: &ObjectFactory,
    validatable: &mut Validatable<'_>,
    mode: Mode,
) -> Result<(), Error> {
    for group in factory.schema().mutually_exclusive_fields() {
        let present = group
            .fields
            .iter()
            .filter(|name| !factory.field_is_nil(name))
            .count();
        let names = group.fields.join(", ");
        if present == 0 && group.required {
            validatable.report_here(
                mode,
                ErrorKind::MissingFields,
                format!("One of {names} is required"),
            )?;
        } else if present > 1 {
            validatable.report_here(
                mode,
                ErrorKind::UnexpectedFields,
                format!("{names} are mutually exclusive fields"),
            )?;
        }
    }
    Ok(())
}

/// Per declared field: type, then validator, then the child itself. A field
/// with the wrong type is not looked into any further.
pub(super) fn check_fields(
    factory: &ObjectFactory,
    validatable: &mut Validatable<'_>,
    mode: Mode,
) -> Result<(), Error> {
    for (name, config) in factory.schema().fields() {
        let Some(child) = factory.child(name) else {
            continue;
        };
        let context = factory.context().next_field(name);
        if !type_checker::check_type(validatable, mode, &context, config.expected_type())? {
            continue;
        }
        if let Some(validate) = config.validator()
            && !context.is_nil()
        {
            validatable.run(mode, validate, &context)?;
        }
        validatable.child(mode, child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use serde_json::json;

    use super::super::ObjectSchema;
    use super::*;
    use crate::context::DocumentContext;
    use crate::factory::ValueFactory;
    use crate::field::FieldConfig;

    fn note(context: Context) -> Box<dyn NodeFactory> {
        Box::new(ValueFactory::new(context, "Note"))
    }

    static NOTE: FactoryKind = FactoryKind::new("Note", note);

    static MESSAGE: LazyLock<ObjectSchema> = LazyLock::new(|| {
        ObjectSchema::new("Message")
            .field("body", FieldConfig::new().referenceable(&NOTE))
            .field("text", FieldConfig::of(InputType::String))
            .mutually_exclusive(&["body", "text"], true)
    });

    fn message_errors(message: serde_json::Value) -> Vec<(ErrorKind, String)> {
        let root = Value::try_from(json!({
            "notes": { "empty": null, "real": { "content": "Hello" } },
            "message": message
        }))
        .unwrap();
        let document = DocumentContext::new(root);
        let factory = ObjectFactory::new(document.context().next_field("message"), &MESSAGE);
        factory
            .errors()
            .iter()
            .map(|error| (error.kind, error.message.clone()))
            .collect()
    }

    #[test]
    fn test_reference_to_null_is_not_present() {
        let errors = message_errors(json!({ "body": { "$ref": "#/notes/empty" }, "text": "Hi" }));
        assert_eq!(errors, vec![]);
    }

    #[test]
    fn test_reference_to_value_is_present() {
        let errors = message_errors(json!({ "body": { "$ref": "#/notes/real" }, "text": "Hi" }));
        assert_eq!(
            errors,
            vec![(
                ErrorKind::UnexpectedFields,
                "body, text are mutually exclusive fields".to_string()
            )]
        );
    }

    #[test]
    fn test_only_null_reference_leaves_group_missing() {
        let errors = message_errors(json!({ "body": { "$ref": "#/notes/empty" } }));
        assert_eq!(
            errors,
            vec![(ErrorKind::MissingFields, "One of body, text is required".to_string())]
        );
    }
}

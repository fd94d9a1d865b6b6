use core::fmt::{self, Display};

use crate::prelude_internal::*;

/// Expected shape of a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    /// No check
    #[default]
    Any,
    String,
    /// Integers and floats
    Number,
    /// Integral numbers, including floats without a fractional part
    Integer,
    Boolean,
    Object,
    Array,
    /// `additionalProperties` style values: `true`, `false` or a schema
    BooleanOrObject,
}

impl InputType {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            InputType::Any => true,
            InputType::String => matches!(value, Value::String(_)),
            InputType::Number => matches!(value, Value::Integer(_) | Value::Float(_)),
            InputType::Integer => match value {
                Value::Integer(_) => true,
                Value::Float(f) => f.is_finite() && f.fract() == 0.0,
                _ => false,
            },
            InputType::Boolean => matches!(value, Value::Bool(_)),
            InputType::Object => matches!(value, Value::Map(_)),
            InputType::Array => matches!(value, Value::Array(_)),
            InputType::BooleanOrObject => matches!(value, Value::Bool(_) | Value::Map(_)),
        }
    }
}

impl Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputType::Any => "Any",
            InputType::String => "String",
            InputType::Number => "Number",
            InputType::Integer => "Integer",
            InputType::Boolean => "Boolean",
            InputType::Object => "Object",
            InputType::Array => "Array",
            InputType::BooleanOrObject => "Boolean or Object",
        };
        write!(f, "{name}")
    }
}

/// Check `value` against `expected`. Absent and null values always pass.
pub fn check(value: Option<&Value>, expected: InputType) -> Result<(), String> {
    match value {
        None | Some(Value::Null) => Ok(()),
        Some(value) if expected.matches(value) => Ok(()),
        Some(_) => Err(format!("Expected {expected}")),
    }
}

/// Record an `InvalidType` error when the value at `context` does not match.
/// Returns whether the value matched.
pub fn validate_type(validatable: &mut Validatable<'_>, context: &Context, expected: InputType) -> bool {
    match check(context.input(), expected) {
        Ok(()) => true,
        Err(reason) => {
            let error = ValidationError::new(
                ErrorKind::InvalidType,
                format!("Invalid type. {reason}"),
                context,
                validatable.factory().schema_kind(),
            );
            validatable.push(error);
            false
        }
    }
}

pub fn raise_on_invalid_type(context: &Context, expected: InputType) -> Result<(), Error> {
    check(context.input(), expected).map_err(|reason| {
        Error::new(
            ErrorKind::InvalidType,
            context.location().clone(),
            format!("Invalid type. {reason}"),
        )
    })
}

/// Type check in either evaluation mode. `Ok(false)` means the error was
/// collected and the caller should skip whatever depends on the value.
pub fn check_type(
    validatable: &mut Validatable<'_>,
    mode: Mode,
    context: &Context,
    expected: InputType,
) -> Result<bool, Error> {
    match mode {
        Mode::Collect => Ok(validate_type(validatable, context, expected)),
        Mode::FailFast => raise_on_invalid_type(context, expected).map(|()| true),
    }
}

use thiserror::Error;

use crate::prelude_internal::*;

/// First problem found while building a node.
///
/// Returned by [`NodeFactory::node`](crate::NodeFactory::node). The variant
/// mirrors the [`ErrorKind`] of the validation error that stopped the build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Missing fields for {location}: {message}")]
    MissingFields { location: Location, message: String },

    #[error("Unexpected fields for {location}: {message}")]
    UnexpectedFields { location: Location, message: String },

    #[error("Invalid type for {location}: {message}")]
    InvalidType { location: Location, message: String },

    #[error("Invalid data for {location}: {message}")]
    InvalidData { location: Location, message: String },

    #[error("Invalid reference for {location}: {message}")]
    InvalidReference { location: Location, message: String },
}

impl Error {
    pub fn new(kind: ErrorKind, location: Location, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::MissingFields => Error::MissingFields { location, message },
            ErrorKind::UnexpectedFields => Error::UnexpectedFields { location, message },
            ErrorKind::InvalidType => Error::InvalidType { location, message },
            ErrorKind::InvalidData => Error::InvalidData { location, message },
            ErrorKind::InvalidReference => Error::InvalidReference { location, message },
        }
    }

    pub fn from_validation(error: &ValidationError) -> Self {
        Self::new(error.kind, error.location.clone(), error.message.clone())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingFields { .. } => ErrorKind::MissingFields,
            Error::UnexpectedFields { .. } => ErrorKind::UnexpectedFields,
            Error::InvalidType { .. } => ErrorKind::InvalidType,
            Error::InvalidData { .. } => ErrorKind::InvalidData,
            Error::InvalidReference { .. } => ErrorKind::InvalidReference,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Error::MissingFields { location, .. }
            | Error::UnexpectedFields { location, .. }
            | Error::InvalidType { location, .. }
            | Error::InvalidData { location, .. }
            | Error::InvalidReference { location, .. } => location,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::MissingFields { message, .. }
            | Error::UnexpectedFields { message, .. }
            | Error::InvalidType { message, .. }
            | Error::InvalidData { message, .. }
            | Error::InvalidReference { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let error = Error::new(
            ErrorKind::MissingFields,
            Location::new(None, DocumentPath::root().join_key("info")),
            "Missing required fields: title",
        );
        assert_eq!(
            error.to_string(),
            "Missing fields for #/info: Missing required fields: title"
        );
    }

    #[test]
    fn test_kind_round_trips_through_validation_error() {
        let validation = ValidationError {
            message: "Expected a valid URL".to_string(),
            location: Location::root(),
            schema_kind: "License",
            kind: ErrorKind::InvalidData,
        };
        let error = Error::from_validation(&validation);
        assert_eq!(error.kind(), ErrorKind::InvalidData);
        assert_eq!(error.message(), "Expected a valid URL");
        assert_eq!(error.location(), &Location::root());
    }
}

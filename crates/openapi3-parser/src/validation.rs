//! Validation errors and the sink validators write into.
//!
//! Factories evaluate in one of two [`Mode`]s. In [`Mode::Collect`] every
//! problem is recorded and evaluation carries on; in [`Mode::FailFast`] the
//! first problem becomes an [`Error`] and evaluation stops. Both modes walk
//! the same steps in the same order, so the first error collected for a
//! document is the one a build fails with.

use core::fmt::{self, Display};

use indexmap::IndexSet;
use tracing::warn;

use crate::prelude_internal::*;

/// Class of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingFields,
    UnexpectedFields,
    InvalidType,
    InvalidData,
    InvalidReference,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingFields => "missing fields",
            ErrorKind::UnexpectedFields => "unexpected fields",
            ErrorKind::InvalidType => "invalid type",
            ErrorKind::InvalidData => "invalid data",
            ErrorKind::InvalidReference => "invalid reference",
        };
        write!(f, "{name}")
    }
}

/// A problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
    pub location: Location,
    /// Name of the schema that reported the problem, e.g. `Parameter`
    pub schema_kind: &'static str,
    pub kind: ErrorKind,
}

impl ValidationError {
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        context: &Context,
        schema_kind: &'static str,
    ) -> Self {
        Self {
            message: message.into(),
            location: context.location().clone(),
            schema_kind,
            kind,
        }
    }

    pub fn location_summary(&self) -> String {
        self.location.to_string()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Ordered errors without duplicates.
///
/// Two errors are duplicates when they share a location and a message. This
/// happens when the same value is reached both directly and through `$ref`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCollection {
    errors: Vec<ValidationError>,
    seen: IndexSet<(Location, String)>,
}

impl ErrorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn push(&mut self, error: ValidationError) {
        if self
            .seen
            .insert((error.location.clone(), error.message.clone()))
        {
            self.errors.push(error);
        }
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        for error in errors {
            self.push(error);
        }
    }

    /// Both collections' errors, `self` first.
    pub fn combine(mut self, other: &ErrorCollection) -> Self {
        self.extend(other.iter().cloned());
        self
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Errors reported at `location`.
    pub fn at<'a>(&'a self, location: &'a Location) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| &e.location == location)
    }

    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }
}

impl IntoIterator for ErrorCollection {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorCollection {
    type Item = &'a ValidationError;
    type IntoIter = core::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl FromIterator<ValidationError> for ErrorCollection {
    fn from_iter<T: IntoIterator<Item = ValidationError>>(iter: T) -> Self {
        let mut collection = ErrorCollection::new();
        collection.extend(iter);
        collection
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Record every problem
    Collect,
    /// Stop at the first problem
    FailFast,
}

/// What a validator sees: the factory being validated, the location being
/// checked and the errors found so far.
pub struct Validatable<'a> {
    factory: &'a dyn NodeFactory,
    context: Context,
    errors: ErrorCollection,
}

impl<'a> Validatable<'a> {
    pub fn new(factory: &'a dyn NodeFactory, context: Context) -> Self {
        Self {
            factory,
            context,
            errors: ErrorCollection::new(),
        }
    }

    /// The factory owning the checked value. For field validators this is
    /// the enclosing object.
    pub fn factory(&self) -> &'a dyn NodeFactory {
        self.factory
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn input(&self) -> Option<&Value> {
        self.context.input()
    }

    /// Record invalid data at the checked location.
    pub fn add_error(&mut self, message: impl Into<String>) {
        let context = self.context.clone();
        self.add_error_at(message, &context);
    }

    /// Record invalid data at another location.
    pub fn add_error_at(&mut self, message: impl Into<String>, context: &Context) {
        let error = ValidationError::new(
            ErrorKind::InvalidData,
            message,
            context,
            self.factory.schema_kind(),
        );
        self.errors.push(error);
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &ErrorCollection {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `error`, or return it when failing fast.
    pub fn report(&mut self, mode: Mode, error: ValidationError) -> Result<(), Error> {
        match mode {
            Mode::Collect => {
                self.errors.push(error);
                Ok(())
            }
            Mode::FailFast => Err(Error::from_validation(&error)),
        }
    }

    /// Shorthand for [`Self::report`] at the checked location.
    pub fn report_here(
        &mut self,
        mode: Mode,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Result<(), Error> {
        let error = ValidationError::new(kind, message, &self.context, self.factory.schema_kind());
        self.report(mode, error)
    }

    /// Run `validator` against `context` and report what it finds.
    pub fn run(
        &mut self,
        mode: Mode,
        validator: fn(&mut Validatable<'_>),
        context: &Context,
    ) -> Result<(), Error> {
        let mut inner = Validatable::new(self.factory, context.clone());
        validator(&mut inner);
        for error in inner.errors {
            self.report(mode, error)?;
        }
        Ok(())
    }

    /// Descend into a child factory: collect its errors, or build it.
    pub fn child(&mut self, mode: Mode, child: &dyn NodeFactory) -> Result<(), Error> {
        match mode {
            Mode::Collect => {
                self.errors.extend(child.errors().iter().cloned());
                Ok(())
            }
            Mode::FailFast => child.node().map(drop),
        }
    }

    /// Run a collecting evaluation and keep its errors.
    ///
    /// Nothing fails in collect mode; should a step return an error anyway it
    /// is kept as a collected error rather than lost.
    pub fn collect(
        factory: &'a dyn NodeFactory,
        evaluate: impl FnOnce(&mut Validatable<'a>, Mode) -> Result<(), Error>,
    ) -> ErrorCollection {
        let mut validatable = Validatable::new(factory, factory.context().clone());
        if let Err(error) = evaluate(&mut validatable, Mode::Collect) {
            warn!(%error, "error escaped a collecting evaluation");
            validatable.push(ValidationError {
                kind: error.kind(),
                location: error.location().clone(),
                message: error.message().to_string(),
                schema_kind: factory.schema_kind(),
            });
        }
        validatable.errors
    }
}

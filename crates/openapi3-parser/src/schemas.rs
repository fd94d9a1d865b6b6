//! The OpenAPI 3.0 object schemas.
//!
//! Each schema is a [`FactoryKind`] constant. Object schemas are declared
//! once in a `LazyLock<ObjectSchema>`; maps and arrays are configured where
//! a field needs them.

mod components;
mod info;
mod link;
mod media_type;
mod openapi;
mod operation;
mod parameter;
mod paths;
mod schema;
mod security;
mod server;
mod tag;

pub use components::COMPONENTS;
pub use info::{CONTACT, INFO, LICENSE};
pub use link::LINK;
pub use media_type::{ENCODING, EXAMPLE, MEDIA_TYPE};
pub use openapi::OPENAPI;
pub use operation::{OPERATION, REQUEST_BODY, RESPONSE, RESPONSES};
pub use parameter::{HEADER, PARAMETER};
pub use paths::{CALLBACK, PATH_ITEM, PATHS};
pub use schema::{DISCRIMINATOR, SCHEMA, XML};
pub use security::{OAUTH_FLOW, OAUTH_FLOWS, SECURITY_REQUIREMENT, SECURITY_SCHEME};
pub use server::{SERVER, SERVER_VARIABLE};
pub use tag::{EXTERNAL_DOCUMENTATION, TAG};

mod prelude {
    #![allow(unused_imports)]
    pub(super) use std::sync::LazyLock;

    pub(super) use crate::factory::{
        ArrayConfig, ArrayFactory, MapConfig, MapFactory, ObjectFactory, ObjectSchema,
        ReferenceFactory, ValueFactory, optional_reference,
    };
    pub(super) use crate::field::{FieldConfig, FieldFactory};
    pub(super) use crate::prelude_internal::*;
    pub(super) use crate::validators;

    /// Factory for an object schema.
    pub(super) fn object(context: Context, schema: &'static ObjectSchema) -> Box<dyn NodeFactory> {
        Box::new(ObjectFactory::new(context, schema))
    }

    /// Raw string value of a field of the object being validated.
    pub(super) fn field_str<'a>(validatable: &'a Validatable<'_>, name: &str) -> Option<&'a str> {
        validatable.input()?.get(name)?.as_str()
    }
}

pub mod domain;
pub mod errors;
pub mod ports;
pub mod schema;
pub mod services;

pub use errors::{CoreError, Entity};
pub use schema::{FieldError, FromPayload, SchemaErrors};

pub mod rules;
pub mod schema;

pub use rules::{interface_schema, validate_draft, DESCRIPTION_MAX, INTERFACE_TYPE_MAX, NAME_MAX};
pub use schema::{
    messages, Field, FieldError, FieldRule, FieldSource, Schema, ValidationErrors,
    ValidationResult,
};

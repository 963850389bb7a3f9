//! The interface form's validation rules.

use crate::domain::model::kind::{is_known_status, HttpMethod};
use crate::domain::model::Draft;
use crate::domain::validate::schema::{Field, FieldRule, Schema, ValidationResult};

pub const NAME_MAX: usize = 20;
pub const INTERFACE_TYPE_MAX: usize = 20;
pub const DESCRIPTION_MAX: usize = 1000;

/// Field schema shared by create and edit.
pub fn interface_schema() -> Schema {
    Schema::new()
        .field(Field::Name, FieldRule::string().required().max(NAME_MAX))
        .field(Field::Description, FieldRule::string().max(DESCRIPTION_MAX))
        .field(
            Field::InterfaceType,
            FieldRule::string().nullable().required().max(INTERFACE_TYPE_MAX),
        )
}

/// Validates the whole draft: the field schema, plus method and status
/// membership when the draft is an HTTP interface.
pub fn validate_draft(draft: &Draft) -> ValidationResult {
    let mut errors = interface_schema().collect_errors(draft);

    if draft.is_http() {
        if let Err(e) = draft.method.parse::<HttpMethod>() {
            errors.push(Field::Method, e.to_string());
        }
        if let Some(status) = draft.status {
            if !is_known_status(status) {
                errors.push(Field::Status, format!("Unsupported status code {}", status));
            }
        }
    }

    errors.into_result()
}

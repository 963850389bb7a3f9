//! Schema-driven field validation.
//!
//! A [`Schema`] is an ordered list of `(field, rule)` pairs evaluated against
//! anything that can expose its fields as optional strings. Each field reports
//! at most one error: the first rule it fails, checked in the order
//! "required", "not null", "max length".

use std::fmt;
use thiserror::Error;

/// Form fields known to the validation engine. `as_str` is the wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    InterfaceType,
    Url,
    Method,
    Status,
    Description,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::InterfaceType => "interface_type",
            Field::Url => "url",
            Field::Method => "method",
            Field::Status => "status",
            Field::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to field values; `None` is a null value.
pub trait FieldSource {
    fn value(&self, field: Field) -> Option<&str>;
}

pub mod messages {
    pub const REQUIRED: &str = "Required";
    pub const NOT_NULL: &str = "Must not be null";

    pub fn max_length(n: usize) -> String {
        format!("Must not exceed {} characters", n)
    }
}

/// Constraints on a single string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldRule {
    pub required: bool,
    pub nullable: bool,
    pub max_length: Option<usize>,
}

impl FieldRule {
    pub fn string() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn max(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Checks one value. Lengths are counted in UTF-16 code units.
    pub fn check(&self, value: Option<&str>) -> Result<(), String> {
        let Some(v) = value else {
            if self.required {
                return Err(messages::REQUIRED.to_string());
            }
            if !self.nullable {
                return Err(messages::NOT_NULL.to_string());
            }
            return Ok(());
        };
        if self.required && v.is_empty() {
            return Err(messages::REQUIRED.to_string());
        }
        if let Some(max) = self.max_length {
            if v.encode_utf16().count() > max {
                return Err(messages::max_length(max));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Field-scoped validation failures, at most one per field, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("validation failed{}", summary(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    let parts: Vec<String> = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!(": {}", parts.join("; "))
    }
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Records an error unless `field` already has one.
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn into_result(self) -> ValidationResult {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub type ValidationResult = Result<(), ValidationErrors>;

#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: Vec<(Field, FieldRule)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: Field, rule: FieldRule) -> Self {
        self.rules.push((field, rule));
        self
    }

    /// Collects every failing field without stopping at the first one.
    pub fn collect_errors<S: FieldSource + ?Sized>(&self, source: &S) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for (field, rule) in &self.rules {
            if let Err(message) = rule.check(source.value(*field)) {
                errors.push(*field, message);
            }
        }
        errors
    }

    pub fn validate<S: FieldSource + ?Sized>(&self, source: &S) -> ValidationResult {
        self.collect_errors(source).into_result()
    }
}

//! The editable, not-yet-persisted copy of an interface record.

use crate::domain::model::context::{Auth, EditorContext};
use crate::domain::model::interface::{Interface, InterfaceRecord};
use crate::domain::model::kind::{
    HttpMethod, InterfaceKind, TypeChoice, HTTP, KNOWN_INTERFACE_TYPE, SOCKET,
};
use crate::domain::validate::{validate_draft, Field, FieldSource, ValidationErrors};

/// Form state. Fields stay flat so switching the type away from HTTP and back
/// keeps what the user typed into url/method/status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub id: u64,
    pub name: String,
    pub interface_type: Option<String>,
    pub url: String,
    pub method: String,
    pub status: Option<u16>,
    pub description: String,
    pub repository_id: u64,
    pub module_id: u64,
}

/// Which optional controls the form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    /// Free-text input bound to `interface_type`.
    pub custom_type: bool,
    /// URL, method and status inputs.
    pub http_fields: bool,
}

impl Default for Draft {
    fn default() -> Self {
        Self::new()
    }
}

impl Draft {
    /// A draft for a new interface.
    pub fn new() -> Self {
        Self::from_record(InterfaceRecord::default())
    }

    /// A draft seeded from an existing record. An empty method falls back to
    /// the default so the method selector always has a value.
    pub fn from_record(record: InterfaceRecord) -> Self {
        let method = if record.method.trim().is_empty() {
            HttpMethod::Get.as_str().to_string()
        } else {
            record.method
        };
        Self {
            id: record.id,
            name: record.name,
            interface_type: record.interface_type,
            url: record.url,
            method,
            status: record.status,
            description: record.description,
            repository_id: record.repository_id,
            module_id: record.module_id,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn is_http(&self) -> bool {
        self.interface_type.as_deref() == Some(HTTP)
    }

    /// The selector entry for the current type.
    pub fn selected_type(&self) -> TypeChoice {
        TypeChoice::of(self.interface_type.as_deref().unwrap_or_default())
    }

    /// Applies a selector choice. OTHER stores the literal label `"OTHER"`
    /// for the user to overwrite in the custom field.
    pub fn select_type(&mut self, choice: TypeChoice) {
        self.interface_type = Some(choice.as_str().to_string());
    }

    pub fn visibility(&self) -> Visibility {
        let label = self.interface_type.as_deref();
        Visibility {
            custom_type: !label.is_some_and(|t| KNOWN_INTERFACE_TYPE.contains(&t)),
            http_fields: self.is_http(),
        }
    }

    /// Validates and converts into the typed interface, stamping the creator
    /// and the context ids.
    pub fn to_interface(
        &self,
        context: &EditorContext,
        auth: &Auth,
    ) -> Result<Interface, ValidationErrors> {
        validate_draft(self)?;

        let kind = match self.interface_type.as_deref().unwrap_or_default() {
            HTTP => {
                let method = self.method.parse::<HttpMethod>().map_err(|e| {
                    let mut errors = ValidationErrors::default();
                    errors.push(Field::Method, e.to_string());
                    errors
                })?;
                InterfaceKind::Http {
                    url: self.url.clone(),
                    method,
                    status: self.status,
                }
            }
            SOCKET => InterfaceKind::Socket,
            other => InterfaceKind::Other(other.to_string()),
        };

        Ok(Interface {
            id: self.id,
            name: self.name.clone(),
            kind,
            description: self.description.clone(),
            repository_id: context.repository.id,
            module_id: context.module.id,
            creator_id: auth.user_id(),
        })
    }
}

impl FieldSource for Draft {
    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::InterfaceType => self.interface_type.as_deref(),
            Field::Url => Some(&self.url),
            Field::Method => Some(&self.method),
            Field::Description => Some(&self.description),
            // not a string field
            Field::Status => None,
        }
    }
}

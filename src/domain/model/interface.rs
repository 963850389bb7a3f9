//! Interface records: the flat wire shape and its typed counterpart.

use crate::domain::model::kind::{HttpMethod, InterfaceKind, HTTP};
use serde::{Deserialize, Serialize};

/// Flat interface record as exchanged with the backend.
///
/// `status` and `interface_type` are nullable on the wire; `creatorId` is left
/// out when nobody is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub interface_type: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "repositoryId", default)]
    pub repository_id: u64,
    #[serde(rename = "moduleId", default)]
    pub module_id: u64,
    #[serde(rename = "creatorId", default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
}

impl Default for InterfaceRecord {
    /// Initial values of a new record.
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            interface_type: Some(HTTP.to_string()),
            url: String::new(),
            method: HttpMethod::Get.as_str().to_string(),
            status: Some(200),
            description: String::new(),
            repository_id: 0,
            module_id: 0,
            creator_id: None,
        }
    }
}

impl InterfaceRecord {
    /// Whether the record has been assigned an id by persistence.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

/// Typed interface ready to be handed to a gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub id: u64,
    pub name: String,
    pub kind: InterfaceKind,
    pub description: String,
    pub repository_id: u64,
    pub module_id: u64,
    pub creator_id: Option<u64>,
}

impl Interface {
    /// Flattens into the wire record. Non-HTTP kinds always produce
    /// `url = ""`, `method = ""` and `status = null`.
    pub fn to_record(&self) -> InterfaceRecord {
        let (url, method, status) = match &self.kind {
            InterfaceKind::Http { url, method, status } => {
                (url.clone(), method.as_str().to_string(), *status)
            }
            InterfaceKind::Socket | InterfaceKind::Other(_) => (String::new(), String::new(), None),
        };
        InterfaceRecord {
            id: self.id,
            name: self.name.clone(),
            interface_type: Some(self.kind.type_label().to_string()),
            url,
            method,
            status,
            description: self.description.clone(),
            repository_id: self.repository_id,
            module_id: self.module_id,
            creator_id: self.creator_id,
        }
    }
}

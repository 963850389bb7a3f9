//! Caller-supplied context for an editor session.

use crate::domain::location::Location;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRef {
    pub id: u64,
}

/// Where the interface belongs. Both ids are authoritative and overwrite
/// whatever the draft carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorContext {
    pub repository: RepositoryRef,
    pub module: ModuleRef,
}

impl EditorContext {
    pub fn new(repository_id: u64, module_id: u64) -> Self {
        Self {
            repository: RepositoryRef { id: repository_id },
            module: ModuleRef { id: module_id },
        }
    }
}

/// Who is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Auth {
    #[default]
    Anonymous,
    User {
        id: u64,
    },
}

impl Auth {
    pub fn user_id(&self) -> Option<u64> {
        match self {
            Auth::Anonymous => None,
            Auth::User { id } => Some(*id),
        }
    }
}

/// Session state the editor would otherwise read from a global store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub auth: Auth,
    pub location: Location,
}

impl SessionContext {
    pub fn new(auth: Auth, location: Location) -> Self {
        Self { auth, location }
    }
}

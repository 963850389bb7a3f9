//! Domain model for interface records and the editor's draft.

pub mod context;
pub mod draft;
pub mod interface;
pub mod kind;

pub use context::{Auth, EditorContext, ModuleRef, RepositoryRef, SessionContext};
pub use draft::{Draft, Visibility};
pub use interface::{Interface, InterfaceRecord};
pub use kind::{
    is_known_status, HttpMethod, InterfaceKind, TypeChoice, INTERFACE_TYPE, KNOWN_INTERFACE_TYPE,
    METHODS, STATUS_LIST,
};

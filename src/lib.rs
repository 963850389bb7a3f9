pub mod app;
pub mod domain;
pub mod infra;

// Convenience re-exports (keeps call-sites clean)
pub use app::editor::{
    CloseCallback, DismissReason, EditorError, EditorStatus, InterfaceEditor, SubmitError,
    Submitted, ITF_PARAM,
};
pub use domain::location::Location;
pub use domain::model::{
    Auth, Draft, EditorContext, HttpMethod, Interface, InterfaceKind, InterfaceRecord,
    SessionContext, TypeChoice, Visibility,
};
pub use domain::port::{GatewayError, InterfaceGateway, Navigator, SavedInterface};
pub use domain::validate::{validate_draft, Field, ValidationErrors};
pub use infra::config::{AppConfig, ConfigError};
pub use infra::memory::{MemoryGateway, RecordingNavigator};
pub use infra::rap::RapClient;

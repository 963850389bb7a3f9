//! The interface record editor.
//!
//! An editor owns one draft for the lifetime of an open dialog. It is seeded
//! from an existing record (edit) or the defaults (create), re-validated after
//! every mutation, and on submit:
//! 1.  validates the whole draft and stays open on failure,
//! 2.  converts it into a typed [`Interface`](crate::domain::model::Interface),
//!     which clears url/method/status for anything but HTTP,
//! 3.  stamps the creator and the context's repository/module ids,
//! 4.  creates or updates it through the gateway,
//! 5.  points the `itf` query parameter at the saved id and navigates,
//! 6.  closes, reporting the commit to the caller.

use crate::domain::location::Location;
use crate::domain::model::{
    Draft, EditorContext, HttpMethod, InterfaceRecord, SessionContext, TypeChoice, Visibility,
};
use crate::domain::port::{GatewayError, InterfaceGateway, Navigator, SavedInterface};
use crate::domain::validate::{validate_draft, ValidationErrors};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Query parameter addressing the selected interface.
pub const ITF_PARAM: &str = "itf";

/// Invoked once when the editor closes: `Some(true)` after a commit, `None`
/// when the user closed it without saving.
pub type CloseCallback = Box<dyn FnMut(Option<bool>) + Send>;

/// How the user tried to dismiss the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    BackdropClick,
    EscapeKeyDown,
    CloseButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Open,
    Submitting,
    Closed { committed: bool },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("the editor is closed")]
    Closed,
    #[error("a submission is in flight")]
    SubmissionInFlight,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Result of a committed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    /// The record as sent to the gateway.
    pub sent: InterfaceRecord,
    pub saved: SavedInterface,
    /// The href pushed to the navigator, if any.
    pub navigated_to: Option<String>,
}

pub struct InterfaceEditor {
    title: Option<String>,
    draft: Draft,
    errors: ValidationErrors,
    context: EditorContext,
    session: SessionContext,
    status: EditorStatus,
    on_close: CloseCallback,
}

impl fmt::Debug for InterfaceEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceEditor")
            .field("title", &self.title)
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .field("context", &self.context)
            .field("session", &self.session)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl InterfaceEditor {
    /// Opens an editor for `initial` (edit) or a fresh record (create).
    pub fn open(
        initial: Option<InterfaceRecord>,
        context: EditorContext,
        session: SessionContext,
        on_close: CloseCallback,
    ) -> Self {
        let draft = initial.map(Draft::from_record).unwrap_or_default();
        debug!(
            id = draft.id,
            repository = context.repository.id,
            module = context.module.id,
            "opening interface editor"
        );
        Self {
            title: None,
            draft,
            errors: ValidationErrors::default(),
            context,
            session,
            status: EditorStatus::Open,
            on_close,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Errors from the last validation run.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    pub fn location(&self) -> &Location {
        &self.session.location
    }

    pub fn is_edit(&self) -> bool {
        !self.draft.is_new()
    }

    pub fn visibility(&self) -> Visibility {
        self.draft.visibility()
    }

    pub fn selected_type(&self) -> TypeChoice {
        self.draft.selected_type()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.status == EditorStatus::Open
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), EditorError> {
        let name = name.into();
        self.edit(|d| d.name = name)
    }

    pub fn select_interface_type(&mut self, choice: TypeChoice) -> Result<(), EditorError> {
        self.edit(|d| d.select_type(choice))
    }

    /// Writes the free-text type shown for custom interface types.
    pub fn set_custom_interface_type(
        &mut self,
        label: impl Into<String>,
    ) -> Result<(), EditorError> {
        let label = label.into();
        self.edit(|d| d.interface_type = Some(label))
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> Result<(), EditorError> {
        let url = url.into();
        self.edit(|d| d.url = url)
    }

    pub fn set_method(&mut self, method: HttpMethod) -> Result<(), EditorError> {
        self.edit(|d| d.method = method.as_str().to_string())
    }

    pub fn set_status(&mut self, status: Option<u16>) -> Result<(), EditorError> {
        self.edit(|d| d.status = status)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), EditorError> {
        let description = description.into();
        self.edit(|d| d.description = description)
    }

    /// Applies an arbitrary change to the draft and re-validates.
    pub fn edit<F: FnOnce(&mut Draft)>(&mut self, f: F) -> Result<(), EditorError> {
        self.ensure_open()?;
        f(&mut self.draft);
        self.errors = match validate_draft(&self.draft) {
            Ok(()) => ValidationErrors::default(),
            Err(errors) => errors,
        };
        Ok(())
    }

    /// Validates, saves and closes. See the module docs for the steps.
    ///
    /// A validation failure or a gateway error leaves the editor open.
    pub async fn submit<G, N>(
        &mut self,
        gateway: &G,
        navigator: &N,
    ) -> Result<Submitted, SubmitError>
    where
        G: InterfaceGateway + ?Sized,
        N: Navigator + ?Sized,
    {
        self.ensure_open()?;

        let interface = match self.draft.to_interface(&self.context, &self.session.auth) {
            Ok(interface) => interface,
            Err(errors) => {
                warn!(%errors, "interface draft rejected");
                self.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };
        self.errors = ValidationErrors::default();

        let record = interface.to_record();
        self.status = EditorStatus::Submitting;
        info!(
            id = record.id,
            name = %record.name,
            interface_type = interface.kind.type_label(),
            "submitting interface"
        );

        let result = if record.is_persisted() {
            gateway.update(&record).await
        } else {
            gateway.create(&record).await
        };
        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, "saving interface failed");
                self.status = EditorStatus::Open;
                return Err(SubmitError::Gateway(e));
            }
        };

        let navigated_to = match saved.id.filter(|id| *id != 0) {
            Some(id) => {
                self.session.location.set_search(ITF_PARAM, id);
                let href = self.session.location.href();
                navigator.push(&href);
                Some(href)
            }
            None => {
                warn!("gateway returned no interface id; location left unchanged");
                None
            }
        };

        info!(id = ?saved.id, "interface saved");
        self.close(Some(true));
        Ok(Submitted {
            sent: record,
            saved,
            navigated_to,
        })
    }

    /// The explicit cancel control. Discards the draft.
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        self.ensure_open()?;
        debug!("interface editor cancelled");
        self.close(None);
        Ok(())
    }

    /// Dialog-level dismissal. Backdrop clicks are ignored; returns whether the
    /// editor closed.
    pub fn dismiss(&mut self, reason: DismissReason) -> Result<bool, EditorError> {
        if reason == DismissReason::BackdropClick {
            return Ok(false);
        }
        self.cancel()?;
        Ok(true)
    }

    fn ensure_open(&self) -> Result<(), EditorError> {
        match self.status {
            EditorStatus::Open => Ok(()),
            EditorStatus::Submitting => Err(EditorError::SubmissionInFlight),
            EditorStatus::Closed { .. } => Err(EditorError::Closed),
        }
    }

    fn close(&mut self, committed: Option<bool>) {
        self.status = EditorStatus::Closed {
            committed: committed.unwrap_or(false),
        };
        (self.on_close)(committed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Auth;
    use crate::domain::validate::Field;
    use std::sync::{Arc, Mutex};

    fn editor(
        initial: Option<InterfaceRecord>,
    ) -> (InterfaceEditor, Arc<Mutex<Vec<Option<bool>>>>) {
        let closes = Arc::new(Mutex::new(Vec::new()));
        let sink = closes.clone();
        let session = SessionContext::new(
            Auth::User { id: 1 },
            Location::parse("/repository/editor?id=1"),
        );
        let editor = InterfaceEditor::open(
            initial,
            EditorContext::new(1, 2),
            session,
            Box::new(move |v| sink.lock().unwrap().push(v)),
        );
        (editor, closes)
    }

    #[test]
    fn edits_revalidate() {
        let (mut ed, _) = editor(None);
        assert!(ed.errors().is_empty());
        ed.set_name("x".repeat(21)).unwrap();
        assert!(ed.errors().get(Field::Name).is_some());
        ed.set_name("ok").unwrap();
        assert!(ed.errors().is_empty());
    }

    #[test]
    fn type_selection_drives_visibility() {
        let (mut ed, _) = editor(None);
        assert!(ed.visibility().http_fields);
        ed.select_interface_type(TypeChoice::Other).unwrap();
        assert!(ed.visibility().custom_type);
        assert!(!ed.visibility().http_fields);
        ed.set_custom_interface_type("GRPC").unwrap();
        assert_eq!(ed.selected_type(), TypeChoice::Other);
        assert_eq!(ed.draft().interface_type.as_deref(), Some("GRPC"));
        ed.select_interface_type(TypeChoice::Socket).unwrap();
        assert!(!ed.visibility().custom_type);
    }

    #[test]
    fn backdrop_is_ignored_and_cancel_reports_none() {
        let (mut ed, closes) = editor(None);
        assert_eq!(ed.dismiss(DismissReason::BackdropClick), Ok(false));
        assert!(closes.lock().unwrap().is_empty());
        assert!(ed.can_submit());

        assert_eq!(ed.dismiss(DismissReason::EscapeKeyDown), Ok(true));
        assert_eq!(*closes.lock().unwrap(), vec![None]);
        assert_eq!(ed.status(), EditorStatus::Closed { committed: false });
    }

    #[test]
    fn closed_editor_rejects_changes() {
        let (mut ed, closes) = editor(None);
        ed.cancel().unwrap();
        assert_eq!(ed.set_name("late"), Err(EditorError::Closed));
        assert_eq!(ed.cancel(), Err(EditorError::Closed));
        assert!(!ed.can_submit());
        assert_eq!(closes.lock().unwrap().len(), 1);
    }

    #[test]
    fn edit_mode_follows_initial_record() {
        let (ed, _) = editor(Some(InterfaceRecord {
            id: 5,
            name: "existing".into(),
            ..InterfaceRecord::default()
        }));
        assert!(ed.is_edit());
        let (ed, _) = editor(None);
        assert!(!ed.is_edit());
        assert_eq!(ed.with_title("New interface").title(), Some("New interface"));
    }
}

//! Contact list screen state and transitions.
//!
//! # Responsibility
//! - Recompute the visible list whenever the filter or the store changes.
//! - Drive the add/edit/delete dialog cycle.
//!
//! # Invariants
//! - A blank filter shows every contact; otherwise a name substring match.
//! - Validation failures keep the current dialog open.
//! - A failed write propagates and leaves the dialog unchanged; once the
//!   write succeeds the dialog closes even if the reload fails.
//! - A failed re-query leaves filter and records untouched.
//! - Successful confirms and `dismiss` always return to `DialogMode::None`.

use crate::model::contact::{Contact, ContactId, ContactValidationError, NewContact};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use crate::service::contact_service::ContactService;
use crate::state::dialog::DialogMode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StateResult<T> = Result<T, StateError>;

/// Failure of a presentation transition.
#[derive(Debug)]
pub enum StateError {
    /// User input rejected; show `user_message()` and keep the dialog.
    Validation(ContactValidationError),
    /// Store unavailable or engine failure.
    Store(RepoError),
}

impl StateError {
    /// Text for a transient notification, when the failure is user-caused.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Validation(err) => Some(err.user_message()),
            Self::Store(_) => None,
        }
    }
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "contact store failure: {err}"),
        }
    }
}

impl Error for StateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RepoError> for StateError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

/// Plain state for the contact list screen.
///
/// Holds no store handle; every transition that touches persistence takes
/// the service as an argument, so hosts can open the store per call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactListState {
    records: Vec<Contact>,
    filter: String,
    dialog: DialogMode,
}

impl ContactListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contacts currently visible under `filter`.
    pub fn records(&self) -> &[Contact] {
        &self.records
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn dialog(&self) -> &DialogMode {
        &self.dialog
    }

    /// Re-queries the store for the current filter.
    pub fn load<R: ContactRepository>(&mut self, service: &ContactService<R>) -> StateResult<()> {
        self.records = service.visible_contacts(&self.filter)?;
        Ok(())
    }

    /// Stores new filter text and recomputes the visible list.
    pub fn set_filter<R: ContactRepository>(
        &mut self,
        service: &ContactService<R>,
        text: impl Into<String>,
    ) -> StateResult<()> {
        let filter = text.into();
        let records = service.visible_contacts(&filter)?;
        self.filter = filter;
        self.records = records;
        Ok(())
    }

    pub fn request_add(&mut self) {
        self.dialog = DialogMode::Add;
    }

    pub fn request_edit(&mut self, contact: Contact) {
        self.dialog = DialogMode::Edit(contact);
    }

    pub fn request_delete(&mut self, contact: Contact) {
        self.dialog = DialogMode::Delete(contact);
    }

    /// Closes any dialog without touching the store.
    pub fn dismiss(&mut self) {
        self.dialog = DialogMode::None;
    }

    /// Persists a new contact from the add form.
    pub fn confirm_add<R: ContactRepository>(
        &mut self,
        service: &ContactService<R>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> StateResult<ContactId> {
        let contact = NewContact::new(name, phone);
        contact.validate().map_err(StateError::Validation)?;

        let id = service.add(&contact)?;
        self.finish_write(service)?;
        Ok(id)
    }

    /// Saves the edit form for `id`.
    pub fn confirm_edit<R: ContactRepository>(
        &mut self,
        service: &ContactService<R>,
        id: ContactId,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> StateResult<()> {
        let contact = Contact::new(id, name, phone);
        contact.validate().map_err(StateError::Validation)?;

        service.update(&contact)?;
        self.finish_write(service)
    }

    /// Removes `contact` after the user confirmed.
    pub fn confirm_delete<R: ContactRepository>(
        &mut self,
        service: &ContactService<R>,
        contact: &Contact,
    ) -> StateResult<()> {
        service.delete(contact.id)?;
        self.finish_write(service)
    }

    fn finish_write<R: ContactRepository>(
        &mut self,
        service: &ContactService<R>,
    ) -> StateResult<()> {
        // The write is committed; a failed reload must not reopen the form.
        self.dialog = DialogMode::None;
        self.load(service)
    }
}

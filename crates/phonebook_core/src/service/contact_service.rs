//! Contact use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for presentation state and FFI callers.
//! - Route filter text to the matching store query.
//! - Emit metadata-only log events for write paths.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Log lines carry ids and counts only, never names or phone numbers.

use crate::model::contact::{is_blank, Contact, ContactId, NewContact};
use crate::repo::contact_repo::{ContactRepository, RepoResult};
use log::{debug, error, info};

/// Use-case service wrapper for contact operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the contacts visible for `filter`.
    ///
    /// # Contract
    /// - Blank filter (empty or whitespace-only) lists every contact.
    /// - Otherwise matches `filter` as a substring of the name.
    pub fn visible_contacts(&self, filter: &str) -> RepoResult<Vec<Contact>> {
        let filtered = !is_blank(filter);
        let contacts = if filtered {
            self.repo.find_by_name_substring(filter)?
        } else {
            self.repo.list_all()?
        };
        debug!(
            "event=contact_query module=service status=ok filtered={} count={}",
            filtered,
            contacts.len()
        );
        Ok(contacts)
    }

    pub fn list_all(&self) -> RepoResult<Vec<Contact>> {
        self.repo.list_all()
    }

    pub fn find_by_name_substring(&self, text: &str) -> RepoResult<Vec<Contact>> {
        self.repo.find_by_name_substring(text)
    }

    pub fn find_first_by_exact_name(&self, name: &str) -> RepoResult<Option<Contact>> {
        self.repo.find_first_by_exact_name(name)
    }

    /// Persists a new contact and returns its store-assigned id.
    pub fn add(&self, contact: &NewContact) -> RepoResult<ContactId> {
        match self.repo.add(contact) {
            Ok(id) => {
                info!("event=contact_add module=service status=ok id={id}");
                Ok(id)
            }
            Err(err) => {
                error!("event=contact_add module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Replaces name/phone for an existing id. Missing ids are ignored.
    pub fn update(&self, contact: &Contact) -> RepoResult<()> {
        log_write("contact_update", contact.id, self.repo.update(contact))
    }

    /// Removes a contact. Missing ids are ignored.
    pub fn delete(&self, id: ContactId) -> RepoResult<()> {
        log_write("contact_delete", id, self.repo.delete(id))
    }
}

fn log_write(event: &str, id: ContactId, result: RepoResult<()>) -> RepoResult<()> {
    match &result {
        Ok(()) => info!("event={event} module=service status=ok id={id}"),
        Err(err) => error!("event={event} module=service status=error id={id} error={err}"),
    }
    result
}

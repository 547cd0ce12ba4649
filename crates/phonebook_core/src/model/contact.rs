//! Contact records and validation.
//!
//! # Responsibility
//! - Define persisted (`Contact`) and not-yet-persisted (`NewContact`) shapes.
//! - Own the single write-path validation rule (non-blank name).
//!
//! # Invariants
//! - `id` is assigned by the store and never reused after delete.
//! - Names are stored exactly as typed; only blankness is checked.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
pub type ContactId = i64;

/// Message shown to the user when a form is submitted with a blank name.
pub const BLANK_NAME_MESSAGE: &str = "Name cannot be blank";

/// Validation failures for contact writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    /// `name` is empty or whitespace-only.
    BlankName,
}

impl ContactValidationError {
    /// Short text suitable for a transient notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BlankName => BLANK_NAME_MESSAGE,
        }
    }
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "contact name must not be blank"),
        }
    }
}

impl Error for ContactValidationError {}

/// A contact that has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// Empty when the user left it out.
    #[serde(default)]
    pub phone: String,
}

impl Contact {
    pub fn new(id: ContactId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
        }
    }

    /// Checks write-path invariants before persistence.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        validate_name(&self.name)
    }
}

/// Form input for a contact that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ContactValidationError> {
        validate_name(&self.name)
    }

    /// Attaches the store-assigned id.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            phone: self.phone,
        }
    }
}

/// Returns whether `value` has no visible characters.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn validate_name(name: &str) -> Result<(), ContactValidationError> {
    if is_blank(name) {
        return Err(ContactValidationError::BlankName);
    }
    Ok(())
}

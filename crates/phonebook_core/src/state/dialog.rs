//! Dialog mode for the contact list screen.

use crate::model::contact::Contact;
use serde::{Deserialize, Serialize};

/// Which modal, if any, the host UI should present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "contact", rename_all = "snake_case")]
pub enum DialogMode {
    #[default]
    None,
    Add,
    Edit(Contact),
    Delete(Contact),
}

impl DialogMode {
    /// Stable lowercase label, matching the serialized `mode` tag.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Add => "add",
            Self::Edit(_) => "edit",
            Self::Delete(_) => "delete",
        }
    }

    /// Record the dialog operates on, for edit/delete.
    pub fn contact(&self) -> Option<&Contact> {
        match self {
            Self::Edit(contact) | Self::Delete(contact) => Some(contact),
            Self::None | Self::Add => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

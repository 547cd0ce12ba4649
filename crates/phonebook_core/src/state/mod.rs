//! UI-agnostic presentation state for the contact list screen.
//!
//! # Responsibility
//! - Hold the visible contact list, filter text and active dialog.
//! - Apply user intents as explicit transitions against a `ContactService`.
//!
//! # Invariants
//! - Exactly one `DialogMode` is active at any time.
//! - Every successful store mutation is followed by a full re-query.

pub mod contact_list;
pub mod dialog;

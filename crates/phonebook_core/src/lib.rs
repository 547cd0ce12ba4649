//! Core domain logic for the phonebook app.
//! This crate is the single source of truth for contact invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod state;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::contact::{Contact, ContactId, ContactValidationError, NewContact};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::contact_service::ContactService;
pub use state::contact_list::{ContactListState, StateError, StateResult};
pub use state::dialog::DialogMode;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

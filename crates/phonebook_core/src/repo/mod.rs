//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the contact store contract.
//! - Isolate SQLite query details from service and presentation code.
//!
//! # Invariants
//! - Repository writes enforce `Contact::validate()` before persistence.
//! - Update/delete of a missing id is a silent no-op, not `NotFound`.
//! - Engine failures surface as `RepoError::Db` and are never swallowed.

pub mod contact_repo;

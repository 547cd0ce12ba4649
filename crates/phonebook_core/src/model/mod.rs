//! Contact domain model.
//!
//! # Responsibility
//! - Define the record shapes shared by store, service and presentation state.
//!
//! # Invariants
//! - A persisted `Contact` always carries a store-assigned id.
//! - A persisted `Contact` never has a blank name.

pub mod contact;

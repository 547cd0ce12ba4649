//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the contact list screen transitions to Dart via FRB.
//! - Fold core errors into response envelopes the UI can render directly.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One process-wide `ContactListState`; every call holds its lock for the
//!   whole operation so each response is a consistent snapshot.
//! - The database file is opened per call and closed when the call returns.

use log::error;
use phonebook_core::db::open_db;
use phonebook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Contact, ContactListState, ContactService, SqliteContactRepository, StateError, StateResult,
    StoreConfig,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static LIST_STATE: OnceLock<Mutex<ContactListState>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the contacts database file location for this process.
///
/// Must run before the first contacts call to take effect. Returns empty
/// string on success, or an error message when another path is already in
/// use.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let requested = StoreConfig::resolve(Some(path.as_str())).db_path;
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "database already opened at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Contact row as rendered by the list and dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// Screen snapshot returned by every contacts call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListResponse {
    /// Whether the requested transition succeeded.
    pub ok: bool,
    /// Visible contacts for the current filter.
    pub items: Vec<ContactItem>,
    pub filter: String,
    /// Active dialog (`none|add|edit|delete`).
    pub dialog: String,
    /// Record targeted by an edit/delete dialog.
    pub dialog_item: Option<ContactItem>,
    /// Toast text on validation failure, error text on store failure.
    pub message: String,
}

impl ContactListResponse {
    fn from_state(state: &ContactListState, ok: bool, message: impl Into<String>) -> Self {
        Self {
            ok,
            items: state.records().iter().map(ContactItem::from).collect(),
            filter: state.filter().to_string(),
            dialog: state.dialog().label().to_string(),
            dialog_item: state.dialog().contact().map(ContactItem::from),
            message: message.into(),
        }
    }
}

/// Result of an exact-name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLookupResponse {
    pub ok: bool,
    pub item: Option<ContactItem>,
    pub message: String,
}

/// Reloads the visible list from the store.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_snapshot() -> ContactListResponse {
    with_list_state("contacts_snapshot", |state, service| state.load(service))
}

/// Applies new filter text and recomputes the visible list.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_set_filter(text: String) -> ContactListResponse {
    with_list_state("contacts_set_filter", |state, service| {
        state.set_filter(service, text)
    })
}

/// Opens the add dialog.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_request_add() -> ContactListResponse {
    update_dialog(ContactListState::request_add)
}

/// Opens the edit dialog for `item`.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_request_edit(item: ContactItem) -> ContactListResponse {
    update_dialog(|state| state.request_edit(item.into()))
}

/// Opens the delete confirmation for `item`.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_request_delete(item: ContactItem) -> ContactListResponse {
    update_dialog(|state| state.request_delete(item.into()))
}

/// Closes any dialog without touching the store.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_dismiss() -> ContactListResponse {
    update_dialog(ContactListState::dismiss)
}

/// Submits the add form.
///
/// # FFI contract
/// - Blank name: `ok=false`, dialog stays `add`, `message` holds toast text.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_confirm_add(name: String, phone: String) -> ContactListResponse {
    with_list_state("contacts_confirm_add", |state, service| {
        state.confirm_add(service, name, phone).map(|_| ())
    })
}

/// Submits the edit form for `id`.
///
/// # FFI contract
/// - Blank name: `ok=false`, dialog stays `edit`, `message` holds toast text.
/// - Unknown `id` is a silent no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_confirm_edit(id: i64, name: String, phone: String) -> ContactListResponse {
    with_list_state("contacts_confirm_edit", |state, service| {
        state.confirm_edit(service, id, name, phone)
    })
}

/// Deletes `item` after user confirmation. Unknown ids are a silent no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_confirm_delete(item: ContactItem) -> ContactListResponse {
    let contact = Contact::from(item);
    with_list_state("contacts_confirm_delete", |state, service| {
        state.confirm_delete(service, &contact)
    })
}

/// Finds the first contact named exactly `name`.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_find_first(name: String) -> ContactLookupResponse {
    let db_path = resolve_db_path();
    let lookup = open_db(&db_path)
        .map_err(|err| err.to_string())
        .and_then(|conn| {
            ContactService::new(SqliteContactRepository::new(&conn))
                .find_first_by_exact_name(name.as_str())
                .map_err(|err| err.to_string())
        });

    match lookup {
        Ok(item) => ContactLookupResponse {
            ok: true,
            message: if item.is_some() {
                "Contact found.".to_string()
            } else {
                "No contact with that name.".to_string()
            },
            item: item.as_ref().map(ContactItem::from),
        },
        Err(err) => {
            error!("event=ffi_call module=ffi status=error op=contact_find_first error={err}");
            ContactLookupResponse {
                ok: false,
                item: None,
                message: format!("contact_find_first failed: {err}"),
            }
        }
    }
}

fn with_list_state(
    op: &str,
    f: impl FnOnce(
        &mut ContactListState,
        &ContactService<SqliteContactRepository<'_>>,
    ) -> StateResult<()>,
) -> ContactListResponse {
    let mut state = lock_list_state();
    let db_path = resolve_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=ffi_call module=ffi status=error op={op} error_code=db_open_failed error={err}");
            return ContactListResponse::from_state(&state, false, format!("{op} failed: {err}"));
        }
    };
    let service = ContactService::new(SqliteContactRepository::new(&conn));

    match f(&mut *state, &service) {
        Ok(()) => ContactListResponse::from_state(&state, true, String::new()),
        Err(StateError::Validation(err)) => {
            ContactListResponse::from_state(&state, false, err.user_message())
        }
        Err(err) => {
            error!("event=ffi_call module=ffi status=error op={op} error={err}");
            ContactListResponse::from_state(&state, false, format!("{op} failed: {err}"))
        }
    }
}

fn update_dialog(f: impl FnOnce(&mut ContactListState)) -> ContactListResponse {
    let mut state = lock_list_state();
    f(&mut *state);
    ContactListResponse::from_state(&state, true, String::new())
}

fn lock_list_state() -> MutexGuard<'static, ContactListState> {
    LIST_STATE
        .get_or_init(|| Mutex::new(ContactListState::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| StoreConfig::resolve(None).db_path)
        .clone()
}

impl From<&Contact> for ContactItem {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name.clone(),
            phone: contact.phone.clone(),
        }
    }
}

impl From<ContactItem> for Contact {
    fn from(item: ContactItem) -> Self {
        Contact::new(item.id, item.name, item.phone)
    }
}

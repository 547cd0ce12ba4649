//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/find/add/update/delete over the `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before SQL mutations.
//! - Read paths reject rows with a NULL or blank name instead of masking them.
//! - List order is storage iteration order; callers must not rely on it.

use crate::db::DbError;
use crate::model::contact::{is_blank, Contact, ContactId, ContactValidationError, NewContact};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT id, name, phone FROM contacts";
const LIKE_ESCAPE: char = '\\';

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    /// Caller passed arguments the operation does not accept.
    InvalidQuery(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidQuery(message) => write!(f, "invalid contact query: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidQuery(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    /// Returns every stored contact.
    fn list_all(&self) -> RepoResult<Vec<Contact>>;
    /// Returns contacts whose name contains `text` (engine `LIKE` semantics).
    fn find_by_name_substring(&self, text: &str) -> RepoResult<Vec<Contact>>;
    /// Returns the first contact whose name equals `name`.
    fn find_first_by_exact_name(&self, name: &str) -> RepoResult<Option<Contact>>;
    /// Inserts a contact and returns the store-assigned id.
    fn add(&self, contact: &NewContact) -> RepoResult<ContactId>;
    /// Replaces name and phone of the row with `contact.id`, if any.
    fn update(&self, contact: &Contact) -> RepoResult<()>;
    /// Removes the row with `id`, if any.
    fn delete(&self, id: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!("{CONTACT_SELECT_SQL};"))?;
        let rows = stmt.query([])?;
        collect_contacts(rows)
    }

    fn find_by_name_substring(&self, text: &str) -> RepoResult<Vec<Contact>> {
        if is_blank(text) {
            return Err(RepoError::InvalidQuery(
                "name filter must not be blank; use list_all instead".to_string(),
            ));
        }

        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL} WHERE name LIKE ?1 ESCAPE '{LIKE_ESCAPE}';"
        ))?;
        let rows = stmt.query([contains_pattern(text)])?;
        collect_contacts(rows)
    }

    fn find_first_by_exact_name(&self, name: &str) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE name = ?1 LIMIT 1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn add(&self, contact: &NewContact) -> RepoResult<ContactId> {
        contact.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (name, phone) VALUES (?1, ?2);",
            params![contact.name.as_str(), contact.phone.as_str()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, contact: &Contact) -> RepoResult<()> {
        contact.validate()?;

        // Zero changed rows means the id is gone; that is not an error.
        self.conn.execute(
            "UPDATE contacts SET name = ?1, phone = ?2 WHERE id = ?3;",
            params![contact.name.as_str(), contact.phone.as_str(), contact.id],
        )?;

        Ok(())
    }

    fn delete(&self, id: ContactId) -> RepoResult<()> {
        self.conn.execute("DELETE FROM contacts WHERE id = ?1;", [id])?;
        Ok(())
    }
}

fn collect_contacts(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Contact>> {
    let mut contacts = Vec::new();
    while let Some(row) = rows.next()? {
        contacts.push(parse_contact_row(row)?);
    }
    Ok(contacts)
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id: ContactId = row.get("id")?;
    let name = row
        .get::<_, Option<String>>("name")?
        .filter(|value| !is_blank(value))
        .ok_or_else(|| {
            RepoError::InvalidData(format!("blank name in contacts.name for id {id}"))
        })?;

    Ok(Contact {
        id,
        name,
        phone: row.get::<_, Option<String>>("phone")?.unwrap_or_default(),
    })
}

/// Builds a `LIKE` pattern matching `text` anywhere, with wildcards escaped.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

//! Store location configuration.
//!
//! # Responsibility
//! - Resolve the contacts database path for hosts that do not pass one.
//!
//! # Invariants
//! - Precedence: explicit path, then `PHONEBOOK_DB_PATH`, then the temp dir.
//! - Blank values at any level are ignored.

use std::path::{Path, PathBuf};

/// Environment variable overriding the database file location.
pub const DB_PATH_ENV: &str = "PHONEBOOK_DB_PATH";

/// Default database file name.
pub const DB_FILE_NAME: &str = "contacts.sqlite3";

/// Resolved store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    /// Resolves from an optional explicit path and the process environment.
    pub fn resolve(explicit: Option<&str>) -> Self {
        let env_value = std::env::var(DB_PATH_ENV).ok();
        Self::resolve_from(explicit, env_value.as_deref(), &std::env::temp_dir())
    }

    fn resolve_from(explicit: Option<&str>, env_value: Option<&str>, fallback_dir: &Path) -> Self {
        let db_path = [explicit, env_value]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| fallback_dir.join(DB_FILE_NAME));
        Self { db_path }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DB_FILE_NAME};
    use std::path::{Path, PathBuf};

    #[test]
    fn explicit_path_wins_over_env() {
        let config =
            StoreConfig::resolve_from(Some("/data/a.db"), Some("/env/b.db"), Path::new("/tmp"));
        assert_eq!(config.db_path, PathBuf::from("/data/a.db"));
    }

    #[test]
    fn blank_values_fall_through_to_default() {
        let config = StoreConfig::resolve_from(Some("  "), Some(""), Path::new("/tmp"));
        assert_eq!(config.db_path, Path::new("/tmp").join(DB_FILE_NAME));
    }

    #[test]
    fn env_value_is_trimmed() {
        let config = StoreConfig::resolve_from(None, Some(" /env/b.db \n"), Path::new("/tmp"));
        assert_eq!(config.db_path, PathBuf::from("/env/b.db"));
    }
}

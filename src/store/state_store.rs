use crate::store::error::{Result, StoreError};
use crate::store::limits::StoreLimits;
use crate::store::migrations;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// StateStore owns this node's SQLite connection. Clones share the connection, and every
/// operation holds the connection lock for its whole duration, so multi-statement operations
/// also run inside a transaction and are never interleaved with each other.
#[derive(Clone)]
pub(crate) struct StateStore {
    conn: Arc<Mutex<Connection>>,
    pub(super) limits: StoreLimits,
}

impl StateStore {
    /// Open (or create) the database file at `path` and bring its schema up to date.
    pub(crate) fn open_at(logger: &slog::Logger, path: &Path, limits: StoreLimits) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        slog::info!(logger, "Opened database at {:?}", path);

        Self::from_connection(logger, conn, limits)
    }

    pub(crate) fn open_in_memory(logger: &slog::Logger, limits: StoreLimits) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(logger, conn, limits)
    }

    fn from_connection(logger: &slog::Logger, conn: Connection, limits: StoreLimits) -> Result<Self> {
        migrations::run_migrations(logger, &conn)?;

        Ok(StateStore {
            conn: Arc::new(Mutex::new(conn)),
            limits,
        })
    }

    pub(super) fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&mut conn)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;

    pub(crate) fn test_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    pub(crate) fn in_memory_store() -> StateStore {
        StateStore::open_in_memory(&test_logger(), StoreLimits::default()).expect("open in-memory store")
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::test_logger;
    use super::*;

    #[test]
    fn reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node.db");

        let store = StateStore::open_at(&test_logger(), &path, StoreLimits::default()).unwrap();
        store.create_account("amy", "h(pw)", "bio").unwrap();
        drop(store);

        let store = StateStore::open_at(&test_logger(), &path, StoreLimits::default()).unwrap();
        assert!(store.account_exists("amy").unwrap());
        assert!(!store.account_exists("bob").unwrap());
    }
}

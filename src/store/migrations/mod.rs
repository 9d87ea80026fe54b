//! Schema migrations, tracked with `PRAGMA user_version` so each one runs exactly once.
mod v001_initial;

use crate::store::error::{Result, StoreError};
use rusqlite::Connection;

const CURRENT_VERSION: u32 = 1;

pub(super) fn run_migrations(logger: &slog::Logger, conn: &Connection) -> Result<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    slog::debug!(
        logger,
        "Schema version {} (target {})",
        current,
        CURRENT_VERSION
    );

    if current < 1 {
        slog::info!(logger, "Applying migration v001_initial");
        v001_initial::up(conn).map_err(|e| StoreError::Migration(e.to_string()))?;
        conn.pragma_update(None, "user_version", 1)?;
    }

    Ok(())
}

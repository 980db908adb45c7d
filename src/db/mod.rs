pub mod queries;

use anyhow::Context;
use rusqlite::Connection;

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")
        .context("failed to set database pragmas")?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notified_reservations (
            payload_hash TEXT PRIMARY KEY,
            notified_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create notified_reservations table")?;

    Ok(conn)
}

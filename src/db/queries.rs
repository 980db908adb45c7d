use rusqlite::{params, Connection};

// ── Notification ledger ──

pub fn is_notified(conn: &Connection, payload_hash: &str) -> anyhow::Result<bool> {
    let hit: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM notified_reservations WHERE payload_hash = ?1",
        [payload_hash],
        |row| row.get(0),
    )?;
    Ok(hit)
}

pub fn mark_notified(conn: &Connection, payload_hash: &str) -> anyhow::Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO notified_reservations (payload_hash) VALUES (?1)",
        [payload_hash],
    )?;
    Ok(())
}

pub fn purge_old_entries(conn: &Connection, days: i64) -> anyhow::Result<usize> {
    let count = conn.execute(
        "DELETE FROM notified_reservations WHERE notified_at <= datetime('now', ?1)",
        params![format!("-{days} days")],
    )?;
    Ok(count)
}

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Opens a private in-memory database. Nothing written here outlives the connection.
pub fn open_memory_connection() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory db")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS row_order (
            pos         INTEGER PRIMARY KEY,
            row_idx     INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cell (
            pos         INTEGER NOT NULL,
            col_idx     INTEGER NOT NULL,
            value       TEXT NOT NULL,
            PRIMARY KEY (pos, col_idx)
        );

        CREATE TABLE IF NOT EXISTS sort_cell (
            pos         INTEGER NOT NULL,
            key_idx     INTEGER NOT NULL,
            value,
            PRIMARY KEY (pos, key_idx)
        );

        CREATE INDEX IF NOT EXISTS idx_cell_pos
            ON cell(pos);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}

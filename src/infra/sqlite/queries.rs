use anyhow::{Context, Result};
use rusqlite::{params, types::Value, Connection, Transaction};

use crate::domain::entities::record::CellValue;
use crate::domain::entities::table::SortDescriptor;

pub fn to_sql_value(value: &CellValue) -> Value {
    match value {
        CellValue::Text(text) => Value::Text(text.clone()),
        CellValue::Integer(value) => Value::Integer(*value),
        CellValue::Float(value) => Value::Real(*value),
        CellValue::Bool(value) => Value::Integer(i64::from(*value)),
        CellValue::Date(_) | CellValue::DateTime(_) => Value::Text(value.to_string()),
    }
}

/// Escapes `%`, `_` and `\` so the filter text matches literally under `ESCAPE '\'`.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub fn clear_rows(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "DELETE FROM cell;
         DELETE FROM sort_cell;
         DELETE FROM row_order;",
    )
    .context("failed to clear scratch tables")
}

pub fn insert_row_order(tx: &Transaction<'_>, rows: &[usize]) -> Result<()> {
    let mut insert = tx
        .prepare("INSERT INTO row_order(pos, row_idx) VALUES (?1, ?2)")
        .context("failed to prepare row_order insert")?;
    for (pos, &row_idx) in rows.iter().enumerate() {
        insert
            .execute(params![pos as i64, row_idx as i64])
            .context("failed to insert row_order")?;
    }
    Ok(())
}

pub fn insert_cells<'a>(
    tx: &Transaction<'_>,
    cells: impl IntoIterator<Item = (usize, usize, &'a str)>,
) -> Result<()> {
    let mut insert = tx
        .prepare("INSERT INTO cell(pos, col_idx, value) VALUES (?1, ?2, ?3)")
        .context("failed to prepare cell insert")?;
    for (pos, col_idx, value) in cells {
        insert
            .execute(params![pos as i64, col_idx as i64, value])
            .context("failed to insert cell")?;
    }
    Ok(())
}

pub fn insert_sort_cells(
    tx: &Transaction<'_>,
    cells: impl IntoIterator<Item = (usize, usize, Value)>,
) -> Result<()> {
    let mut insert = tx
        .prepare("INSERT INTO sort_cell(pos, key_idx, value) VALUES (?1, ?2, ?3)")
        .context("failed to prepare sort_cell insert")?;
    for (pos, key_idx, value) in cells {
        insert
            .execute(params![pos as i64, key_idx as i64, value])
            .context("failed to insert sort_cell")?;
    }
    Ok(())
}

fn collect_row_indices(conn: &Connection, sql: &str, params: Vec<Value>) -> Result<Vec<usize>> {
    let mut stmt = conn
        .prepare(sql)
        .context("failed to prepare row_idx query")?;
    let row_indices = stmt
        .query_map(rusqlite::params_from_iter(params), |row| row.get::<_, i64>(0))
        .context("failed to query row_idx")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect row_idx")?;

    Ok(row_indices
        .into_iter()
        .filter_map(|row_idx| usize::try_from(row_idx).ok())
        .collect())
}

pub fn query_matching_rows(conn: &Connection, needle: &str) -> Result<Vec<usize>> {
    collect_row_indices(
        conn,
        "SELECT r.row_idx
         FROM row_order r
         WHERE EXISTS (
             SELECT 1 FROM cell gs
             WHERE gs.pos = r.pos
               AND gs.value LIKE ? ESCAPE '\\'
         )
         ORDER BY r.pos ASC",
        vec![Value::Text(like_pattern(needle))],
    )
}

pub fn query_sorted_rows(conn: &Connection, sorting: &[SortDescriptor]) -> Result<Vec<usize>> {
    let mut row_sql = String::from("SELECT r.row_idx FROM row_order r ");
    let mut row_params = Vec::<Value>::new();
    let mut order_terms = Vec::with_capacity(sorting.len() * 2 + 1);

    for (key_idx, sort) in sorting.iter().enumerate() {
        row_sql.push_str(&format!(
            "LEFT JOIN sort_cell s{key_idx}
             ON s{key_idx}.pos = r.pos
            AND s{key_idx}.key_idx = ? "
        ));
        row_params.push(Value::Integer(key_idx as i64));

        let direction = if sort.descending { "DESC" } else { "ASC" };
        order_terms.push(format!("s{key_idx}.value COLLATE NOCASE {direction}"));
        order_terms.push(format!("s{key_idx}.value {direction}"));
    }
    order_terms.push("r.pos ASC".to_string());

    row_sql.push_str("ORDER BY ");
    row_sql.push_str(&order_terms.join(", "));

    collect_row_indices(conn, &row_sql, row_params)
}

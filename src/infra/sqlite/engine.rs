use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::warn;

use crate::domain::entities::record::Record;
use crate::domain::entities::table::{ColumnDef, SortDescriptor};
use crate::infra::sqlite::queries::{
    clear_rows, insert_cells, insert_row_order, insert_sort_cells, query_matching_rows,
    query_sorted_rows, to_sql_value,
};
use crate::infra::sqlite::schema::open_memory_connection;
use crate::usecase::ports::row_model::{RowModel, RowModelEngine};

/// Evaluates the global filter and sorting with SQLite over an in-memory copy
/// of the rows.
///
/// Matching follows SQLite `LIKE`, which ignores case for ASCII letters only.
/// Ordering follows SQLite storage classes, so booleans sort with numbers.
pub struct SqliteEngine {
    conn: Connection,
}

impl SqliteEngine {
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: open_memory_connection()?,
        })
    }

    fn try_filter<T: Record>(
        &self,
        data: &[T],
        model: &RowModel,
        columns: &[ColumnDef],
        needle: &str,
    ) -> Result<RowModel> {
        clear_rows(&self.conn)?;
        let tx = self
            .conn
            .unchecked_transaction()
            .context("failed to start transaction")?;

        insert_row_order(&tx, &model.rows)?;
        let rendered: Vec<(usize, usize, String)> = model
            .rows
            .iter()
            .enumerate()
            .filter_map(|(pos, &row_idx)| data.get(row_idx).map(|record| (pos, record)))
            .flat_map(move |(pos, record)| {
                columns.iter().enumerate().filter_map(move |(col_idx, column)| {
                    column
                        .value(record)
                        .map(|value| (pos, col_idx, value.to_string()))
                })
            })
            .collect();
        insert_cells(
            &tx,
            rendered
                .iter()
                .map(|(pos, col_idx, value)| (*pos, *col_idx, value.as_str())),
        )?;
        tx.commit().context("failed to commit filter rows")?;

        Ok(RowModel {
            rows: query_matching_rows(&self.conn, needle)?,
        })
    }

    fn try_sort<T: Record>(
        &self,
        data: &[T],
        model: &RowModel,
        sorting: &[SortDescriptor],
    ) -> Result<RowModel> {
        clear_rows(&self.conn)?;
        let tx = self
            .conn
            .unchecked_transaction()
            .context("failed to start transaction")?;

        insert_row_order(&tx, &model.rows)?;
        let keys = model
            .rows
            .iter()
            .enumerate()
            .filter_map(|(pos, &row_idx)| data.get(row_idx).map(|record| (pos, record)))
            .flat_map(move |(pos, record)| {
                sorting.iter().enumerate().filter_map(move |(key_idx, sort)| {
                    record
                        .field(&sort.field_id)
                        .map(|value| (pos, key_idx, to_sql_value(&value)))
                })
            });
        insert_sort_cells(&tx, keys)?;
        tx.commit().context("failed to commit sort keys")?;

        Ok(RowModel {
            rows: query_sorted_rows(&self.conn, sorting)?,
        })
    }
}

impl<T: Record> RowModelEngine<T> for SqliteEngine {
    fn filtered_row_model(
        &self,
        data: &[T],
        model: RowModel,
        columns: &[ColumnDef],
        global_filter: &str,
    ) -> RowModel {
        let needle = global_filter.trim();
        if needle.is_empty() || model.is_empty() {
            return model;
        }

        match self.try_filter(data, &model, columns, needle) {
            Ok(filtered) => filtered,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "sqlite filter failed, rows left unfiltered");
                model
            }
        }
    }

    fn sorted_row_model(
        &self,
        data: &[T],
        model: RowModel,
        sorting: &[SortDescriptor],
    ) -> RowModel {
        if sorting.is_empty() || model.is_empty() {
            return model;
        }

        match self.try_sort(data, &model, sorting) {
            Ok(sorted) => sorted,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "sqlite sort failed, rows left in input order");
                model
            }
        }
    }
}

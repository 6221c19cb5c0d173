use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::domain::entities::record::Record;
use crate::domain::error::TableError;
use crate::infra::export::csv::write_csv;
use crate::usecase::services::table_view::TableViewModel;

/// Writes every filtered and sorted row, across all pages, using the visible
/// columns and their rendered cell text.
pub fn export_csv<T, W>(view: &TableViewModel<T>, writer: W) -> Result<usize, TableError>
where
    T: Record + Clone,
    W: Write,
{
    let columns = view.visible_columns();
    let headers: Vec<String> = columns.iter().map(|column| column.header.clone()).collect();
    let rows = view.rows().into_iter().map(|record| {
        columns
            .iter()
            .map(|column| column.render(record))
            .collect::<Vec<_>>()
    });

    write_csv(writer, &headers, rows)
}

pub fn export_csv_to_path<T>(view: &TableViewModel<T>, path: &Path) -> Result<usize, TableError>
where
    T: Record + Clone,
{
    let file = File::create(path)?;
    let row_count = export_csv(view, file)?;
    info!(path = %path.display(), rows = row_count, "exported table view");
    Ok(row_count)
}

use std::io::Write;

use crate::domain::error::TableError;

/// Writes a header record followed by `rows`. Returns the number of data rows.
pub fn write_csv<W, I>(writer: W, headers: &[String], rows: I) -> Result<usize, TableError>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(headers)?;

    let mut row_count = 0_usize;
    for row in rows {
        writer.write_record(&row)?;
        row_count += 1;
    }
    writer.flush()?;

    Ok(row_count)
}

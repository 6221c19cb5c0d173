use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("unknown sort direction: {0:?} (expected \"asc\" or \"desc\")")]
    UnknownSortDirection(String),
    #[error("sort field is empty")]
    EmptySortField,
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode csv: {0}")]
    Csv(#[from] csv::Error),
}

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entities::record::{CellValue, Record};
use crate::domain::error::TableError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn is_descending(self) -> bool {
        matches!(self, SortDirection::Desc)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = TableError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(TableError::UnknownSortDirection(other.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub field_id: String,
    pub descending: bool,
}

impl SortDescriptor {
    pub fn new(field_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field_id: field_id.into(),
            descending: direction.is_descending(),
        }
    }

    pub fn direction(&self) -> SortDirection {
        if self.descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Ordered sort keys, most significant first.
pub type SortingState = Vec<SortDescriptor>;

/// Parses a URL-style sort string such as `"-joined,name"`.
///
/// A leading `-` sorts that field descending. Blank segments are skipped.
pub fn parse_sorting(value: &str) -> Result<SortingState, TableError> {
    let mut sorting = SortingState::new();
    for segment in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (field_id, direction) = match segment.strip_prefix('-') {
            Some(rest) => (rest.trim(), SortDirection::Desc),
            None => (segment, SortDirection::Asc),
        };
        if field_id.is_empty() {
            return Err(TableError::EmptySortField);
        }
        sorting.push(SortDescriptor::new(field_id, direction));
    }
    Ok(sorting)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl PaginationState {
    /// A page size of zero is treated as one.
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size.max(1))
    }

    /// The page index clamped into `0..page_count`.
    pub fn clamped(&self, row_count: usize) -> Self {
        let last_page = self.page_count(row_count).saturating_sub(1);
        Self::new(self.page_index.min(last_page), self.page_size)
    }

    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size.max(1))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub type CellRenderer = Arc<dyn Fn(Option<&CellValue>) -> String + Send + Sync>;

/// Describes one column: which field it reads and how its cells render.
#[derive(Clone)]
pub struct ColumnDef {
    pub accessor_key: String,
    pub header: String,
    pub sortable: bool,
    renderer: Option<CellRenderer>,
}

impl ColumnDef {
    pub fn new(accessor_key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            accessor_key: accessor_key.into(),
            header: header.into(),
            sortable: true,
            renderer: None,
        }
    }

    pub fn with_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(Option<&CellValue>) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn value<T: Record>(&self, record: &T) -> Option<CellValue> {
        record.field(&self.accessor_key)
    }

    pub fn render<T: Record>(&self, record: &T) -> String {
        let value = self.value(record);
        match &self.renderer {
            Some(renderer) => renderer(value.as_ref()),
            None => value.map(|value| value.to_string()).unwrap_or_default(),
        }
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("accessor_key", &self.accessor_key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

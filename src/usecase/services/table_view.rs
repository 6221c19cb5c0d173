use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::options::TableOptions;
use crate::domain::entities::record::Record;
use crate::domain::entities::table::{
    ColumnDef, PaginationState, SelectOption, SortDescriptor, SortDirection, SortingState,
};
use crate::infra::memory::engine::MemoryEngine;
use crate::usecase::ports::row_model::{RowModel, RowModelEngine};
use crate::usecase::services::memo::{ByAddress, Memo};

type FilterKey<T> = (ByAddress<[T]>, String, String);
type OptionsKey<T> = (ByAddress<[T]>, String);
type RowsKey<T> = (ByAddress<[T]>, String, SortingState, u64);

pub type RowClickHandler<T> = Box<dyn FnMut(&T)>;

/// Distinct text values of `category_field`, in the order they first appear.
pub fn collect_category_options<T: Record>(data: &[T], category_field: &str) -> Arc<[SelectOption]> {
    let mut seen = HashSet::new();
    data.iter()
        .filter_map(|record| record.category(category_field))
        .filter(|category| seen.insert(category.clone()))
        .map(|category| SelectOption::new(category.clone(), category))
        .collect()
}

/// Rows whose category equals `category_filter` exactly. An empty filter
/// returns `data` itself.
pub fn filter_by_category<T: Record + Clone>(
    data: &Arc<[T]>,
    category_filter: &str,
    category_field: &str,
) -> Arc<[T]> {
    if category_filter.is_empty() {
        return Arc::clone(data);
    }
    data.iter()
        .filter(|record| record.category(category_field).as_deref() == Some(category_filter))
        .cloned()
        .collect()
}

fn run_row_models<T: Record>(
    engine: &dyn RowModelEngine<T>,
    rows: &[T],
    columns: &[ColumnDef],
    global_filter: &str,
    sorting: &[SortDescriptor],
) -> RowModel {
    let core = engine.core_row_model(rows);
    let filtered = engine.filtered_row_model(rows, core, columns, global_filter);
    engine.sorted_row_model(rows, filtered, sorting)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub field_id: String,
    pub label: String,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnToggle {
    pub field_id: String,
    pub label: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView<T> {
    /// Position of the row on the current page.
    pub position: usize,
    pub record: T,
    pub cells: Vec<String>,
}

/// Everything a renderer needs for one frame, detached from the view model.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot<T> {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView<T>>,
    pub columns: Vec<ColumnToggle>,
    pub category_options: Arc<[SelectOption]>,
    pub category_filter: String,
    pub global_filter: String,
    pub pagination: PaginationState,
    pub page_count: usize,
    pub row_count: usize,
}

impl<T> TableSnapshot<T> {
    pub fn can_previous_page(&self) -> bool {
        self.pagination.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.page_index + 1 < self.page_count
    }
}

/// Interactive state of one table view over caller-owned rows.
///
/// Holds the free-text filter, the category filter, sorting, pagination and
/// column visibility. `filtered_data`, `category_options` and the processed
/// row model are memoized on their inputs, so reading them repeatedly or
/// changing unrelated state hands back the same allocations.
pub struct TableViewModel<T: Record> {
    data: Arc<[T]>,
    columns: Vec<ColumnDef>,
    columns_revision: u64,
    engine: Box<dyn RowModelEngine<T>>,
    sorting: SortingState,
    global_filter: String,
    category_filter: String,
    category_field: String,
    pagination: PaginationState,
    column_visibility: BTreeMap<String, bool>,
    filtered_data: Memo<FilterKey<T>, Arc<[T]>>,
    category_options: Memo<OptionsKey<T>, Arc<[SelectOption]>>,
    processed_rows: Memo<RowsKey<T>, Arc<RowModel>>,
    row_click: Option<RowClickHandler<T>>,
}

impl<T: Record + Clone> TableViewModel<T> {
    pub fn new(data: impl Into<Arc<[T]>>, columns: Vec<ColumnDef>, options: TableOptions) -> Self {
        Self::with_engine(data, columns, options, MemoryEngine)
    }

    pub fn with_engine<E>(
        data: impl Into<Arc<[T]>>,
        columns: Vec<ColumnDef>,
        options: TableOptions,
        engine: E,
    ) -> Self
    where
        E: RowModelEngine<T> + 'static,
    {
        let data: Arc<[T]> = data.into();
        let TableOptions {
            initial_filter,
            initial_category,
            category_field,
            initial_page_size,
            initial_sorting,
        } = options;
        let engine: Box<dyn RowModelEngine<T>> = Box::new(engine);

        let category_options = Memo::new(
            (ByAddress(Arc::clone(&data)), category_field.clone()),
            |(data, field)| collect_category_options(&data.0, field),
        );
        let filtered_data = Memo::new(
            (
                ByAddress(Arc::clone(&data)),
                initial_category.clone(),
                category_field.clone(),
            ),
            |(data, filter, field)| filter_by_category(&data.0, filter, field),
        );
        let processed_rows = Memo::new(
            (
                ByAddress(Arc::clone(filtered_data.value())),
                initial_filter.clone(),
                initial_sorting.clone(),
                0,
            ),
            |(rows, filter, sorting, _)| {
                Arc::new(run_row_models(engine.as_ref(), &rows.0, &columns, filter, sorting))
            },
        );

        Self {
            data,
            columns,
            columns_revision: 0,
            engine,
            sorting: initial_sorting,
            global_filter: initial_filter,
            category_filter: initial_category,
            category_field,
            pagination: PaginationState::new(0, initial_page_size),
            column_visibility: BTreeMap::new(),
            filtered_data,
            category_options,
            processed_rows,
            row_click: None,
        }
    }

    fn refresh(&mut self) {
        let data = ByAddress(Arc::clone(&self.data));

        let options_key = (data.clone(), self.category_field.clone());
        if self
            .category_options
            .update(options_key, |(data, field)| collect_category_options(&data.0, field))
        {
            debug!(field = %self.category_field, "category options recomputed");
        }

        let filter_key = (
            data,
            self.category_filter.clone(),
            self.category_field.clone(),
        );
        if self
            .filtered_data
            .update(filter_key, |(data, filter, field)| filter_by_category(&data.0, filter, field))
        {
            debug!(category = %self.category_filter, "filtered data recomputed");
        }

        let rows_key = (
            ByAddress(Arc::clone(self.filtered_data.value())),
            self.global_filter.clone(),
            self.sorting.clone(),
            self.columns_revision,
        );
        let engine = self.engine.as_ref();
        let columns = &self.columns;
        if self
            .processed_rows
            .update(rows_key, |(rows, filter, sorting, _)| {
                Arc::new(run_row_models(engine, &rows.0, columns, filter, sorting))
            })
        {
            debug!(rows = self.processed_rows.value().len(), "row model recomputed");
        }
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    pub fn data(&self) -> &Arc<[T]> {
        &self.data
    }

    /// Replaces the rows. Passing the same allocation again is a no-op.
    pub fn set_data(&mut self, data: impl Into<Arc<[T]>>) {
        let data: Arc<[T]> = data.into();
        if Arc::ptr_eq(&self.data, &data) {
            return;
        }
        debug!(rows = data.len(), "table data replaced");
        self.data = data;
        self.pagination.page_index = 0;
        self.refresh();
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: Vec<ColumnDef>) {
        self.columns = columns;
        self.columns_revision += 1;
        self.refresh();
    }

    pub fn category_field(&self) -> &str {
        &self.category_field
    }

    pub fn set_category_field(&mut self, field: impl Into<String>) {
        let field = field.into();
        if self.category_field == field {
            return;
        }
        self.category_field = field;
        self.pagination.page_index = 0;
        self.refresh();
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.global_filter == text {
            return;
        }
        debug!(filter = %text, "global filter changed");
        self.global_filter = text;
        self.pagination.page_index = 0;
        self.refresh();
    }

    pub fn category_filter(&self) -> &str {
        &self.category_filter
    }

    /// An empty value clears the category filter.
    pub fn set_category_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.category_filter == value {
            return;
        }
        debug!(category = %value, "category filter changed");
        self.category_filter = value;
        self.pagination.page_index = 0;
        self.refresh();
    }

    pub fn filtered_data(&self) -> Arc<[T]> {
        Arc::clone(self.filtered_data.value())
    }

    pub fn category_options(&self) -> Arc<[SelectOption]> {
        Arc::clone(self.category_options.value())
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sorting(&self) -> &[SortDescriptor] {
        &self.sorting
    }

    pub fn set_sorting(&mut self, sorting: SortingState) {
        if self.sorting == sorting {
            return;
        }
        debug!(?sorting, "sorting changed");
        self.sorting = sorting;
        self.pagination.page_index = 0;
        self.refresh();
    }

    /// Sorts by a single field, replacing any previous sort keys.
    pub fn sort_by_field(&mut self, field_id: impl Into<String>, direction: SortDirection) {
        self.set_sorting(vec![SortDescriptor::new(field_id, direction)]);
    }

    /// Cycles a column through ascending, descending and unsorted.
    /// Columns that are unknown or not sortable are ignored.
    pub fn toggle_sort(&mut self, field_id: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|column| column.accessor_key == field_id && column.sortable);
        if !sortable {
            return;
        }

        let current = self
            .sorting
            .first()
            .filter(|sort| sort.field_id == field_id)
            .map(SortDescriptor::direction);
        match current {
            None => self.sort_by_field(field_id, SortDirection::Asc),
            Some(SortDirection::Asc) => self.sort_by_field(field_id, SortDirection::Desc),
            Some(SortDirection::Desc) => self.set_sorting(SortingState::new()),
        }
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Number of rows left after the category filter and the global filter.
    pub fn row_count(&self) -> usize {
        self.processed_rows.value().len()
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination.clamped(self.row_count())
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.row_count())
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination().page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination().page_index + 1 < self.page_count()
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        self.pagination = PaginationState::new(page_index, self.pagination.page_size)
            .clamped(self.row_count());
    }

    /// Changes the page size and moves to the page that holds the current top row.
    pub fn set_page_size(&mut self, page_size: usize) {
        let top_row = self.pagination().offset();
        let page_size = page_size.max(1);
        self.pagination = PaginationState::new(top_row / page_size, page_size);
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.set_page_index(self.pagination().page_index + 1);
        }
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.set_page_index(self.pagination().page_index - 1);
        }
    }

    pub fn first_page(&mut self) {
        self.set_page_index(0);
    }

    pub fn last_page(&mut self) {
        self.set_page_index(self.page_count().saturating_sub(1));
    }

    /// Every row after filtering and sorting, across all pages.
    pub fn rows(&self) -> Vec<&T> {
        let filtered = self.filtered_data.value();
        self.processed_rows.value().resolve(filtered).collect()
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<&T> {
        let page = self
            .engine
            .paginated_row_model(self.processed_rows.value(), self.pagination());
        let filtered = self.filtered_data.value();
        page.rows.iter().filter_map(|&idx| filtered.get(idx)).collect()
    }

    // -------------------------------------------------------------------------
    // Column visibility
    // -------------------------------------------------------------------------

    pub fn is_column_visible(&self, field_id: &str) -> bool {
        self.column_visibility.get(field_id).copied().unwrap_or(true)
    }

    pub fn set_column_visible(&mut self, field_id: impl Into<String>, visible: bool) {
        self.column_visibility.insert(field_id.into(), visible);
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        self.columns
            .iter()
            .filter(|column| self.is_column_visible(&column.accessor_key))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Row interaction
    // -------------------------------------------------------------------------

    /// The row at `position` on the current page.
    pub fn row_at(&self, position: usize) -> Option<T> {
        self.page_rows().get(position).map(|row| (*row).clone())
    }

    /// Handler for [`click_row`](Self::click_row), for callers that drive the
    /// view model without a renderer. `DataTable` resolves clicks with
    /// [`row_at`](Self::row_at) and calls its `on_row_click` prop instead, so
    /// the handler never runs while the table signal is borrowed.
    pub fn set_row_click_handler(&mut self, handler: impl FnMut(&T) + 'static) {
        self.row_click = Some(Box::new(handler));
    }

    /// Dispatches the row at `position` on the current page to the click
    /// handler. Returns whether a row was dispatched.
    pub fn click_row(&mut self, position: usize) -> bool {
        let Some(row) = self.row_at(position) else {
            return false;
        };
        match self.row_click.as_mut() {
            Some(handler) => {
                handler(&row);
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> TableSnapshot<T> {
        let visible_columns = self.visible_columns();

        let headers = visible_columns
            .iter()
            .map(|column| HeaderView {
                field_id: column.accessor_key.clone(),
                label: column.header.clone(),
                sortable: column.sortable,
                sort: self
                    .sorting
                    .iter()
                    .find(|sort| sort.field_id == column.accessor_key)
                    .map(SortDescriptor::direction),
            })
            .collect();

        let rows = self
            .page_rows()
            .into_iter()
            .enumerate()
            .map(|(position, record)| RowView {
                position,
                cells: visible_columns
                    .iter()
                    .map(|column| column.render(record))
                    .collect(),
                record: record.clone(),
            })
            .collect();

        let columns = self
            .columns
            .iter()
            .map(|column| ColumnToggle {
                field_id: column.accessor_key.clone(),
                label: column.header.clone(),
                visible: self.is_column_visible(&column.accessor_key),
            })
            .collect();

        TableSnapshot {
            headers,
            rows,
            columns,
            category_options: self.category_options(),
            category_filter: self.category_filter.clone(),
            global_filter: self.global_filter.clone(),
            pagination: self.pagination(),
            page_count: self.page_count(),
            row_count: self.row_count(),
        }
    }
}

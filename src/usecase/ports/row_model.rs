use crate::domain::entities::record::Record;
use crate::domain::entities::table::{ColumnDef, PaginationState, SortDescriptor};

/// An ordered selection of rows, as indices into the slice it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowModel {
    pub rows: Vec<usize>,
}

impl RowModel {
    pub fn identity(len: usize) -> Self {
        Self {
            rows: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves the indices against `data`, skipping any that are out of range.
    pub fn resolve<'a, T>(&'a self, data: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        self.rows.iter().filter_map(move |&idx| data.get(idx))
    }
}

/// The row-model capability a table view is driven by.
///
/// Every method is a pure function of its inputs. Implementations must not
/// panic on indices, field ids or filters that do not match the data.
pub trait RowModelEngine<T: Record> {
    fn core_row_model(&self, data: &[T]) -> RowModel {
        RowModel::identity(data.len())
    }

    fn filtered_row_model(
        &self,
        data: &[T],
        model: RowModel,
        columns: &[ColumnDef],
        global_filter: &str,
    ) -> RowModel;

    fn sorted_row_model(&self, data: &[T], model: RowModel, sorting: &[SortDescriptor])
        -> RowModel;

    fn paginated_row_model(&self, model: &RowModel, pagination: PaginationState) -> RowModel {
        let rows = model
            .rows
            .iter()
            .skip(pagination.offset())
            .take(pagination.page_size.max(1))
            .copied()
            .collect();
        RowModel { rows }
    }
}

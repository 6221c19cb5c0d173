use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::options::TableOptions;
use crate::domain::entities::record::Record;
use crate::domain::entities::table::ColumnDef;
use crate::usecase::services::table_view::TableViewModel;

/// Creates a table view for the lifetime of the calling component.
///
/// `init` runs once, on the first render. Later data changes go through
/// `table.write().set_data(..)`.
pub fn use_table_view<T, F>(init: F) -> Signal<TableViewModel<T>>
where
    T: Record + Clone + 'static,
    F: FnOnce() -> (Arc<[T]>, Vec<ColumnDef>, TableOptions),
{
    use_signal(move || {
        let (data, columns, options) = init();
        TableViewModel::new(data, columns, options)
    })
}

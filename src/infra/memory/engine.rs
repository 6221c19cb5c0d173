use std::cmp::Ordering;

use crate::domain::entities::record::{compare_optional, CellValue, Record};
use crate::domain::entities::table::{ColumnDef, SortDescriptor};
use crate::usecase::ports::row_model::{RowModel, RowModelEngine};

/// Filters and sorts rows in process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryEngine;

fn contains_ignore_case(value: &CellValue, needle_lower: &str) -> bool {
    value.to_string().to_lowercase().contains(needle_lower)
}

impl<T: Record> RowModelEngine<T> for MemoryEngine {
    fn filtered_row_model(
        &self,
        data: &[T],
        model: RowModel,
        columns: &[ColumnDef],
        global_filter: &str,
    ) -> RowModel {
        let needle = global_filter.trim();
        if needle.is_empty() {
            return model;
        }
        let needle_lower = needle.to_lowercase();

        let rows = model
            .rows
            .into_iter()
            .filter(|&idx| {
                data.get(idx).is_some_and(|record| {
                    columns.iter().any(|column| {
                        column
                            .value(record)
                            .is_some_and(|value| contains_ignore_case(&value, &needle_lower))
                    })
                })
            })
            .collect();
        RowModel { rows }
    }

    fn sorted_row_model(
        &self,
        data: &[T],
        model: RowModel,
        sorting: &[SortDescriptor],
    ) -> RowModel {
        if sorting.is_empty() {
            return model;
        }

        // Sort keys are read once per row rather than once per comparison.
        let mut keyed: Vec<(usize, Vec<Option<CellValue>>)> = model
            .rows
            .into_iter()
            .map(|idx| {
                let keys = sorting
                    .iter()
                    .map(|sort| data.get(idx).and_then(|record| record.field(&sort.field_id)))
                    .collect();
                (idx, keys)
            })
            .collect();

        keyed.sort_by(|(_, a), (_, b)| {
            sorting
                .iter()
                .zip(a.iter().zip(b.iter()))
                .map(|(sort, (a, b))| {
                    let ordering = compare_optional(a.as_ref(), b.as_ref());
                    if sort.descending {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        RowModel {
            rows: keyed.into_iter().map(|(idx, _)| idx).collect(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::entities::table::SortingState;

pub const DEFAULT_CATEGORY_FIELD: &str = "category";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 20, 50, 100];

/// Initial state of a table view. Every field is optional when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub initial_filter: String,
    pub initial_category: String,
    pub category_field: String,
    pub initial_page_size: usize,
    pub initial_sorting: SortingState,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            initial_filter: String::new(),
            initial_category: String::new(),
            category_field: DEFAULT_CATEGORY_FIELD.to_string(),
            initial_page_size: DEFAULT_PAGE_SIZE,
            initial_sorting: SortingState::new(),
        }
    }
}

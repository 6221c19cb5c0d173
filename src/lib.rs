//! Table view widget for the union admin pages: free-text search, a category
//! filter, sorting, pagination and row clicks over an already-fetched list of
//! records.

pub mod app;
pub mod members;

pub mod domain {
    pub mod error;

    pub mod entities {
        pub mod options;
        pub mod record;
        pub mod table;
    }
}

pub mod usecase {
    pub mod ports {
        pub mod row_model;
    }

    pub mod services {
        pub mod export_service;
        pub mod memo;
        pub mod table_view;
    }
}

pub mod infra {
    pub mod export {
        pub mod csv;
    }

    pub mod memory {
        pub mod engine;
    }

    pub mod sqlite {
        pub mod engine;
        pub mod queries;
        pub mod schema;
    }
}

pub mod ui {
    pub mod components {
        pub mod data_table;
    }

    pub mod state {
        pub mod table_state;
    }
}

pub mod platform {
    pub mod desktop {
        pub mod paths;
    }
}

pub use domain::entities::options::TableOptions;
pub use domain::entities::record::{CellValue, Record};
pub use domain::entities::table::{ColumnDef, SelectOption, SortDescriptor, SortDirection};
pub use domain::error::TableError;
pub use infra::memory::engine::MemoryEngine;
pub use infra::sqlite::engine::SqliteEngine;
pub use usecase::ports::row_model::{RowModel, RowModelEngine};
pub use usecase::services::table_view::{TableSnapshot, TableViewModel};

#[cfg(test)]
mod tests;

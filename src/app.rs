use std::sync::Arc;

use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::{info, warn};

use crate::domain::entities::options::TableOptions;
use crate::domain::entities::table::{SortDescriptor, SortDirection};
use crate::members::{member_columns, sample_members, Member};
use crate::ui::components::data_table::DataTable;
use crate::ui::state::table_state::use_table_view;
use crate::usecase::services::export_service::export_csv_to_path;

pub const MEMBER_CATEGORY_FIELD: &str = "post";

pub fn root_container_style() -> &'static str {
    "height: 100vh; display: flex; flex-direction: column; overflow: hidden; padding: 0 12px 12px; box-sizing: border-box; gap: 8px;"
}

pub fn member_table_options() -> TableOptions {
    TableOptions {
        category_field: MEMBER_CATEGORY_FIELD.to_string(),
        initial_sorting: vec![SortDescriptor::new("name", SortDirection::Asc)],
        ..TableOptions::default()
    }
}

#[component]
pub fn App() -> Element {
    let table = use_table_view(|| {
        let members: Arc<[Member]> = Arc::from(sample_members());
        (members, member_columns(), member_table_options())
    });
    let mut status = use_signal(|| "Ready".to_string());
    let status_text = status();

    rsx! {
        div {
            style: "{root_container_style()}",
            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                h2 { style: "margin: 0;", "Members" }
                button {
                    onclick: move |_| {
                        let Some(path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_file_name("members.csv")
                            .save_file() else {
                            status.set("Export cancelled".to_string());
                            return;
                        };

                        let view = table.read();
                        match export_csv_to_path(&*view, &path) {
                            Ok(rows) => {
                                status.set(format!("Exported {rows} rows to {}", path.display()));
                            }
                            Err(err) => {
                                warn!(error = %err, "member export failed");
                                status.set(format!("Export failed: {err}"));
                            }
                        }
                    },
                    "Export CSV"
                }
            }

            DataTable {
                table: table,
                on_row_click: move |member: Member| {
                    info!(id = member.id, "member selected");
                    status.set(format!("Selected {} <{}>", member.name, member.email));
                },
                search_placeholder: "Search members".to_string(),
                category_label: "Post".to_string(),
            }

            p { style: "margin: 0; color: #555;", "{status_text}" }
        }
    }
}

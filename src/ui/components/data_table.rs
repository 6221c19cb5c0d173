use dioxus::prelude::*;

use crate::domain::entities::options::PAGE_SIZE_CHOICES;
use crate::domain::entities::record::Record;
use crate::domain::entities::table::{SelectOption, SortDirection};
use crate::usecase::services::table_view::{ColumnToggle, TableViewModel};

pub const ALL_CATEGORIES_VALUE: &str = "__all__";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownId {
    Category,
    Columns,
    PageSize,
}

pub fn dropdown_label(options: &[SelectOption], selected: Option<&str>) -> String {
    selected
        .and_then(|value| options.iter().find(|opt| opt.value == value))
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| "(none)".to_string())
}

/// Category choices with a leading "all" entry that clears the filter.
pub fn category_choices(options: &[SelectOption], all_label: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL_CATEGORIES_VALUE, all_label))
        .chain(options.iter().cloned())
        .collect()
}

pub fn category_filter_from_choice(value: String) -> String {
    if value == ALL_CATEGORIES_VALUE {
        String::new()
    } else {
        value
    }
}

pub fn sort_marker(sort: Option<SortDirection>) -> &'static str {
    match sort {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => "",
    }
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; border-radius: 6px;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 1; background: #f6f6f6; border: 1px solid #bbb; padding: 6px; text-align: left; white-space: nowrap;"
}

pub fn table_body_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 4px 6px;"
}

#[component]
pub fn DropdownSelect(
    id: DropdownId,
    label: String,
    options: Vec<SelectOption>,
    selected: Option<String>,
    mut open_dropdown: Signal<Option<DropdownId>>,
    mut dropdown_pos: Signal<Option<(f64, f64)>>,
    on_select: EventHandler<String>,
) -> Element {
    let is_open = open_dropdown() == Some(id);
    let selected_label = dropdown_label(&options, selected.as_deref());
    let (left, top) = dropdown_pos().unwrap_or((0.0, 0.0));

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                onclick: move |event| {
                    event.stop_propagation();
                    if open_dropdown() == Some(id) {
                        open_dropdown.set(None);
                        return;
                    }
                    let point = event.client_coordinates();
                    dropdown_pos.set(Some((point.x, point.y + 24.0)));
                    open_dropdown.set(Some(id));
                },
                "{selected_label}"
            }
        }

        if is_open {
            div {
                style: "position: fixed; left: {left}px; top: {top}px; min-width: 200px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                onclick: move |event| event.stop_propagation(),
                {options.iter().map(|opt| {
                    let value = opt.value.clone();
                    let label = opt.label.clone();
                    let is_selected = selected.as_deref() == Some(value.as_str());
                    let background = if is_selected { "#eef4ff" } else { "transparent" };
                    rsx!(
                        div {
                            style: "padding: 8px 10px; cursor: pointer; background: {background};",
                            onclick: move |_| {
                                on_select.call(value.clone());
                                open_dropdown.set(None);
                            },
                            "{label}"
                        }
                    )
                })}
            }
        }
    }
}

#[component]
pub fn ColumnVisibilityDropdown(
    id: DropdownId,
    label: String,
    columns: Vec<ColumnToggle>,
    mut open_dropdown: Signal<Option<DropdownId>>,
    mut dropdown_pos: Signal<Option<(f64, f64)>>,
    on_toggle: EventHandler<(String, bool)>,
) -> Element {
    let is_open = open_dropdown() == Some(id);
    let (left, top) = dropdown_pos().unwrap_or((0.0, 0.0));

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                onclick: move |event| {
                    event.stop_propagation();
                    if open_dropdown() == Some(id) {
                        open_dropdown.set(None);
                        return;
                    }
                    let point = event.client_coordinates();
                    dropdown_pos.set(Some((point.x, point.y + 24.0)));
                    open_dropdown.set(Some(id));
                },
                "{label}"
            }
        }

        if is_open {
            div {
                style: "position: fixed; left: {left}px; top: {top}px; min-width: 220px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;",
                onclick: move |event| event.stop_propagation(),
                {columns.iter().map(|column| {
                    let checked = column.visible;
                    let field_id = column.field_id.clone();
                    let header = column.label.clone();
                    rsx!(
                        label {
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: move |_| {
                                    on_toggle.call((field_id.clone(), !checked));
                                }
                            }
                            span { "{header}" }
                        }
                    )
                })}
            }
        }
    }
}

/// Search box, category dropdown, column toggles, sortable headers, clickable
/// rows and pagination over a [`TableViewModel`].
#[component]
pub fn DataTable<T: Record + Clone + PartialEq + 'static>(
    mut table: Signal<TableViewModel<T>>,
    on_row_click: EventHandler<T>,
    search_placeholder: Option<String>,
    category_label: Option<String>,
) -> Element {
    let mut open_dropdown = use_signal(|| None::<DropdownId>);
    let dropdown_pos = use_signal(|| None::<(f64, f64)>);

    let snapshot = table.read().snapshot();
    let placeholder = search_placeholder.unwrap_or_else(|| "Search".to_string());
    let category_label = category_label.unwrap_or_else(|| "Category".to_string());
    let category_options = category_choices(&snapshot.category_options, "All");
    let selected_category = if snapshot.category_filter.is_empty() {
        ALL_CATEGORIES_VALUE.to_string()
    } else {
        snapshot.category_filter.clone()
    };
    let has_categories = !snapshot.category_options.is_empty();
    let page_size_options: Vec<SelectOption> = PAGE_SIZE_CHOICES
        .iter()
        .map(|size| SelectOption::new(size.to_string(), format!("{size} / page")))
        .collect();
    let page_size = snapshot.pagination.page_size.to_string();
    let page_number = if snapshot.page_count == 0 {
        0
    } else {
        snapshot.pagination.page_index + 1
    };
    let page_count = snapshot.page_count;
    let row_count = snapshot.row_count;
    let can_previous = snapshot.can_previous_page();
    let can_next = snapshot.can_next_page();
    let column_span = snapshot.headers.len().max(1);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px; min-height: 0; flex: 1;",
            onclick: move |_| open_dropdown.set(None),
            div {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                input {
                    style: "border: 1px solid #bbb; border-radius: 6px; padding: 4px 8px; min-width: 220px;",
                    placeholder: "{placeholder}",
                    value: "{snapshot.global_filter}",
                    oninput: move |event| table.write().set_global_filter(event.value()),
                }
                if has_categories {
                    DropdownSelect {
                        id: DropdownId::Category,
                        label: category_label.clone(),
                        options: category_options.clone(),
                        selected: Some(selected_category.clone()),
                        open_dropdown: open_dropdown,
                        dropdown_pos: dropdown_pos,
                        on_select: move |value: String| {
                            table.write().set_category_filter(category_filter_from_choice(value));
                        }
                    }
                }
                ColumnVisibilityDropdown {
                    id: DropdownId::Columns,
                    label: "Columns".to_string(),
                    columns: snapshot.columns.clone(),
                    open_dropdown: open_dropdown,
                    dropdown_pos: dropdown_pos,
                    on_toggle: move |(field_id, visible): (String, bool)| {
                        table.write().set_column_visible(field_id, visible);
                    }
                }
            }

            div {
                style: "{table_container_style()}",
                table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                    thead {
                        tr {
                            {snapshot.headers.iter().map(|header| {
                                let field_id = header.field_id.clone();
                                let cursor = if header.sortable { "cursor: pointer;" } else { "" };
                                let marker = sort_marker(header.sort);
                                let label = header.label.clone();
                                rsx!(
                                    th {
                                        style: "{table_header_cell_style()} {cursor}",
                                        onclick: move |_| table.write().toggle_sort(&field_id),
                                        "{label}{marker}"
                                    }
                                )
                            })}
                        }
                    }
                    tbody {
                        if snapshot.rows.is_empty() {
                            tr {
                                td {
                                    colspan: "{column_span}",
                                    style: "{table_body_cell_style()} text-align: center; color: #888;",
                                    "No rows"
                                }
                            }
                        }
                        {snapshot.rows.iter().map(|row| {
                            let position = row.position;
                            let cells = row.cells.clone();
                            rsx!(
                                tr {
                                    key: "{position}",
                                    style: "cursor: pointer;",
                                    onclick: move |_| {
                                        let row = table.read().row_at(position);
                                        if let Some(row) = row {
                                            on_row_click.call(row);
                                        }
                                    },
                                    for cell in cells.iter() {
                                        td { style: "{table_body_cell_style()}", "{cell}" }
                                    }
                                }
                            )
                        })}
                    }
                }
            }

            div {
                style: "display: flex; gap: 8px; align-items: center; flex-wrap: wrap;",
                button {
                    disabled: !can_previous,
                    onclick: move |_| table.write().first_page(),
                    "«"
                }
                button {
                    disabled: !can_previous,
                    onclick: move |_| table.write().previous_page(),
                    "‹"
                }
                span { "Page {page_number} of {page_count} ({row_count} rows)" }
                button {
                    disabled: !can_next,
                    onclick: move |_| table.write().next_page(),
                    "›"
                }
                button {
                    disabled: !can_next,
                    onclick: move |_| table.write().last_page(),
                    "»"
                }
                DropdownSelect {
                    id: DropdownId::PageSize,
                    label: "Rows".to_string(),
                    options: page_size_options.clone(),
                    selected: Some(page_size.clone()),
                    open_dropdown: open_dropdown,
                    dropdown_pos: dropdown_pos,
                    on_select: move |value: String| {
                        if let Ok(size) = value.parse::<usize>() {
                            table.write().set_page_size(size);
                        }
                    }
                }
            }
        }
    }
}

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;

use crate::app::{member_table_options, root_container_style};
use crate::domain::entities::options::{TableOptions, DEFAULT_CATEGORY_FIELD, DEFAULT_PAGE_SIZE};
use crate::domain::entities::record::{CellValue, Record};
use crate::domain::entities::table::{
    parse_sorting, ColumnDef, PaginationState, SelectOption, SortDescriptor, SortDirection,
};
use crate::domain::error::TableError;
use crate::infra::sqlite::engine::SqliteEngine;
use crate::infra::sqlite::queries::like_pattern;
use crate::members::{member_columns, sample_members, Member};
use crate::ui::components::data_table::{
    category_choices, category_filter_from_choice, dropdown_label, sort_marker, table_container_style,
    table_header_cell_style, ALL_CATEGORIES_VALUE,
};
use crate::usecase::services::export_service::export_csv;
use crate::usecase::services::memo::Memo;
use crate::usecase::services::table_view::TableViewModel;

type Row = BTreeMap<String, CellValue>;

fn row(title: &str, category: Option<&str>) -> Row {
    let mut record = Row::new();
    record.insert("title".to_string(), CellValue::from(title));
    if let Some(category) = category {
        record.insert("category".to_string(), CellValue::from(category));
    }
    record
}

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("title", "Title"),
        ColumnDef::new("category", "Category"),
    ]
}

fn view(rows: Vec<Row>) -> TableViewModel<Row> {
    TableViewModel::new(rows, columns(), TableOptions::default())
}

fn titles(rows: Vec<&Row>) -> Vec<String> {
    rows.into_iter()
        .map(|record| {
            record
                .field("title")
                .map(|value| value.to_string())
                .unwrap_or_default()
        })
        .collect()
}

fn numbered_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|idx| row(&format!("row {idx:02}"), None))
        .collect()
}

fn member_view() -> TableViewModel<Member> {
    TableViewModel::new(sample_members(), member_columns(), member_table_options())
}

#[test]
fn category_options_deduplicate_in_first_seen_order() {
    let view = view(vec![
        row("one", Some("A")),
        row("two", Some("B")),
        row("three", Some("A")),
    ]);

    assert_eq!(
        view.category_options().to_vec(),
        vec![SelectOption::new("A", "A"), SelectOption::new("B", "B")]
    );
}

#[test]
fn category_filter_keeps_exact_matches() {
    let mut view = view(vec![
        row("one", Some("A")),
        row("two", Some("B")),
        row("three", Some("A")),
    ]);

    view.set_category_filter("A");

    let filtered = view.filtered_data();
    assert_eq!(filtered.len(), 2, "two rows carry category A");
    assert!(filtered
        .iter()
        .all(|record| record.category("category").as_deref() == Some("A")));
}

#[test]
fn empty_data_produces_empty_results() {
    let mut view = view(Vec::new());
    view.set_category_filter("A");
    view.set_global_filter("anything");
    view.sort_by_field("title", SortDirection::Desc);
    view.next_page();
    view.last_page();

    assert!(view.category_options().is_empty());
    assert!(view.filtered_data().is_empty());
    assert!(view.page_rows().is_empty());
    assert_eq!(view.page_count(), 0);
    assert!(!view.click_row(0));

    let snapshot = view.snapshot();
    assert!(snapshot.rows.is_empty());
    assert!(!snapshot.can_previous_page());
    assert!(!snapshot.can_next_page());
}

#[test]
fn rows_without_category_field_are_skipped() {
    let mut view = view(vec![row("tagged", Some("A")), row("untagged", None)]);

    assert_eq!(
        view.category_options().to_vec(),
        vec![SelectOption::new("A", "A")]
    );
    assert_eq!(view.filtered_data().len(), 2, "no filter keeps every row");

    view.set_category_filter("A");
    assert_eq!(titles(view.filtered_data().iter().collect()), vec!["tagged"]);
}

#[test]
fn non_text_category_values_are_ignored() {
    let mut numbered = Row::new();
    numbered.insert("title".to_string(), CellValue::from("numbered"));
    numbered.insert("category".to_string(), CellValue::Integer(3));
    let mut view = view(vec![numbered, row("text", Some("3"))]);

    assert_eq!(
        view.category_options().to_vec(),
        vec![SelectOption::new("3", "3")]
    );

    view.set_category_filter("3");
    assert_eq!(titles(view.filtered_data().iter().collect()), vec!["text"]);
}

#[test]
fn category_matching_is_case_sensitive() {
    let mut view = view(vec![row("upper", Some("Board")), row("lower", Some("board"))]);

    view.set_category_filter("board");

    assert_eq!(titles(view.filtered_data().iter().collect()), vec!["lower"]);
}

#[test]
fn sort_by_field_overwrites_previous_sort() {
    let mut view = view(vec![row("a", None)]);

    view.sort_by_field("title", SortDirection::Asc);
    view.sort_by_field("title", SortDirection::Desc);

    assert_eq!(
        view.sorting(),
        &[SortDescriptor {
            field_id: "title".to_string(),
            descending: true,
        }]
    );
}

#[test]
fn empty_category_filter_returns_the_same_allocation() {
    let view = view(vec![row("one", Some("A")), row("two", Some("B"))]);

    assert!(Arc::ptr_eq(&view.filtered_data(), view.data()));
}

#[test]
fn filtered_data_is_stable_across_unrelated_changes() {
    let mut view = view(vec![
        row("one", Some("A")),
        row("two", Some("B")),
        row("three", Some("A")),
    ]);
    view.set_category_filter("A");
    let before = view.filtered_data();
    let options_before = view.category_options();

    view.set_global_filter("t");
    view.sort_by_field("title", SortDirection::Desc);
    view.set_page_size(1);
    view.set_column_visible("category", false);

    assert!(Arc::ptr_eq(&before, &view.filtered_data()));
    assert!(Arc::ptr_eq(&options_before, &view.category_options()));

    view.set_category_filter("B");
    assert!(!Arc::ptr_eq(&before, &view.filtered_data()));
}

#[test]
fn set_data_with_same_allocation_keeps_derived_values() {
    let data: Arc<[Row]> = Arc::from(vec![row("one", Some("A")), row("two", Some("B"))]);
    let mut view = TableViewModel::new(Arc::clone(&data), columns(), TableOptions::default());
    let options_before = view.category_options();

    view.set_data(Arc::clone(&data));
    assert!(Arc::ptr_eq(&options_before, &view.category_options()));

    view.set_data(vec![row("three", Some("C"))]);
    assert_eq!(
        view.category_options().to_vec(),
        vec![SelectOption::new("C", "C")]
    );
}

#[test]
fn category_field_can_be_switched() {
    let mut view = TableViewModel::new(
        sample_members(),
        member_columns(),
        TableOptions::default(),
    );
    assert!(
        view.category_options().is_empty(),
        "members have no `category` field"
    );

    view.set_category_field("post");

    let labels: Vec<String> = view
        .category_options()
        .iter()
        .map(|option| option.label.clone())
        .collect();
    assert_eq!(labels, vec!["Board", "Treasurer", "Events", "Communications"]);
}

#[test]
fn global_filter_matches_substrings_ignoring_case() {
    let mut view = view(vec![
        row("Spring Ball", Some("Events")),
        row("Autumn party", Some("Events")),
        row("Board meeting", Some("Board")),
    ]);

    view.set_global_filter("BALL");
    assert_eq!(titles(view.rows()), vec!["Spring Ball"]);

    view.set_global_filter("  party ");
    assert_eq!(titles(view.rows()), vec!["Autumn party"]);

    view.set_global_filter("board");
    assert_eq!(titles(view.rows()), vec!["Board meeting"]);

    view.set_global_filter("nothing here");
    assert_eq!(view.row_count(), 0);

    view.set_global_filter("");
    assert_eq!(view.row_count(), 3);
}

#[test]
fn global_filter_applies_after_category_filter() {
    let mut view = member_view();

    view.set_category_filter("Board");
    assert_eq!(view.row_count(), 3);

    view.set_global_filter("maja");
    let names: Vec<String> = view.rows().iter().map(|member| member.name.clone()).collect();
    assert_eq!(names, vec!["Maja Ek"]);
}

#[test]
fn global_filter_searches_hidden_columns() {
    let mut view = view(vec![row("first", Some("Gala")), row("second", Some("Pub"))]);
    view.set_column_visible("category", false);

    view.set_global_filter("gala");

    assert_eq!(titles(view.rows()), vec!["first"]);
    let snapshot = view.snapshot();
    assert_eq!(snapshot.headers.len(), 1);
    assert_eq!(snapshot.rows[0].cells, vec!["first".to_string()]);
}

#[test]
fn sorting_orders_text_ignoring_case() {
    let mut view = view(vec![
        row("banana", None),
        row("Apple", None),
        row("cherry", None),
    ]);

    view.sort_by_field("title", SortDirection::Asc);
    assert_eq!(titles(view.rows()), vec!["Apple", "banana", "cherry"]);

    view.sort_by_field("title", SortDirection::Desc);
    assert_eq!(titles(view.rows()), vec!["cherry", "banana", "Apple"]);
}

fn scored(title: &str, score: Option<CellValue>) -> Row {
    let mut record = row(title, None);
    if let Some(score) = score {
        record.insert("score".to_string(), score);
    }
    record
}

fn scored_rows() -> Vec<Row> {
    vec![
        scored("ten", Some(CellValue::Integer(10))),
        scored("two and a half", Some(CellValue::Float(2.5))),
        scored("missing", None),
        scored("three", Some(CellValue::Integer(3))),
    ]
}

#[test]
fn sorting_puts_missing_values_first_when_ascending() {
    let mut view = view(scored_rows());

    view.sort_by_field("score", SortDirection::Asc);
    assert_eq!(
        titles(view.rows()),
        vec!["missing", "two and a half", "three", "ten"]
    );

    view.sort_by_field("score", SortDirection::Desc);
    assert_eq!(
        titles(view.rows()),
        vec!["ten", "three", "two and a half", "missing"]
    );
}

#[test]
fn multi_key_sorting_breaks_ties_in_order() {
    let mut view = view(vec![
        row("b", Some("A")),
        row("a", Some("B")),
        row("c", Some("A")),
        row("d", Some("B")),
    ]);

    view.set_sorting(parse_sorting("category,-title").expect("sort string should parse"));

    assert_eq!(titles(view.rows()), vec!["c", "b", "d", "a"]);
}

#[test]
fn sorting_is_stable_for_equal_keys() {
    let mut view = view(vec![
        row("1", Some("B")),
        row("2", Some("A")),
        row("3", Some("B")),
        row("4", Some("A")),
    ]);

    view.sort_by_field("category", SortDirection::Asc);

    assert_eq!(titles(view.rows()), vec!["2", "4", "1", "3"]);
}

#[test]
fn sorting_by_unknown_field_keeps_input_order() {
    let mut view = view(vec![row("z", None), row("a", None), row("m", None)]);

    view.sort_by_field("no_such_field", SortDirection::Desc);

    assert_eq!(titles(view.rows()), vec!["z", "a", "m"]);
}

#[test]
fn toggle_sort_cycles_through_directions() {
    let columns = vec![
        ColumnDef::new("title", "Title"),
        ColumnDef::new("category", "Category").sortable(false),
    ];
    let mut view = TableViewModel::new(vec![row("a", Some("A"))], columns, TableOptions::default());

    view.toggle_sort("title");
    assert_eq!(view.sorting(), &[SortDescriptor::new("title", SortDirection::Asc)]);

    view.toggle_sort("title");
    assert_eq!(view.sorting(), &[SortDescriptor::new("title", SortDirection::Desc)]);

    view.toggle_sort("title");
    assert!(view.sorting().is_empty());

    view.toggle_sort("category");
    assert!(view.sorting().is_empty(), "non-sortable column is ignored");

    view.toggle_sort("unknown");
    assert!(view.sorting().is_empty(), "unknown column is ignored");
}

#[test]
fn snapshot_marks_the_sorted_header() {
    let mut view = view(vec![row("a", Some("A"))]);
    view.sort_by_field("title", SortDirection::Desc);

    let snapshot = view.snapshot();

    assert_eq!(snapshot.headers[0].sort, Some(SortDirection::Desc));
    assert_eq!(snapshot.headers[1].sort, None);
    assert_eq!(sort_marker(snapshot.headers[0].sort), " ▼");
    assert_eq!(sort_marker(None), "");
}

#[test]
fn pagination_splits_rows_into_pages() {
    let mut view = view(numbered_rows(25));

    assert_eq!(view.page_count(), 3);
    assert_eq!(view.page_rows().len(), 10);
    assert!(!view.can_previous_page());
    assert!(view.can_next_page());

    view.next_page();
    assert_eq!(titles(view.page_rows())[0], "row 10");

    view.last_page();
    assert_eq!(view.page_rows().len(), 5);
    assert!(!view.can_next_page());

    view.next_page();
    assert_eq!(view.pagination().page_index, 2, "next on the last page is a no-op");

    view.previous_page();
    assert_eq!(view.pagination().page_index, 1);

    view.first_page();
    assert_eq!(view.pagination().page_index, 0);
}

#[test]
fn set_page_index_clamps_to_last_page() {
    let mut view = view(numbered_rows(25));

    view.set_page_index(99);

    assert_eq!(view.pagination().page_index, 2);
    assert_eq!(titles(view.page_rows())[0], "row 20");
}

#[test]
fn set_page_size_keeps_top_row_visible() {
    let mut view = view(numbered_rows(25));
    view.set_page_index(2);

    view.set_page_size(20);
    assert_eq!(view.pagination(), PaginationState::new(1, 20));
    assert_eq!(titles(view.page_rows())[0], "row 20");

    view.set_page_size(0);
    assert_eq!(view.pagination().page_size, 1, "zero page size is treated as one");
}

#[test]
fn filter_changes_return_to_first_page() {
    let mut view = view(numbered_rows(25));
    view.set_page_index(2);

    view.set_global_filter("row");
    assert_eq!(view.pagination().page_index, 0);

    view.set_page_index(1);
    view.sort_by_field("title", SortDirection::Desc);
    assert_eq!(view.pagination().page_index, 0);
}

#[test]
fn initial_state_comes_from_options() {
    let options = TableOptions {
        initial_filter: "row 1".to_string(),
        initial_category: String::new(),
        initial_page_size: 4,
        ..TableOptions::default()
    };
    let view = TableViewModel::new(numbered_rows(25), columns(), options);

    assert_eq!(view.global_filter(), "row 1");
    assert_eq!(view.row_count(), 10, "row 10 through row 19");
    assert_eq!(view.page_count(), 3);
}

#[test]
fn missing_accessor_key_renders_empty_cell() {
    let columns = vec![
        ColumnDef::new("title", "Title"),
        ColumnDef::new("nope", "Nope"),
    ];
    let view = TableViewModel::new(vec![row("a", None)], columns, TableOptions::default());

    let snapshot = view.snapshot();

    assert_eq!(snapshot.rows[0].cells, vec!["a".to_string(), String::new()]);
}

#[test]
fn member_columns_render_with_custom_renderers() {
    let mut view = member_view();
    view.set_global_filter("oskar");

    let snapshot = view.snapshot();
    let cells = &snapshot.rows[0].cells;

    assert_eq!(
        cells,
        &vec![
            "Oskar Holm".to_string(),
            "oskar.holm@union.example".to_string(),
            "-".to_string(),
            "2024".to_string(),
            "2024-09-02".to_string(),
            "yes".to_string(),
        ]
    );
}

#[test]
fn click_row_dispatches_row_on_current_page() {
    let clicked = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&clicked);
    let mut view = member_view();
    view.set_row_click_handler(move |member: &Member| sink.borrow_mut().push(member.name.clone()));
    view.set_page_size(2);
    view.next_page();

    assert!(view.click_row(1));
    assert!(!view.click_row(5), "position outside the page is a no-op");

    assert_eq!(*clicked.borrow(), vec!["Hugo Sand".to_string()]);
}

#[test]
fn row_at_resolves_positions_on_the_current_page() {
    let mut view = member_view();
    view.set_page_size(5);
    view.next_page();

    assert_eq!(view.row_at(0).map(|member| member.name), Some("Leo Fors".to_string()));
    assert_eq!(view.row_at(4).map(|member| member.name), Some("Saga Rask".to_string()));
    assert_eq!(view.row_at(5), None, "position outside the page");

    let snapshot = view.snapshot();
    for row in &snapshot.rows {
        assert_eq!(view.row_at(row.position).as_ref(), Some(&row.record));
    }
}

#[test]
fn click_row_without_handler_is_a_no_op() {
    let mut view = member_view();

    assert!(!view.click_row(0));
}

#[test]
fn sort_direction_parses_asc_and_desc() {
    assert_eq!("asc".parse::<SortDirection>().ok(), Some(SortDirection::Asc));
    assert_eq!("desc".parse::<SortDirection>().ok(), Some(SortDirection::Desc));
    assert_eq!(SortDirection::Desc.to_string(), "desc");

    let err = "up".parse::<SortDirection>().expect_err("unknown direction should fail");
    assert!(matches!(err, TableError::UnknownSortDirection(ref value) if value == "up"));
    assert!(err.to_string().contains("up"));
}

#[test]
fn parse_sorting_reads_url_style_strings() {
    let sorting = parse_sorting("-joined, name,,").expect("sort string should parse");

    assert_eq!(
        sorting,
        vec![
            SortDescriptor::new("joined", SortDirection::Desc),
            SortDescriptor::new("name", SortDirection::Asc),
        ]
    );
    assert!(parse_sorting("").expect("empty string should parse").is_empty());
    assert!(matches!(parse_sorting("-"), Err(TableError::EmptySortField)));
}

#[test]
fn table_options_deserialize_with_defaults() {
    let options: TableOptions =
        serde_json::from_str(r#"{"category_field":"post","initial_sorting":[{"field_id":"name","descending":true}]}"#)
            .expect("options should deserialize");

    assert_eq!(options.category_field, "post");
    assert_eq!(options.initial_page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(options.initial_filter, "");
    assert_eq!(
        options.initial_sorting,
        vec![SortDescriptor::new("name", SortDirection::Desc)]
    );

    let defaults = TableOptions::default();
    assert_eq!(defaults.category_field, DEFAULT_CATEGORY_FIELD);
    assert_eq!(defaults.initial_page_size, 10);
}

#[test]
fn export_csv_writes_visible_columns_for_all_pages() {
    let mut view = member_view();
    view.set_page_size(2);
    view.set_column_visible("email", false);

    let mut buffer = Vec::new();
    let row_count = export_csv(&view, &mut buffer).expect("export should succeed");
    let text = String::from_utf8(buffer).expect("csv should be utf-8");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(row_count, 12);
    assert_eq!(lines.len(), 13, "header plus one line per member");
    assert_eq!(lines[0], "Name,Post,Class,Joined,Active");
    assert_eq!(lines[1], "Alva Lind,Board,2022,2022-08-29,yes");
    assert_eq!(lines[2], "Axel Vik,Events,2024,2024-10-07,yes");
}

#[test]
fn export_csv_respects_filters() {
    let mut view = member_view();
    view.set_category_filter("Treasurer");

    let mut buffer = Vec::new();
    let row_count = export_csv(&view, &mut buffer).expect("export should succeed");

    assert_eq!(row_count, 2);
}

fn sqlite_view(rows: Vec<Row>) -> TableViewModel<Row> {
    let engine = SqliteEngine::open_in_memory().expect("in-memory sqlite should open");
    TableViewModel::with_engine(rows, columns(), TableOptions::default(), engine)
}

#[test]
fn sqlite_engine_filters_like_memory_engine() {
    let rows = vec![
        row("Spring Ball", Some("Events")),
        row("Autumn party", Some("Events")),
        row("Board meeting", Some("Board")),
    ];
    let mut memory = view(rows.clone());
    let mut sqlite = sqlite_view(rows);

    for filter in ["BALL", "events", " board ", "zzz", ""] {
        memory.set_global_filter(filter);
        sqlite.set_global_filter(filter);
        assert_eq!(
            titles(sqlite.rows()),
            titles(memory.rows()),
            "filter {filter:?} should match the same rows"
        );
    }
}

#[test]
fn sqlite_engine_matches_wildcards_literally() {
    let mut view = sqlite_view(vec![row("100% done", None), row("1000 done", None)]);

    view.set_global_filter("0%");
    assert_eq!(titles(view.rows()), vec!["100% done"]);

    view.set_global_filter("_");
    assert!(view.rows().is_empty());
}

#[test]
fn sqlite_engine_sorts_like_memory_engine() {
    let mut view = sqlite_view(scored_rows());

    view.sort_by_field("score", SortDirection::Asc);
    assert_eq!(
        titles(view.rows()),
        vec!["missing", "two and a half", "three", "ten"]
    );

    view.sort_by_field("score", SortDirection::Desc);
    assert_eq!(
        titles(view.rows()),
        vec!["ten", "three", "two and a half", "missing"]
    );

    let mut words = sqlite_view(vec![
        row("banana", None),
        row("Apple", None),
        row("cherry", None),
    ]);
    words.sort_by_field("title", SortDirection::Asc);
    assert_eq!(titles(words.rows()), vec!["Apple", "banana", "cherry"]);
}

#[test]
fn like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("a%b_c\\"), "%a\\%b\\_c\\\\%");
    assert_eq!(like_pattern("plain"), "%plain%");
}

#[test]
fn cell_values_order_across_kinds() {
    use std::cmp::Ordering;

    let date = NaiveDate::from_ymd_opt(2024, 9, 2).expect("valid date");
    let moment = date.and_hms_opt(12, 0, 0).expect("valid time");

    assert_eq!(CellValue::Integer(2).compare(&CellValue::Float(2.5)), Ordering::Less);
    assert_eq!(CellValue::Bool(true).compare(&CellValue::Integer(0)), Ordering::Less);
    assert_eq!(CellValue::Integer(99).compare(&CellValue::from("1")), Ordering::Less);
    assert_eq!(CellValue::Date(date).compare(&CellValue::DateTime(moment)), Ordering::Less);
    assert_eq!(CellValue::from("b").compare(&CellValue::from("B")), Ordering::Greater);
    assert_eq!(CellValue::Date(date).to_string(), "2024-09-02");
    assert_eq!(CellValue::from("x").as_text(), Some("x"));
    assert_eq!(CellValue::Integer(3).as_text(), None);
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

#[test]
fn mixed_integer_and_float_order_is_transitive() {
    use std::cmp::Ordering;

    let max = CellValue::Integer(i64::MAX);
    let below_max = CellValue::Integer(i64::MAX - 1);
    let two_pow_63 = CellValue::Float(TWO_POW_63);

    assert_eq!(max.compare(&below_max), Ordering::Greater);
    assert_eq!(max.compare(&two_pow_63), Ordering::Less);
    assert_eq!(below_max.compare(&two_pow_63), Ordering::Less);
    assert_eq!(two_pow_63.compare(&max), Ordering::Greater);

    let values = vec![
        CellValue::Integer(i64::MAX),
        CellValue::Integer(i64::MAX - 1),
        CellValue::Integer(i64::MIN),
        CellValue::Integer(0),
        CellValue::Integer(-3),
        CellValue::Integer(9_007_199_254_740_993),
        CellValue::Float(TWO_POW_63),
        CellValue::Float(-TWO_POW_63),
        CellValue::Float(9_007_199_254_740_992.0),
        CellValue::Float(-2.5),
        CellValue::Float(0.0),
        CellValue::Float(-0.0),
        CellValue::Float(f64::NAN),
        CellValue::Float(f64::INFINITY),
        CellValue::Float(f64::NEG_INFINITY),
    ];

    for a in &values {
        for b in &values {
            assert_eq!(
                a.compare(b),
                b.compare(a).reverse(),
                "{a:?} and {b:?} should compare symmetrically"
            );
            for c in &values {
                if a.compare(b) != Ordering::Greater && b.compare(c) != Ordering::Greater {
                    assert_ne!(
                        a.compare(c),
                        Ordering::Greater,
                        "{a:?} <= {b:?} <= {c:?} should imply {a:?} <= {c:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn sorting_mixed_numbers_near_i64_max() {
    let mut view = view(vec![
        scored("max", Some(CellValue::Integer(i64::MAX))),
        scored("float", Some(CellValue::Float(TWO_POW_63))),
        scored("below max", Some(CellValue::Integer(i64::MAX - 1))),
        scored("fraction", Some(CellValue::Float(-2.5))),
        scored("minus two", Some(CellValue::Integer(-2))),
    ]);

    view.sort_by_field("score", SortDirection::Asc);

    assert_eq!(
        titles(view.rows()),
        vec!["fraction", "minus two", "below max", "max", "float"]
    );
}

#[test]
fn memo_recomputes_only_when_key_changes() {
    let mut calls = 0;
    let mut memo = Memo::new(1, |key| {
        calls += 1;
        key * 2
    });

    assert!(!memo.update(1, |key| {
        calls += 1;
        key * 2
    }));
    assert!(memo.update(2, |key| {
        calls += 1;
        key * 2
    }));

    assert_eq!(calls, 2);
    assert_eq!(*memo.value(), 4);
}

#[test]
fn category_choices_prepend_all_entry() {
    let choices = category_choices(&[SelectOption::new("Board", "Board")], "All");

    assert_eq!(choices[0], SelectOption::new(ALL_CATEGORIES_VALUE, "All"));
    assert_eq!(choices.len(), 2);
    assert_eq!(category_filter_from_choice(ALL_CATEGORIES_VALUE.to_string()), "");
    assert_eq!(category_filter_from_choice("Board".to_string()), "Board");
    assert_eq!(dropdown_label(&choices, Some(ALL_CATEGORIES_VALUE)), "All");
    assert_eq!(dropdown_label(&choices, Some("Missing")), "(none)");
}

#[test]
fn table_header_cell_style_is_sticky() {
    let style = table_header_cell_style();

    assert!(style.contains("position: sticky"));
    assert!(style.contains("top: 0"));
    assert!(style.contains("z-index"));
}

#[test]
fn table_container_style_allows_scroll() {
    let style = table_container_style();

    assert!(style.contains("overflow: auto"));
    assert!(style.contains("flex: 1"));
    assert!(style.contains("min-height: 0"));
}

#[test]
fn root_container_style_uses_viewport_height_and_flex() {
    let style = root_container_style();

    assert!(style.contains("height: 100vh"));
    assert!(style.contains("display: flex"));
    assert!(style.contains("flex-direction: column"));
}

fn category_value() -> impl Strategy<Value = Option<CellValue>> {
    prop_oneof![
        Just(None),
        "[ABC]".prop_map(|category| Some(CellValue::Text(category))),
        (0_i64..3).prop_map(|value| Some(CellValue::Integer(value))),
    ]
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((category_value(), "[a-z]{0,4}"), 0..30).prop_map(|items| {
        items
            .into_iter()
            .map(|(category, title)| {
                let mut record = Row::new();
                record.insert("title".to_string(), CellValue::Text(title));
                if let Some(category) = category {
                    record.insert("category".to_string(), category);
                }
                record
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn category_options_are_unique_and_first_seen(rows in rows_strategy()) {
        let view = view(rows.clone());

        let mut expected: Vec<String> = Vec::new();
        for record in &rows {
            if let Some(CellValue::Text(category)) = record.get("category") {
                if !expected.contains(category) {
                    expected.push(category.clone());
                }
            }
        }

        let options = view.category_options();
        let values: Vec<String> = options.iter().map(|option| option.value.clone()).collect();
        prop_assert_eq!(values, expected);
        for option in options.iter() {
            prop_assert_eq!(&option.value, &option.label);
        }
    }

    #[test]
    fn category_filter_is_sound_and_complete(rows in rows_strategy(), filter in "[ABC]?") {
        let mut view = view(rows.clone());
        view.set_category_filter(filter.clone());

        let expected: Vec<Row> = if filter.is_empty() {
            rows
        } else {
            let wanted = CellValue::Text(filter.clone());
            rows.into_iter()
                .filter(|record| record.get("category") == Some(&wanted))
                .collect()
        };
        prop_assert_eq!(view.filtered_data().to_vec(), expected);
    }

    #[test]
    fn malformed_input_never_panics(
        rows in rows_strategy(),
        global_filter in ".{0,3}",
        category in ".{0,2}",
        category_field in "[a-z]{0,8}",
        page_index in 0_usize..10,
        page_size in 0_usize..5,
    ) {
        let options = TableOptions {
            category_field,
            initial_page_size: page_size,
            ..TableOptions::default()
        };
        let mut view = TableViewModel::new(rows, columns(), options);
        view.set_global_filter(global_filter);
        view.set_category_filter(category);
        view.sort_by_field("missing", SortDirection::Desc);
        view.set_page_index(page_index);
        view.next_page();
        view.click_row(page_index);

        let snapshot = view.snapshot();
        prop_assert!(snapshot.rows.len() <= snapshot.pagination.page_size);
        prop_assert!(view.page_rows().len() <= view.row_count());
        prop_assert!(view.row_count() <= view.data().len());
    }
}

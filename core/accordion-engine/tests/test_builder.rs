//! FILENAME: tests/test_builder.rs
//! PURPOSE: End-to-end tests for building accordion table payloads.

mod common;

use accordion_engine::{
    AccordionOptions, AccordionTableBuilder, DateGroupFormat, FieldDescriptor, RenderPayload,
    Row, TableBody,
};
use common::TestHarness;

// ============================================================================
// PAYLOAD SHAPE
// ============================================================================

#[test]
fn test_empty_result_renders_nothing() {
    let harness = TestHarness::new();
    let payload = harness.build(&AccordionOptions::grouped_by("created"));

    assert_eq!(payload, RenderPayload::Empty);
}

#[test]
fn test_all_fields_excluded_asks_for_configuration() {
    let mut harness = TestHarness::with_months(&["2024-11"]);
    for field in &mut harness.fields {
        field.excluded = true;
    }

    let payload = harness.build(&AccordionOptions::default());
    assert!(payload.is_configuration_error());
    assert!(payload.header().is_empty());
}

#[test]
fn test_header_follows_visible_fields_in_order() {
    let harness = TestHarness::with_months(&["2024-11"]);
    let payload = harness.build(&AccordionOptions::default());

    let header: Vec<(&str, &str)> = payload
        .header()
        .iter()
        .map(|cell| (cell.field_id.as_str(), cell.content.as_str()))
        .collect();
    assert_eq!(
        header,
        vec![("title", "Title"), ("created", "Authored on"), ("status", "Status")]
    );
}

#[test]
fn test_rows_carry_rendered_markup() {
    let harness = TestHarness::with_months(&["2024-11", "2025-01"]);
    let payload = harness.build(&AccordionOptions::default());

    let rows = payload.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("title"), Some("<a href=\"/node/1\">Article 1</a>"));
    assert_eq!(rows[1].get("status"), Some("Unpublished"));
    assert_eq!(rows[0].get("nid"), None);
}

// ============================================================================
// GROUPING
// ============================================================================

#[test]
fn test_month_year_groups_in_first_seen_order() {
    let harness = TestHarness::with_months(&["2024-11", "2024-11", "2025-01"]);
    let options = AccordionOptions::grouped_by("created").with_date_format(DateGroupFormat::MonthYear);
    let payload = harness.build(&options);

    let groups: Vec<(&str, usize)> = payload
        .groups()
        .iter()
        .map(|g| (g.label.as_str(), g.rows.len()))
        .collect();
    assert_eq!(groups, vec![("November 2024", 2), ("January 2025", 1)]);
    assert!(payload.rows().is_empty());
}

#[test]
fn test_raw_keys_without_date_format() {
    let harness = TestHarness::with_months(&["2024-11", "2025-01", "2024-11"]);
    let payload = harness.build(&AccordionOptions::grouped_by("created"));

    let labels: Vec<&str> = payload.groups().iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["2024-11", "2025-01"]);
}

#[test]
fn test_full_dates_fall_back_to_raw_key() {
    let harness = TestHarness::with_months(&["2024-11-05", "2024-11-06"]);
    let options = AccordionOptions::grouped_by("created").with_date_format(DateGroupFormat::Year);
    let payload = harness.build(&options);

    let labels: Vec<&str> = payload.groups().iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["2024-11-05", "2024-11-06"]);
}

#[test]
fn test_year_mode_merges_months() {
    let harness = TestHarness::with_months(&["2024-11", "2024-12", "2025-01", "2024-01"]);
    let options = AccordionOptions::grouped_by("created").with_date_format(DateGroupFormat::Year);
    let payload = harness.build(&options);

    let groups: Vec<(&str, usize)> = payload
        .groups()
        .iter()
        .map(|g| (g.label.as_str(), g.rows.len()))
        .collect();
    assert_eq!(groups, vec![("2024", 3), ("2025", 1)]);

    let titles: Vec<&str> = payload.groups()[0]
        .rows
        .iter()
        .map(|r| r.get("title").unwrap())
        .collect();
    assert_eq!(
        titles,
        vec![
            "<a href=\"/node/1\">Article 1</a>",
            "<a href=\"/node/2\">Article 2</a>",
            "<a href=\"/node/4\">Article 4</a>",
        ]
    );
}

#[test]
fn test_custom_pattern() {
    let harness = TestHarness::with_months(&["2025-03"]);
    let options = AccordionOptions::grouped_by("created").with_custom_format("M Y");
    let payload = harness.build(&options);

    assert_eq!(payload.groups()[0].label, "Mar 2025");
}

#[test]
fn test_excluded_field_can_still_group() {
    let harness = TestHarness::with_months(&["2024-11", "2025-01", "2024-11"]);
    // nid is excluded from display but still drives grouping
    let payload = harness.build(&AccordionOptions::grouped_by("nid"));

    let labels: Vec<&str> = payload.groups().iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "2", "3"]);
    assert_eq!(payload.groups()[0].rows[0].get("nid"), None);
}

#[test]
fn test_grouping_key_is_rendered_once_per_row() {
    let harness = TestHarness::with_months(&["2024-11", "2025-01"]);
    let builder = harness.builder();
    builder.build(&harness.records, &harness.fields, &AccordionOptions::grouped_by("created"));

    // 3 visible fields plus one lookup of the grouping key, per row
    let calls = builder.field_renderer().calls.borrow();
    assert_eq!(calls.len(), 8);
    assert_eq!(calls.iter().filter(|(i, _)| *i == 1).count(), 4);
    assert_eq!(calls.iter().filter(|(_, f)| f == "nid").count(), 0);
}

// ============================================================================
// SERIALIZATION & OPTIONS
// ============================================================================

#[test]
fn test_options_json_drives_build() {
    let harness = TestHarness::with_months(&["2024-11", "2025-06"]);
    let options = AccordionOptions::from_json(
        r#"{
            "accordion_initially_open": false,
            "group_date_format": "month",
            "grouping": [{"field": "created"}]
        }"#,
    )
    .unwrap();

    let payload = harness.build(&options);
    let table = payload.as_table().unwrap();
    assert!(!table.options.accordion_initially_open);
    let labels: Vec<&str> = table.groups().iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["November", "June"]);
}

#[test]
fn test_payload_serializes_for_templating() {
    let harness = TestHarness::with_months(&["2024-11"]);
    let options = AccordionOptions::grouped_by("created").with_date_format(DateGroupFormat::MonthYear);
    let payload = harness.build(&options);

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["kind"], "table");
    assert_eq!(json["theme"], "views_view_accordion_table");
    assert_eq!(json["libraries"][0], "views_accordion_table/accordion_table");
    assert_eq!(json["body"]["groups"]["groups"][0]["label"], "November 2024");
    assert_eq!(json["options"]["group_date_format"], "month_year");
}

#[test]
fn test_available_options_for_grouping_field() {
    let harness = TestHarness::new();
    let builder = harness.builder();

    assert!(builder.available_options_for(&AccordionOptions::grouped_by("created")).offer_date_format);
    assert!(!builder.available_options_for(&AccordionOptions::grouped_by("status")).offer_date_format);
}

#[test]
fn test_closure_field_renderer() {
    let builder = AccordionTableBuilder::new(|_index: usize, row: &Row, field: &str| {
        row.get(field).unwrap_or("-").to_uppercase()
    });
    let fields = vec![FieldDescriptor::new("a", "A"), FieldDescriptor::new("b", "B")];
    let rows = vec![Row::new().with("a", "x")];

    let payload = builder.build(&rows, &fields, &AccordionOptions::default());
    match &payload.as_table().unwrap().body {
        TableBody::Rows(rows) => {
            assert_eq!(rows[0].get("a"), Some("X"));
            assert_eq!(rows[0].get("b"), Some("-"));
        }
        TableBody::Groups(_) => panic!("expected flat rows"),
    }
}

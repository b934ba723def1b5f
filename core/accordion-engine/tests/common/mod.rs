//! FILENAME: tests/common/mod.rs
//! Fixtures for accordion-engine integration tests.

#![allow(dead_code)]

use accordion_engine::{
    AccordionOptions, AccordionTableBuilder, FieldDescriptor, FieldRenderer, RenderPayload,
};
use std::cell::RefCell;

/// A raw result record as the host would hand it over: one value per column.
#[derive(Debug, Clone)]
pub struct ResultRecord {
    pub nid: u32,
    pub title: String,
    pub created: String,
    pub status: bool,
}

/// Field renderer that wraps values in markup and records every call.
#[derive(Debug, Default)]
pub struct MarkupRenderer {
    pub calls: RefCell<Vec<(usize, String)>>,
}

impl FieldRenderer<ResultRecord> for MarkupRenderer {
    fn rendered_field(&self, row_index: usize, row: &ResultRecord, field_id: &str) -> String {
        self.calls.borrow_mut().push((row_index, field_id.to_string()));
        match field_id {
            "nid" => row.nid.to_string(),
            "title" => format!("<a href=\"/node/{}\">{}</a>", row.nid, row.title),
            "created" => format!("<time datetime=\"{0}\">{0}</time>\n", row.created),
            "status" => if row.status { "Published" } else { "Unpublished" }.to_string(),
            _ => String::new(),
        }
    }
}

/// Test harness holding the configured fields and a result set.
pub struct TestHarness {
    pub fields: Vec<FieldDescriptor>,
    pub records: Vec<ResultRecord>,
}

impl TestHarness {
    /// Harness with the standard field set and no rows.
    pub fn new() -> Self {
        TestHarness {
            fields: vec![
                FieldDescriptor::new("nid", "ID").excluded(),
                FieldDescriptor::new("title", "Title"),
                FieldDescriptor::new("created", "Authored on")
                    .with_plugin("field")
                    .with_storage_type("timestamp"),
                FieldDescriptor::new("status", "Status").with_plugin("boolean"),
            ],
            records: Vec::new(),
        }
    }

    /// Harness with one record per `created` value.
    pub fn with_months(months: &[&str]) -> Self {
        let mut harness = Self::new();
        for (i, month) in months.iter().enumerate() {
            harness.records.push(ResultRecord {
                nid: i as u32 + 1,
                title: format!("Article {}", i + 1),
                created: month.to_string(),
                status: i % 2 == 0,
            });
        }
        harness
    }

    pub fn build(&self, options: &AccordionOptions) -> RenderPayload {
        self.builder().build(&self.records, &self.fields, options)
    }

    pub fn builder(&self) -> AccordionTableBuilder<MarkupRenderer> {
        AccordionTableBuilder::new(MarkupRenderer::default()).with_registry(self.fields.clone())
    }
}

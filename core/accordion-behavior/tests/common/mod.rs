//! FILENAME: tests/common/mod.rs
//! Fixtures for accordion-behavior integration tests.

#![allow(dead_code)]

use accordion_behavior::{mount_payload, AccordionToggleController, Document, ElementId, HEADER_CLASS};
use accordion_engine::{AccordionOptions, AccordionTableBuilder, FieldDescriptor, RenderPayload, Row};

/// A page with one mounted accordion table.
pub struct TestHarness {
    pub doc: Document,
    pub controller: AccordionToggleController,
    pub wrapper: Option<ElementId>,
}

impl TestHarness {
    /// Builds a payload for articles created in `months` and mounts it.
    pub fn mount(months: &[&str], options: &AccordionOptions) -> Self {
        let payload = build_payload(months, options);
        let mut doc = Document::new();
        let root = doc.root();
        let wrapper = mount_payload(&mut doc, root, &payload).unwrap();

        TestHarness {
            doc,
            controller: AccordionToggleController::new().unwrap(),
            wrapper,
        }
    }

    pub fn attach(&mut self) -> usize {
        let root = self.doc.root();
        self.controller.attach(&mut self.doc, root).unwrap()
    }

    /// Headers in document order.
    pub fn headers(&self) -> Vec<ElementId> {
        self.doc
            .descendants(self.doc.root())
            .into_iter()
            .filter(|id| self.doc.has_class(*id, HEADER_CLASS))
            .collect()
    }

    pub fn header_label(&self, header: ElementId) -> &str {
        self.doc.element(header).map(|e| e.text()).unwrap_or("")
    }
}

pub fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("title", "Title"),
        FieldDescriptor::new("created", "Authored on").with_storage_type("datetime"),
    ]
}

pub fn build_payload(months: &[&str], options: &AccordionOptions) -> RenderPayload {
    let rows: Vec<Row> = months
        .iter()
        .enumerate()
        .map(|(i, month)| {
            Row::new()
                .with("title", format!("Article {}", i + 1))
                .with("created", *month)
        })
        .collect();

    let renderer = |_: usize, row: &Row, field_id: &str| row.get(field_id).unwrap_or_default().to_string();
    AccordionTableBuilder::new(renderer).build(&rows, &fields(), options)
}

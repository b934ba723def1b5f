//! FILENAME: core/accordion-behavior/src/markup.rs
//! PURPOSE: Default markup for a render payload.
//! CONTEXT: Hosts normally render payloads with their own templates. This
//! builds the same structure the toggle controller expects:
//!
//! ```text
//! div.views-accordion-table-wrapper
//!   div.accordion-header[aria-expanded][aria-controls]   (one pair per group)
//!   div.accordion-content#accordion-content-N
//!     table.views-accordion-table > thead, tbody
//! ```
//!
//! Ungrouped payloads render a single table inside the wrapper. Open state is
//! taken from `accordion_initially_open`.

use accordion_engine::{AccordionTable, HeaderCell, RenderPayload, Row, TableBody};

use crate::animation::SlideState;
use crate::controller::{ARIA_EXPANDED, CONTENT_CLASS, HEADER_CLASS, OPEN_CLASS, WRAPPER_CLASS};
use crate::dom::{Document, ElementId};
use crate::error::Result;

/// Class of the element carrying the configuration message.
pub const MESSAGE_CLASS: &str = "views-accordion-table-message";

/// Mounts `payload` under `parent`. Returns the top element, or `None` for an
/// empty payload.
pub fn mount_payload(doc: &mut Document, parent: ElementId, payload: &RenderPayload) -> Result<Option<ElementId>> {
    match payload {
        RenderPayload::Empty => Ok(None),
        RenderPayload::ConfigurationError { message } => {
            let node = doc.append_new(parent, "div", &[MESSAGE_CLASS])?;
            doc.set_text(node, message.clone());
            Ok(Some(node))
        }
        RenderPayload::Table(table) => mount_table(doc, parent, table).map(Some),
    }
}

fn mount_table(doc: &mut Document, parent: ElementId, table: &AccordionTable) -> Result<ElementId> {
    let wrapper = doc.append_new(parent, "div", &[WRAPPER_CLASS])?;
    let open = table.options.accordion_initially_open;

    match &table.body {
        TableBody::Rows(rows) => {
            append_table(doc, wrapper, table, rows)?;
        }
        TableBody::Groups(groups) => {
            for (n, group) in groups.groups().iter().enumerate() {
                let panel_id = format!("accordion-content-{}", n);

                let header = doc.append_new(wrapper, "div", &[HEADER_CLASS])?;
                doc.set_text(header, group.label.clone());
                doc.set_attribute(header, "role", "button");
                doc.set_attribute(header, "tabindex", "0");
                doc.set_attribute(header, "aria-controls", panel_id.clone());
                doc.set_attribute(header, ARIA_EXPANDED, if open { "true" } else { "false" });
                if open {
                    doc.add_class(header, OPEN_CLASS);
                }

                let panel = doc.append_new(wrapper, "div", &[CONTENT_CLASS])?;
                doc.set_attribute(panel, "id", panel_id);
                doc.set_slide_state(panel, if open { SlideState::Shown } else { SlideState::Hidden });

                append_table(doc, panel, table, &group.rows)?;
            }
        }
    }

    Ok(wrapper)
}

fn append_table(doc: &mut Document, parent: ElementId, table: &AccordionTable, rows: &[Row]) -> Result<ElementId> {
    let classes: Vec<&str> = table.attributes.classes.iter().map(String::as_str).collect();
    let node = doc.append_new(parent, "table", &classes)?;

    append_header(doc, node, &table.header)?;

    let body = doc.append_new(node, "tbody", &[])?;
    for row in rows {
        let tr = doc.append_new(body, "tr", &[])?;
        for cell in &table.header {
            let td = doc.append_new(tr, "td", &[])?;
            doc.set_attribute(td, "headers", cell.field_id.clone());
            doc.set_text(td, row.get(&cell.field_id).unwrap_or_default());
        }
    }
    Ok(node)
}

fn append_header(doc: &mut Document, table: ElementId, header: &[HeaderCell]) -> Result<()> {
    let thead = doc.append_new(table, "thead", &[])?;
    let tr = doc.append_new(thead, "tr", &[])?;
    for cell in header {
        let th = doc.append_new(tr, "th", &[])?;
        doc.set_attribute(th, "id", cell.field_id.clone());
        doc.set_text(th, cell.content.clone());
    }
    Ok(())
}

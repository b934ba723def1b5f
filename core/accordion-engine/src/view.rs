//! FILENAME: core/accordion-engine/src/view.rs
//! Accordion View - Renderable output handed to templating.
//!
//! A `RenderPayload` is either nothing (empty result), an instruction to
//! configure fields, or a table whose body is exactly one of a flat row list
//! or a set of labelled groups.

use serde::Serialize;

use crate::definition::AccordionOptions;
use crate::grouping::{GroupedResult, GroupedRows, Row, RowGroup};

/// Theme hook the host renders the table with.
pub const THEME_HOOK: &str = "views_view_accordion_table";

/// Class marker on the table element.
pub const TABLE_CLASS: &str = "views-accordion-table";

/// Client library carrying the toggle behavior.
pub const BEHAVIOR_LIBRARY: &str = "views_accordion_table/accordion_table";

// ============================================================================
// HEADER
// ============================================================================

/// One column of the table header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub field_id: String,
    /// Label of the column as shown to the user.
    pub content: String,
}

// ============================================================================
// BODY
// ============================================================================

/// Table body: flat when ungrouped, labelled groups otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableBody {
    Rows(Vec<Row>),
    Groups(GroupedResult),
}

impl From<GroupedRows> for TableBody {
    fn from(rows: GroupedRows) -> Self {
        match rows {
            GroupedRows::Flat(rows) => TableBody::Rows(rows),
            GroupedRows::Grouped(groups) => TableBody::Groups(groups),
        }
    }
}

/// HTML attributes for the table element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableAttributes {
    pub classes: Vec<String>,
}

impl Default for TableAttributes {
    fn default() -> Self {
        TableAttributes {
            classes: vec![TABLE_CLASS.to_string()],
        }
    }
}

/// A fully built accordion table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccordionTable {
    pub theme: String,
    pub header: Vec<HeaderCell>,
    pub body: TableBody,
    pub options: AccordionOptions,
    pub attributes: TableAttributes,
    /// Client libraries the page must load.
    pub libraries: Vec<String>,
}

impl AccordionTable {
    pub fn new(header: Vec<HeaderCell>, body: TableBody, options: AccordionOptions) -> Self {
        AccordionTable {
            theme: THEME_HOOK.to_string(),
            header,
            body,
            options,
            attributes: TableAttributes::default(),
            libraries: vec![BEHAVIOR_LIBRARY.to_string()],
        }
    }

    /// Flat rows; empty when the table is grouped.
    pub fn rows(&self) -> &[Row] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Groups(_) => &[],
        }
    }

    /// Groups; empty when the table is not grouped.
    pub fn groups(&self) -> &[RowGroup] {
        match &self.body {
            TableBody::Rows(_) => &[],
            TableBody::Groups(groups) => groups.groups(),
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self.body, TableBody::Groups(_))
    }

    /// Number of rows across the whole body.
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Groups(groups) => groups.row_count(),
        }
    }
}

// ============================================================================
// PAYLOAD
// ============================================================================

/// Outcome of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderPayload {
    /// No result rows: render nothing.
    Empty,
    /// No fields to display: render the message instead of a table.
    ConfigurationError { message: String },
    Table(AccordionTable),
}

impl RenderPayload {
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderPayload::Empty)
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, RenderPayload::ConfigurationError { .. })
    }

    pub fn as_table(&self) -> Option<&AccordionTable> {
        match self {
            RenderPayload::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Header cells; empty unless this is a table.
    pub fn header(&self) -> &[HeaderCell] {
        self.as_table().map(|t| t.header.as_slice()).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Row] {
        self.as_table().map(AccordionTable::rows).unwrap_or(&[])
    }

    pub fn groups(&self) -> &[RowGroup] {
        self.as_table().map(AccordionTable::groups).unwrap_or(&[])
    }
}

//! FILENAME: core/accordion-engine/src/grouping.rs
//! PURPOSE: Partitions rendered rows into labelled groups.
//! CONTEXT: A single linear pass. Groups come out in the order their label is
//! first seen and rows keep their original order inside a group. Every row
//! lands in exactly one group.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::date_label::DateLabelFormatter;

// ============================================================================
// ROWS
// ============================================================================

/// One rendered cell of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCell {
    pub field_id: String,
    /// Rendered markup or text, produced by the host.
    pub content: String,
}

/// A rendered result row: field id -> content, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<RowCell>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    /// Appends a cell, replacing the content if the field is already present.
    pub fn push(&mut self, field_id: impl Into<String>, content: impl Into<String>) {
        let field_id = field_id.into();
        let content = content.into();
        match self.cells.iter_mut().find(|cell| cell.field_id == field_id) {
            Some(cell) => cell.content = content,
            None => self.cells.push(RowCell { field_id, content }),
        }
    }

    pub fn with(mut self, field_id: impl Into<String>, content: impl Into<String>) -> Self {
        self.push(field_id, content);
        self
    }

    /// Content of the given field, if the row has it.
    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.field_id == field_id)
            .map(|cell| cell.content.as_str())
    }

    pub fn cells(&self) -> &[RowCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ============================================================================
// GROUPED RESULT
// ============================================================================

/// A labelled group of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowGroup {
    pub label: String,
    pub rows: Vec<Row>,
}

/// Ordered mapping of group label -> rows, in first-seen order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedResult {
    groups: Vec<RowGroup>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl PartialEq for GroupedResult {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl Eq for GroupedResult {}

impl GroupedResult {
    pub fn new() -> Self {
        GroupedResult::default()
    }

    /// Appends a row to the group with this label, creating it on first use.
    pub fn push(&mut self, label: String, row: Row) {
        match self.index.get(&label) {
            Some(&position) => self.groups[position].rows.push(row),
            None => {
                self.index.insert(label.clone(), self.groups.len());
                self.groups.push(RowGroup {
                    label,
                    rows: vec![row],
                });
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&[Row]> {
        self.index
            .get(label)
            .map(|&position| self.groups[position].rows.as_slice())
    }

    pub fn groups(&self) -> &[RowGroup] {
        &self.groups
    }

    /// Labels in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.label.as_str())
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of rows across all groups.
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }

    pub fn into_groups(self) -> Vec<RowGroup> {
        self.groups
    }
}

/// Rows either as a flat list or partitioned into groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupedRows {
    Flat(Vec<Row>),
    Grouped(GroupedResult),
}

// ============================================================================
// GROUP KEYS
// ============================================================================

/// Removes markup tags and comments, keeping the text between them.
///
/// A `<` followed by whitespace (or ending the input) is text, not a tag.
/// Quoted attribute values may contain `>`. An unterminated tag or comment
/// swallows the rest of the input.
pub fn strip_tags(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < len {
        let ch = chars[i];

        if ch != '<' || i + 1 >= len || chars[i + 1].is_whitespace() {
            out.push(ch);
            i += 1;
            continue;
        }

        if starts_with(&chars, i, "<!--") {
            match find_sequence(&chars, i + 4, "-->") {
                Some(end) => i = end + 3,
                None => break,
            }
            continue;
        }

        let mut quote: Option<char> = None;
        let mut j = i + 1;
        while j < len {
            let c = chars[j];
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if c == '"' || c == '\'' => quote = Some(c),
                None if c == '>' => break,
                None => {}
            }
            j += 1;
        }

        if j >= len {
            break;
        }
        i = j + 1;
    }

    out
}

fn starts_with(chars: &[char], start: usize, needle: &str) -> bool {
    let mut position = start;
    for expected in needle.chars() {
        if chars.get(position) != Some(&expected) {
            return false;
        }
        position += 1;
    }
    true
}

fn find_sequence(chars: &[char], from: usize, needle: &str) -> Option<usize> {
    (from..chars.len()).find(|&i| starts_with(chars, i, needle))
}

/// Trims the whitespace set used for group keys (space, tab, newlines, NUL, vertical tab).
pub fn trim_key(value: &str) -> &str {
    value.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

/// Plain-text group key of a rendered cell.
pub fn group_key(content: &str) -> String {
    trim_key(&strip_tags(content)).to_string()
}

// ============================================================================
// ROW GROUPER
// ============================================================================

/// Groups rows by the rendered value of one field.
#[derive(Debug, Clone, Default)]
pub struct RowGrouper {
    grouping_field: Option<String>,
    formatter: DateLabelFormatter,
}

impl RowGrouper {
    /// An empty field id means "no grouping".
    pub fn new(grouping_field: Option<&str>, formatter: DateLabelFormatter) -> Self {
        RowGrouper {
            grouping_field: grouping_field
                .filter(|field| !field.is_empty())
                .map(str::to_string),
            formatter,
        }
    }

    pub fn grouping_field(&self) -> Option<&str> {
        self.grouping_field.as_deref()
    }

    pub fn is_grouping(&self) -> bool {
        self.grouping_field.is_some()
    }

    /// Group label for the rendered content of the grouping field.
    pub fn label_for(&self, content: &str) -> String {
        self.formatter.format(&group_key(content))
    }

    /// Partitions rows using each row's own grouping cell. A row without
    /// that cell is grouped under the empty label.
    pub fn group(&self, rows: Vec<Row>) -> GroupedRows {
        let Some(field) = self.grouping_field.as_deref() else {
            return GroupedRows::Flat(rows);
        };

        let mut result = GroupedResult::new();
        for row in rows {
            let label = self.label_for(row.get(field).unwrap_or_default());
            result.push(label, row);
        }
        GroupedRows::Grouped(result)
    }
}

/// Groups rows (convenience wrapper).
pub fn group_rows(
    rows: Vec<Row>,
    grouping_field: Option<&str>,
    formatter: &DateLabelFormatter,
) -> GroupedRows {
    RowGrouper::new(grouping_field, formatter.clone()).group(rows)
}

// ============================================================================
// TESTS
// ============================================================================

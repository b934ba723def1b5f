//! FILENAME: core/accordion-engine/src/engine.rs
//! Accordion Engine - Turns a result set into a renderable payload.
//!
//! This module takes the result rows, the configured fields and the style
//! options and produces a `RenderPayload`.
//!
//! The host is reached only through collaborators handed in at construction:
//! - `FieldRenderer`: rendered content of a field for a result row
//! - `Translator`: user-facing strings
//! - `FieldHandlerRegistry`: field metadata lookup, used for option affordances
//! - `TableRenderer`: the generic table capability (visible fields, header, rows)

use serde::Serialize;

use crate::date_label::DateLabelFormatter;
use crate::definition::{AccordionOptions, FieldDescriptor};
use crate::error::{AccordionError, Result};
use crate::field_type::is_date_field_opt;
use crate::grouping::{GroupedResult, Row, RowGrouper};
use crate::logging::{log_debug, log_error};
use crate::view::{AccordionTable, HeaderCell, RenderPayload, TableBody};

const LOG_CATEGORY: &str = "ACCORDION";

// ============================================================================
// COLLABORATORS
// ============================================================================

/// Supplies the rendered content of a field for a result row.
pub trait FieldRenderer<R: ?Sized> {
    fn rendered_field(&self, row_index: usize, row: &R, field_id: &str) -> String;
}

impl<R: ?Sized, F> FieldRenderer<R> for F
where
    F: Fn(usize, &R, &str) -> String,
{
    fn rendered_field(&self, row_index: usize, row: &R, field_id: &str) -> String {
        self(row_index, row, field_id)
    }
}

/// Rows that are already rendered render as themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrerenderedRows;

impl FieldRenderer<Row> for PrerenderedRows {
    fn rendered_field(&self, _row_index: usize, row: &Row, field_id: &str) -> String {
        row.get(field_id).unwrap_or_default().to_string()
    }
}

/// Translates user-facing strings.
pub trait Translator {
    fn translate(&self, source: &str) -> String;
}

/// Returns strings untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn translate(&self, source: &str) -> String {
        source.to_string()
    }
}

/// Looks up field metadata by id.
pub trait FieldHandlerRegistry {
    fn descriptor(&self, field_id: &str) -> Option<FieldDescriptor>;
}

impl FieldHandlerRegistry for Vec<FieldDescriptor> {
    fn descriptor(&self, field_id: &str) -> Option<FieldDescriptor> {
        self.iter().find(|field| field.id == field_id).cloned()
    }
}

// ============================================================================
// TABLE RENDERER
// ============================================================================

/// Generic table capability: field selection, header and row assembly.
pub trait TableRenderer {
    /// Fields shown as columns, in display order.
    fn visible_fields<'f>(&self, fields: &'f [FieldDescriptor]) -> Vec<&'f FieldDescriptor>;

    fn header(&self, visible: &[&FieldDescriptor]) -> Vec<HeaderCell>;

    /// Builds one row from the content `render` returns per field id.
    fn render_row(&self, visible: &[&FieldDescriptor], render: &mut dyn FnMut(&str) -> String) -> Row;
}

/// Plain table: excluded fields are dropped, labels become the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTableRenderer;

impl TableRenderer for BasicTableRenderer {
    fn visible_fields<'f>(&self, fields: &'f [FieldDescriptor]) -> Vec<&'f FieldDescriptor> {
        fields.iter().filter(|field| field.is_visible()).collect()
    }

    fn header(&self, visible: &[&FieldDescriptor]) -> Vec<HeaderCell> {
        visible
            .iter()
            .map(|field| HeaderCell {
                field_id: field.id.clone(),
                content: field.label.clone(),
            })
            .collect()
    }

    fn render_row(&self, visible: &[&FieldDescriptor], render: &mut dyn FnMut(&str) -> String) -> Row {
        let mut row = Row::new();
        for field in visible {
            row.push(field.id.clone(), render(&field.id));
        }
        row
    }
}

// ============================================================================
// OPTION AFFORDANCES
// ============================================================================

/// Which option controls the configuration form should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OptionsAffordance {
    /// Show the group date format controls.
    pub offer_date_format: bool,
}

/// Date format controls are offered only for a date-like grouping field.
pub fn available_options(grouping_field: Option<&FieldDescriptor>) -> OptionsAffordance {
    OptionsAffordance {
        offer_date_format: is_date_field_opt(grouping_field),
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds accordion table payloads.
pub struct AccordionTableBuilder<F> {
    fields: F,
    table: Box<dyn TableRenderer>,
    translator: Box<dyn Translator>,
    registry: Option<Box<dyn FieldHandlerRegistry>>,
}

impl<F> AccordionTableBuilder<F> {
    pub fn new(fields: F) -> Self {
        AccordionTableBuilder {
            fields,
            table: Box::new(BasicTableRenderer),
            translator: Box::new(NoopTranslator),
            registry: None,
        }
    }

    pub fn field_renderer(&self) -> &F {
        &self.fields
    }

    pub fn with_table_renderer(mut self, table: impl TableRenderer + 'static) -> Self {
        self.table = Box::new(table);
        self
    }

    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    pub fn with_registry(mut self, registry: impl FieldHandlerRegistry + 'static) -> Self {
        self.registry = Some(Box::new(registry));
        self
    }

    /// Option affordances for the configured grouping field, resolved
    /// through the registry. No registry, no date options.
    pub fn available_options_for(&self, options: &AccordionOptions) -> OptionsAffordance {
        let descriptor = options
            .grouping_field()
            .zip(self.registry.as_ref())
            .and_then(|(field, registry)| registry.descriptor(field));

        log_debug!(
            LOG_CATEGORY,
            "grouping field {:?} resolved={}",
            options.grouping_field(),
            descriptor.is_some()
        );
        available_options(descriptor.as_ref())
    }

    /// Builds the payload. Never fails: a missing field configuration becomes
    /// `RenderPayload::ConfigurationError` carrying a translated message.
    pub fn build<R>(
        &self,
        result_rows: &[R],
        field_descriptors: &[FieldDescriptor],
        options: &AccordionOptions,
    ) -> RenderPayload
    where
        F: FieldRenderer<R>,
    {
        match self.try_build(result_rows, field_descriptors, options) {
            Ok(payload) => payload,
            Err(err) => {
                log_error!(LOG_CATEGORY, "{}", err);
                RenderPayload::ConfigurationError {
                    message: self.translator.translate(&err.to_string()),
                }
            }
        }
    }

    /// Like [`build`](Self::build), but reports a missing field configuration
    /// as `AccordionError::NoVisibleFields`.
    pub fn try_build<R>(
        &self,
        result_rows: &[R],
        field_descriptors: &[FieldDescriptor],
        options: &AccordionOptions,
    ) -> Result<RenderPayload>
    where
        F: FieldRenderer<R>,
    {
        if result_rows.is_empty() {
            return Ok(RenderPayload::Empty);
        }

        let visible = self.table.visible_fields(field_descriptors);
        if visible.is_empty() {
            return Err(AccordionError::NoVisibleFields);
        }

        let grouper = RowGrouper::new(
            options.grouping_field(),
            DateLabelFormatter::new(options.group_date_format, &options.group_date_custom_format),
        );

        log_debug!(
            LOG_CATEGORY,
            "build rows={} visible={} grouping={:?} date_format={}",
            result_rows.len(),
            visible.len(),
            grouper.grouping_field(),
            options.group_date_format
        );

        let body = match grouper.grouping_field() {
            None => TableBody::Rows(
                result_rows
                    .iter()
                    .enumerate()
                    .map(|(index, row)| self.render_row(index, row, &visible))
                    .collect(),
            ),
            Some(field) => {
                let mut groups = GroupedResult::new();
                for (index, row) in result_rows.iter().enumerate() {
                    // The grouping field may be excluded, so ask the renderer for it
                    let content = self.fields.rendered_field(index, row, field);
                    groups.push(grouper.label_for(&content), self.render_row(index, row, &visible));
                }
                TableBody::Groups(groups)
            }
        };

        let header = self.table.header(&visible);
        Ok(RenderPayload::Table(AccordionTable::new(header, body, options.clone())))
    }

    fn render_row<R>(&self, index: usize, row: &R, visible: &[&FieldDescriptor]) -> Row
    where
        F: FieldRenderer<R>,
    {
        self.table
            .render_row(visible, &mut |field_id| self.fields.rendered_field(index, row, field_id))
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! FILENAME: core/accordion-engine/src/definition.rs
//! Accordion Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE an accordion table:
//! - Field metadata supplied by the host for one render pass
//! - Style options as stored by the host's configuration store
//!
//! Both are immutable snapshots; nothing here is cached between passes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AccordionError, Result};

/// Default pattern for the `custom` group date format ("January 2025").
pub const DEFAULT_CUSTOM_DATE_FORMAT: &str = "F Y";

// ============================================================================
// FIELD DESCRIPTOR
// ============================================================================

/// A configured field of the result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Machine id, also the key of the field's cell in a row.
    pub id: String,

    /// Column label shown in the table header.
    pub label: String,

    /// Excluded fields are not displayed (they may still drive grouping).
    #[serde(default)]
    pub excluded: bool,

    /// Identifier of the handler plugin that renders this field.
    #[serde(default)]
    pub plugin_id: String,

    /// Storage type of the underlying entity field, when known.
    #[serde(default)]
    pub storage_type: Option<String>,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        FieldDescriptor {
            id: id.into(),
            label: label.into(),
            excluded: false,
            plugin_id: "field".to_string(),
            storage_type: None,
        }
    }

    pub fn with_plugin(mut self, plugin_id: impl Into<String>) -> Self {
        self.plugin_id = plugin_id.into();
        self
    }

    pub fn with_storage_type(mut self, storage_type: impl Into<String>) -> Self {
        self.storage_type = Some(storage_type.into());
        self
    }

    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Returns true if the field is shown as a table column.
    pub fn is_visible(&self) -> bool {
        !self.excluded
    }
}

// ============================================================================
// GROUP DATE FORMAT
// ============================================================================

/// How a date-like group key is rendered in its group header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateGroupFormat {
    /// Use the raw key.
    #[default]
    None,
    /// "January 2025"
    MonthYear,
    /// "January"
    Month,
    /// "2025"
    Year,
    /// User supplied pattern (see `date_label::DateFormatPattern`).
    Custom,
}

impl DateGroupFormat {
    pub const ALL: [DateGroupFormat; 5] = [
        DateGroupFormat::None,
        DateGroupFormat::MonthYear,
        DateGroupFormat::Month,
        DateGroupFormat::Year,
        DateGroupFormat::Custom,
    ];

    /// The stored option value.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateGroupFormat::None => "none",
            DateGroupFormat::MonthYear => "month_year",
            DateGroupFormat::Month => "month",
            DateGroupFormat::Year => "year",
            DateGroupFormat::Custom => "custom",
        }
    }

    /// Label of the choice as offered in the options form.
    pub fn description(&self) -> &'static str {
        match self {
            DateGroupFormat::None => "No formatting (use raw value)",
            DateGroupFormat::MonthYear => "Month Year (January 2025)",
            DateGroupFormat::Month => "Month only (January)",
            DateGroupFormat::Year => "Year only (2025)",
            DateGroupFormat::Custom => "Custom format",
        }
    }
}

impl fmt::Display for DateGroupFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateGroupFormat {
    type Err = AccordionError;

    fn from_str(s: &str) -> Result<Self> {
        DateGroupFormat::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| AccordionError::UnknownDateFormat(s.to_string()))
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// One grouping level. Only the first level is used by the accordion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingSetting {
    /// Id of the grouping field; empty means "no grouping".
    pub field: String,
}

impl GroupingSetting {
    pub fn new(field: impl Into<String>) -> Self {
        GroupingSetting { field: field.into() }
    }
}

/// Style options for an accordion table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionOptions {
    /// Whether group sections are rendered open.
    pub accordion_initially_open: bool,

    /// Presentation of date-like group keys.
    pub group_date_format: DateGroupFormat,

    /// Pattern used when `group_date_format` is `custom`.
    pub group_date_custom_format: String,

    /// Grouping levels inherited from the table style.
    pub grouping: Vec<GroupingSetting>,
}

impl Default for AccordionOptions {
    fn default() -> Self {
        AccordionOptions {
            accordion_initially_open: true,
            group_date_format: DateGroupFormat::None,
            group_date_custom_format: DEFAULT_CUSTOM_DATE_FORMAT.to_string(),
            grouping: Vec::new(),
        }
    }
}

impl AccordionOptions {
    /// Loads options from the configuration store's JSON form.
    /// Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Shortcut for options grouped by `field`.
    pub fn grouped_by(field: impl Into<String>) -> Self {
        AccordionOptions {
            grouping: vec![GroupingSetting::new(field)],
            ..AccordionOptions::default()
        }
    }

    pub fn with_date_format(mut self, format: DateGroupFormat) -> Self {
        self.group_date_format = format;
        self
    }

    pub fn with_custom_format(mut self, pattern: impl Into<String>) -> Self {
        self.group_date_format = DateGroupFormat::Custom;
        self.group_date_custom_format = pattern.into();
        self
    }

    /// The active grouping field, if any.
    pub fn grouping_field(&self) -> Option<&str> {
        self.grouping
            .first()
            .map(|setting| setting.field.as_str())
            .filter(|field| !field.is_empty())
    }
}

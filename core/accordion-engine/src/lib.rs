//! FILENAME: core/accordion-engine/src/lib.rs
//! Accordion table subsystem: grouping and group labels.
//!
//! This crate turns a flat result set into the header/group structure an
//! accordion table is rendered from. It has no host dependencies; field
//! rendering, translation and field lookup are injected.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the table IS)
//! - `field_type`: Date-like field detection for option affordances
//! - `date_label`: Group key -> group label formatting
//! - `grouping`: Order-preserving row partitioning
//! - `view`: Renderable output for templating (WHAT we display)
//! - `engine`: Payload builder (HOW we assemble it)

pub mod logging;
pub mod error;
pub mod definition;
pub mod field_type;
pub mod date_label;
pub mod grouping;
pub mod view;
pub mod engine;

pub use definition::*;
pub use view::*;
pub use error::{AccordionError, Result};
pub use field_type::{is_date_field, is_date_field_opt};
pub use date_label::{format_group_label, parse_year_month, DateFormatPattern, DateLabelFormatter};
pub use grouping::{group_key, group_rows, strip_tags, GroupedResult, GroupedRows, Row, RowCell, RowGroup, RowGrouper};
pub use engine::{
    available_options, AccordionTableBuilder, BasicTableRenderer, FieldHandlerRegistry,
    FieldRenderer, NoopTranslator, OptionsAffordance, PrerenderedRows, TableRenderer, Translator,
};

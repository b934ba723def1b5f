//! FILENAME: core/accordion-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccordionError {
    /// Every configured field is excluded, or none are configured at all.
    #[error("Please add some fields to your view.")]
    NoVisibleFields,

    #[error("Failed to parse date: {key}")]
    DateParse { key: String },

    #[error("Invalid accordion options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("Unknown group date format: {0}")]
    UnknownDateFormat(String),
}

pub type Result<T> = std::result::Result<T, AccordionError>;

//! FILENAME: core/accordion-behavior/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BehaviorError {
    #[error("Unknown element: {0}")]
    UnknownElement(usize),

    #[error("Element {0} cannot be appended inside itself")]
    HierarchyCycle(usize),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

pub type Result<T> = std::result::Result<T, BehaviorError>;

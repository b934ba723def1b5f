//! FILENAME: core/accordion-behavior/src/lib.rs
//! Client-side behavior for accordion tables.
//!
//! Rendered markup is modelled as a small element tree (`dom`). The default
//! markup for a `RenderPayload` comes from `markup::mount_payload`, and the
//! `controller` makes group headers expand and collapse their content panels.

pub mod error;
pub mod dom;
pub mod animation;
pub mod controller;
pub mod markup;

pub use error::{BehaviorError, Result};
pub use dom::{ClickHandler, Document, Element, ElementId, Selector};
pub use animation::{finish_animations, slide_toggle, SlideState};
pub use controller::{
    is_open, toggle, AccordionToggleController, ARIA_EXPANDED, CONTENT_CLASS, HEADER_CLASS,
    ONCE_KEY, OPEN_CLASS, WRAPPER_CLASS,
};
pub use markup::{mount_payload, MESSAGE_CLASS};

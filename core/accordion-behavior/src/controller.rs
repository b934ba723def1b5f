//! FILENAME: core/accordion-behavior/src/controller.rs
//! PURPOSE: Click-to-expand/collapse behavior for rendered accordion tables.
//! CONTEXT: Toggle state lives on the header element itself: the `is-open`
//! class and the mirrored `aria-expanded` attribute. Attaching is idempotent;
//! headers already carrying the once-marker are skipped, so re-running
//! `attach` after a partial page update never doubles a handler.

use std::rc::Rc;

use accordion_engine::logging::{log_debug, log_info};

use crate::animation::slide_toggle;
use crate::dom::{ClickHandler, Document, ElementId, Selector};
use crate::error::Result;

const LOG_CATEGORY: &str = "ACCORDION_UI";

/// Wrapper around every rendered accordion table.
pub const WRAPPER_CLASS: &str = "views-accordion-table-wrapper";
/// Clickable group header.
pub const HEADER_CLASS: &str = "accordion-header";
/// Panel directly after a header.
pub const CONTENT_CLASS: &str = "accordion-content";
/// Present on a header while its group is open.
pub const OPEN_CLASS: &str = "is-open";
/// Once-marker recorded on headers that have a handler.
pub const ONCE_KEY: &str = "accordion-handler";
pub const ARIA_EXPANDED: &str = "aria-expanded";

/// Wires toggle handlers onto accordion headers.
#[derive(Debug, Clone)]
pub struct AccordionToggleController {
    headers: Selector,
}

impl AccordionToggleController {
    pub fn new() -> Result<Self> {
        Ok(AccordionToggleController {
            headers: Selector::parse(&format!(".{} .{}", WRAPPER_CLASS, HEADER_CLASS))?,
        })
    }

    /// Attaches a click handler to every header below `context` that does
    /// not have one yet. Returns the number of newly attached headers.
    pub fn attach(&self, doc: &mut Document, context: ElementId) -> Result<usize> {
        let mut attached = 0;
        for header in doc.query_selector_all(context, &self.headers) {
            if !doc.once(header, ONCE_KEY) {
                continue;
            }
            let handler: ClickHandler = Rc::new(|doc: &mut Document, header: ElementId| {
                toggle(doc, header);
            });
            doc.add_click_listener(header, handler)?;
            attached += 1;
        }

        log_info!(LOG_CATEGORY, "attach context={} attached={}", context.index(), attached);
        Ok(attached)
    }
}

/// Flips a header between open and closed, mirrors `aria-expanded` and
/// slides the content panel. Returns whether the header is now open.
///
/// Without a content panel right after the header, only the header state
/// changes.
pub fn toggle(doc: &mut Document, header: ElementId) -> bool {
    let open = doc.toggle_class(header, OPEN_CLASS);
    doc.set_attribute(header, ARIA_EXPANDED, if open { "true" } else { "false" });

    let panel = doc
        .next_element_sibling(header)
        .filter(|sibling| doc.has_class(*sibling, CONTENT_CLASS));
    match panel {
        Some(panel) => {
            slide_toggle(doc, panel);
        }
        None => log_debug!(LOG_CATEGORY, "header {} has no content panel", header.index()),
    }
    open
}

/// Whether the header's group is open.
pub fn is_open(doc: &Document, header: ElementId) -> bool {
    doc.has_class(header, OPEN_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{finish_animations, SlideState};

    struct Fixture {
        doc: Document,
        wrapper: ElementId,
        header: ElementId,
        panel: ElementId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let root = doc.root();
        let wrapper = doc.append_new(root, "div", &[WRAPPER_CLASS]).unwrap();
        let header = doc.append_new(wrapper, "div", &[HEADER_CLASS]).unwrap();
        doc.set_attribute(header, ARIA_EXPANDED, "false");
        let panel = doc.append_new(wrapper, "div", &[CONTENT_CLASS]).unwrap();
        doc.set_slide_state(panel, SlideState::Hidden);
        Fixture {
            doc,
            wrapper,
            header,
            panel,
        }
    }

    #[test]
    fn test_click_opens_and_mirrors_aria() {
        let mut f = fixture();
        let controller = AccordionToggleController::new().unwrap();
        let root = f.doc.root();
        assert_eq!(controller.attach(&mut f.doc, root).unwrap(), 1);

        f.doc.click(f.header).unwrap();
        assert!(is_open(&f.doc, f.header));
        assert_eq!(f.doc.attribute(f.header, ARIA_EXPANDED), Some("true"));
        assert_eq!(f.doc.slide_state(f.panel), Some(SlideState::Opening));

        finish_animations(&mut f.doc);
        assert_eq!(f.doc.slide_state(f.panel), Some(SlideState::Shown));
    }

    #[test]
    fn test_attach_is_idempotent() {
        let mut f = fixture();
        let controller = AccordionToggleController::new().unwrap();
        let root = f.doc.root();

        assert_eq!(controller.attach(&mut f.doc, root).unwrap(), 1);
        assert_eq!(controller.attach(&mut f.doc, root).unwrap(), 0);
        assert_eq!(controller.attach(&mut f.doc, f.wrapper).unwrap(), 0);
        assert_eq!(f.doc.listener_count(f.header), 1);

        assert_eq!(f.doc.click(f.header).unwrap(), 1);
        assert!(is_open(&f.doc, f.header));
    }

    #[test]
    fn test_two_clicks_round_trip() {
        let mut f = fixture();
        let controller = AccordionToggleController::new().unwrap();
        let root = f.doc.root();
        controller.attach(&mut f.doc, root).unwrap();

        f.doc.click(f.header).unwrap();
        f.doc.click(f.header).unwrap();
        assert!(!is_open(&f.doc, f.header));
        assert_eq!(f.doc.attribute(f.header, ARIA_EXPANDED), Some("false"));

        // The second click reversed the in-flight slide
        finish_animations(&mut f.doc);
        assert_eq!(f.doc.slide_state(f.panel), Some(SlideState::Hidden));
    }

    #[test]
    fn test_header_outside_wrapper_is_ignored() {
        let mut doc = Document::new();
        let root = doc.root();
        let stray = doc.append_new(root, "div", &[HEADER_CLASS]).unwrap();

        let controller = AccordionToggleController::new().unwrap();
        assert_eq!(controller.attach(&mut doc, root).unwrap(), 0);
        assert_eq!(doc.listener_count(stray), 0);
    }

    #[test]
    fn test_missing_panel_still_toggles_header() {
        let mut doc = Document::new();
        let root = doc.root();
        let wrapper = doc.append_new(root, "div", &[WRAPPER_CLASS]).unwrap();
        let header = doc.append_new(wrapper, "div", &[HEADER_CLASS]).unwrap();
        // A sibling that is not a content panel is left alone
        let other = doc.append_new(wrapper, "p", &[]).unwrap();

        let controller = AccordionToggleController::new().unwrap();
        controller.attach(&mut doc, root).unwrap();

        assert_eq!(doc.click(header).unwrap(), 1);
        assert!(is_open(&doc, header));
        assert_eq!(doc.attribute(header, ARIA_EXPANDED), Some("true"));
        assert_eq!(doc.slide_state(other), Some(SlideState::Shown));
        assert_eq!(finish_animations(&mut doc), 0);
    }

    #[test]
    fn test_click_on_header_child_bubbles() {
        let mut f = fixture();
        let label = f.doc.append_new(f.header, "span", &[]).unwrap();
        let controller = AccordionToggleController::new().unwrap();
        let root = f.doc.root();
        controller.attach(&mut f.doc, root).unwrap();

        f.doc.click(label).unwrap();
        assert!(is_open(&f.doc, f.header));
    }
}

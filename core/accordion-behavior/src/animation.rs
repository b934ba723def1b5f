//! FILENAME: core/accordion-behavior/src/animation.rs
//! PURPOSE: Slide-toggle state of content panels.
//! CONTEXT: Each panel animates on its own and nothing waits on it. A toggle
//! while a slide is in flight reverses it, so the last click wins. The host's
//! frame loop settles in-flight slides through `finish_animations`.

use serde::{Deserialize, Serialize};

use crate::dom::{Document, ElementId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideState {
    #[default]
    Shown,
    Hidden,
    /// Sliding down, will end `Shown`.
    Opening,
    /// Sliding up, will end `Hidden`.
    Closing,
}

impl SlideState {
    /// State after a slide toggle.
    pub fn toggled(self) -> Self {
        match self {
            SlideState::Shown | SlideState::Opening => SlideState::Closing,
            SlideState::Hidden | SlideState::Closing => SlideState::Opening,
        }
    }

    /// State once any running slide has completed.
    pub fn settled(self) -> Self {
        match self {
            SlideState::Shown | SlideState::Opening => SlideState::Shown,
            SlideState::Hidden | SlideState::Closing => SlideState::Hidden,
        }
    }

    pub fn is_animating(self) -> bool {
        matches!(self, SlideState::Opening | SlideState::Closing)
    }

    /// A panel is visible while shown or while any slide runs.
    pub fn is_visible(self) -> bool {
        !matches!(self, SlideState::Hidden)
    }
}

/// Starts (or reverses) the slide of `panel`. Returns the new state.
pub fn slide_toggle(doc: &mut Document, panel: ElementId) -> Option<SlideState> {
    let next = doc.slide_state(panel)?.toggled();
    doc.set_slide_state(panel, next);
    Some(next)
}

/// Completes every running slide. Returns how many were running.
pub fn finish_animations(doc: &mut Document) -> usize {
    let running: Vec<ElementId> = doc
        .ids()
        .filter(|id| doc.slide_state(*id).is_some_and(SlideState::is_animating))
        .collect();

    for id in &running {
        if let Some(state) = doc.slide_state(*id) {
            doc.set_slide_state(*id, state.settled());
        }
    }
    running.len()
}

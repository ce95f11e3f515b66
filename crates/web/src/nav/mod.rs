use std::{cell::Cell, rc::Rc};

use gloo_events::EventListener;
use hero_carousel_core::NavToggle;
use web_sys::{Document, Element, Event};

use crate::page::ElementIds;

/// Mobile navigation toggle button and the panel it opens.
pub struct NavBinding {
    _listener: EventListener,
}

impl NavBinding {
    pub fn install(document: &Document, ids: &ElementIds) -> Option<Self> {
        let toggle = document.get_element_by_id(&ids.nav_toggle)?;
        let panel = document.get_element_by_id(&ids.nav_panel)?;

        let state = Rc::new(Cell::new(NavToggle::new()));
        let listener = EventListener::new(&toggle, "click", {
            let toggle = toggle.clone();
            move |_event: &Event| {
                let mut nav = state.get();
                let open = nav.toggle();
                state.set(nav);
                apply(&toggle, &panel, open, nav.aria_expanded());
            }
        });

        Some(Self {
            _listener: listener,
        })
    }
}

fn apply(toggle: &Element, panel: &Element, open: bool, aria_expanded: &str) {
    let _ = panel.class_list().toggle_with_force("open", open);
    let _ = toggle.set_attribute("aria-expanded", aria_expanded);
}

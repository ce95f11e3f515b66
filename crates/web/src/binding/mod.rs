//! Wires DOM events on the hero slider to the carousel controller.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use gloo_events::EventListener;
use hero_carousel_core::{Carousel, CarouselConfig, NavKey};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, Node, TouchEvent};

use crate::{page::ElementIds, scheduler::IntervalScheduler, surface::DomSurface};

pub type WebCarousel = Carousel<DomSurface, IntervalScheduler>;

/// A mounted carousel plus the listeners that feed it.
///
/// Dropping the binding removes every listener and, with the controller,
/// clears the autoplay interval.
pub struct CarouselBinding {
    carousel: Rc<RefCell<WebCarousel>>,
    _listeners: Vec<EventListener>,
}

impl CarouselBinding {
    /// Mounts the carousel if every required element is on the page.
    pub fn install(document: &Document, ids: &ElementIds, config: CarouselConfig) -> Option<Self> {
        let slider = html_element_by_id(document, &ids.slider)?;
        let dots_wrap = document.get_element_by_id(&ids.dots)?;
        let prev = document.get_element_by_id(&ids.prev)?;
        let next = document.get_element_by_id(&ids.next)?;
        let viewport = slider
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())?;

        let target: Rc<RefCell<Weak<RefCell<WebCarousel>>>> = Rc::new(RefCell::new(Weak::new()));
        let scheduler = IntervalScheduler::new({
            let target = Rc::clone(&target);
            move || {
                let Some(carousel) = target.borrow().upgrade() else {
                    return;
                };
                if let Ok(mut carousel) = carousel.try_borrow_mut() {
                    carousel.autoplay_tick();
                };
            }
        });

        let surface = DomSurface::new(document.clone(), slider, viewport.clone(), dots_wrap.clone());
        let slide_count = surface.slide_count();
        let carousel = Rc::new(RefCell::new(Carousel::mount(
            slide_count,
            surface,
            scheduler,
            config,
        )?));
        *target.borrow_mut() = Rc::downgrade(&carousel);

        let listeners = vec![
            on(&prev, "click", &carousel, |c, _| c.go_previous()),
            on(&next, "click", &carousel, |c, _| c.go_next()),
            on(&dots_wrap, "click", &carousel, |c, event| {
                if let Some(index) = clicked_dot_index(event) {
                    c.go_to(index);
                }
            }),
            keyboard_listener(document, &viewport, &carousel),
            on(&viewport, "mouseenter", &carousel, |c, _| c.pause()),
            on(&viewport, "mouseleave", &carousel, |c, _| c.resume()),
            on(&viewport, "focusin", &carousel, |c, _| c.pause()),
            on(&viewport, "focusout", &carousel, |c, _| c.resume()),
            on(&viewport, "touchstart", &carousel, |c, event| {
                if let Some(x) = touch_x(event, TouchPhase::Start) {
                    c.drag_start(x);
                }
            }),
            on(&viewport, "touchmove", &carousel, |c, event| {
                if let Some(x) = touch_x(event, TouchPhase::Move) {
                    c.drag_move(x);
                }
            }),
            on(&viewport, "touchend", &carousel, |c, event| {
                c.drag_end(touch_x(event, TouchPhase::End));
            }),
        ];

        tracing::debug!(slide_count, "hero carousel bound to page");
        Some(Self {
            carousel,
            _listeners: listeners,
        })
    }

    pub fn carousel(&self) -> &Rc<RefCell<WebCarousel>> {
        &self.carousel
    }
}

fn html_element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

/// Registers a listener that runs `handler` against the controller.
fn on(
    target: &Element,
    event_type: &'static str,
    carousel: &Rc<RefCell<WebCarousel>>,
    handler: impl Fn(&mut WebCarousel, &Event) + 'static,
) -> EventListener {
    let carousel = Rc::downgrade(carousel);
    EventListener::new(target, event_type, move |event: &Event| {
        let Some(carousel) = carousel.upgrade() else {
            return;
        };
        if let Ok(mut carousel) = carousel.try_borrow_mut() {
            handler(&mut carousel, event);
        };
    })
}

fn keyboard_listener(
    document: &Document,
    viewport: &HtmlElement,
    carousel: &Rc<RefCell<WebCarousel>>,
) -> EventListener {
    let viewport = viewport.clone();
    let carousel = Rc::downgrade(carousel);
    EventListener::new(document, "keydown", move |event: &Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let target_in_viewport = event
            .target()
            .and_then(|target| target.dyn_into::<Node>().ok())
            .map(|node| viewport.contains(Some(&node)));
        let Some((key, in_carousel)) = arrow_key_press(&event.key(), target_in_viewport) else {
            return;
        };

        let Some(carousel) = carousel.upgrade() else {
            return;
        };
        if let Ok(mut carousel) = carousel.try_borrow_mut() {
            carousel.handle_key(key, in_carousel);
        };
    })
}

/// Maps a key press to a carousel key and whether it happened inside the
/// viewport. A target that is not a DOM node counts as outside.
pub(crate) fn arrow_key_press(key: &str, target_in_viewport: Option<bool>) -> Option<(NavKey, bool)> {
    let key = NavKey::from_key(key)?;
    Some((key, target_in_viewport.unwrap_or(false)))
}

/// Index of the indicator button under a click on the dots container.
fn clicked_dot_index(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest("button[data-index]").ok()??;
    parse_dot_index(button.get_attribute("data-index").as_deref())
}

pub(crate) fn parse_dot_index(value: Option<&str>) -> Option<usize> {
    value?.trim().parse().ok()
}

/// Touch events the viewport listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TouchPhase {
    Start,
    Move,
    End,
}

impl TouchPhase {
    /// `touchend` has no touches left down; the lifted finger is only in
    /// `changedTouches`.
    pub(crate) fn reads_changed_touches(self) -> bool {
        matches!(self, TouchPhase::End)
    }
}

/// X coordinate of the first touch point relevant to `phase`.
fn touch_x(event: &Event, phase: TouchPhase) -> Option<f64> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let list = if phase.reads_changed_touches() {
        event.changed_touches()
    } else {
        event.touches()
    };
    first_touch_x(list.item(0).map(|touch| touch.client_x()))
}

pub(crate) fn first_touch_x(client_x: Option<i32>) -> Option<f64> {
    client_x.map(f64::from)
}

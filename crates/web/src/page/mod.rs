//! Page-ready entry point.

use std::cell::RefCell;

use gloo_events::EventListener;
use hero_carousel_core::CarouselConfig;
use web_sys::{Document, Event};

use crate::{binding::CarouselBinding, lazy::apply_lazy_loading, nav::NavBinding};

/// Attribute on the slider that may carry a JSON carousel config.
pub const CONFIG_ATTRIBUTE: &str = "data-carousel-config";

/// DOM ids of the elements the page script looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub nav_toggle: String,
    pub nav_panel: String,
    pub slider: String,
    pub dots: String,
    pub prev: String,
    pub next: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            nav_toggle: "navToggle".to_string(),
            nav_panel: "mainNav".to_string(),
            slider: "heroSlider".to_string(),
            dots: "heroDots".to_string(),
            prev: "prevHero".to_string(),
            next: "nextHero".to_string(),
        }
    }
}

/// Everything mounted on the page. Lives until unload.
pub struct Page {
    pub nav: Option<NavBinding>,
    pub carousel: Option<CarouselBinding>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

impl Page {
    /// Mounts whichever features have their elements present.
    pub fn mount(document: &Document, ids: &ElementIds) -> Self {
        let config = page_config(document, ids);
        let page = Self {
            nav: NavBinding::install(document, ids),
            carousel: CarouselBinding::install(document, ids, config),
        };
        let lazy = apply_lazy_loading(document);

        tracing::debug!(
            nav = page.nav.is_some(),
            carousel = page.carousel.is_some(),
            lazy_images = lazy.updated,
            "page behaviours mounted"
        );
        page
    }
}

/// Runs [`Page::mount`] now, or once the DOM has been parsed.
pub fn boot(document: Document, ids: ElementIds) {
    if document.ready_state() != "loading" {
        install(&document, &ids);
        return;
    }

    let target = document.clone();
    EventListener::once(&target, "DOMContentLoaded", move |_event: &Event| {
        install(&document, &ids);
    })
    .forget();
}

fn install(document: &Document, ids: &ElementIds) {
    let page = Page::mount(document, ids);
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
}

fn page_config(document: &Document, ids: &ElementIds) -> CarouselConfig {
    let raw = document
        .get_element_by_id(&ids.slider)
        .and_then(|slider| slider.get_attribute(CONFIG_ATTRIBUTE));
    parse_page_config(raw.as_deref())
}

/// Invalid page configs fall back to the defaults rather than disabling the
/// carousel.
pub(crate) fn parse_page_config(raw: Option<&str>) -> CarouselConfig {
    let Some(raw) = raw else {
        return CarouselConfig::default();
    };
    match CarouselConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "ignoring invalid carousel config");
            CarouselConfig::default()
        }
    }
}

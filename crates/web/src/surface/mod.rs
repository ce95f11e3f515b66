//! DOM implementation of the carousel render contract.

use hero_carousel_core::{indicator_label, SlideOffset, SlideSurface};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement};

/// Draws the carousel onto the slider, its slides and the dots container.
///
/// DOM calls that fail are dropped; the carousel is decoration and a failed
/// style write must not break the page.
pub struct DomSurface {
    document: Document,
    slider: HtmlElement,
    viewport: HtmlElement,
    slides: Vec<Element>,
    dots_wrap: Element,
    dots: Vec<Element>,
}

impl DomSurface {
    pub fn new(
        document: Document,
        slider: HtmlElement,
        viewport: HtmlElement,
        dots_wrap: Element,
    ) -> Self {
        let children = slider.children();
        let slides = (0..children.length())
            .filter_map(|index| children.item(index))
            .collect();

        Self {
            document,
            slider,
            viewport,
            slides,
            dots_wrap,
            dots: Vec::new(),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn create_dot(&self, index: usize) -> Result<Element, JsValue> {
        let button = self.document.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_attribute("aria-label", &indicator_label(index))?;
        button.set_attribute("data-index", &index.to_string())?;
        self.dots_wrap.append_child(&button)?;
        Ok(button)
    }
}

impl SlideSurface for DomSurface {
    fn build_indicators(&mut self, count: usize) {
        self.dots_wrap.set_inner_html("");
        self.dots = (0..count)
            .filter_map(|index| match self.create_dot(index) {
                Ok(dot) => Some(dot),
                Err(err) => {
                    tracing::debug!(index, ?err, "could not create indicator");
                    None
                }
            })
            .collect();
    }

    fn set_offset(&mut self, offset: SlideOffset) {
        let _ = self
            .slider
            .style()
            .set_property("transform", &offset.css_transform());
    }

    fn set_transitions(&mut self, enabled: bool) {
        let style = self.slider.style();
        if enabled {
            let _ = style.remove_property("transition");
        } else {
            let _ = style.set_property("transition", "none");
        }
    }

    fn set_slide_hidden(&mut self, index: usize, hidden: bool) {
        if let Some(slide) = self.slides.get(index) {
            let _ = slide.set_attribute("aria-hidden", if hidden { "true" } else { "false" });
        }
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if let Some(dot) = self.dots.get(index) {
            let _ = dot.class_list().toggle_with_force("active", active);
        }
    }

    fn viewport_width(&self) -> f64 {
        f64::from(self.viewport.client_width())
    }
}

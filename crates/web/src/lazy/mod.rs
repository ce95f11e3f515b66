use hero_carousel_core::{needs_lazy_hint, LazyLoadReport, LAZY_LOADING};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// Adds `loading="lazy"` to every image that does not choose a strategy.
///
/// Best effort: hosts that reject the attribute are counted, not reported.
pub fn apply_lazy_loading(document: &Document) -> LazyLoadReport {
    let mut report = LazyLoadReport::default();
    let Ok(images) = document.query_selector_all("img") else {
        return report;
    };

    for index in 0..images.length() {
        let Some(image) = images
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let outcome = needs_lazy_hint(image.get_attribute("loading").as_deref())
            .then(|| image.set_attribute("loading", LAZY_LOADING).is_ok());
        report.record(outcome);
    }

    tracing::debug!(?report, "lazy loading hints applied");
    report
}

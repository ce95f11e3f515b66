//! Browser bindings for the hero carousel.
//!
//! On page ready this mounts the mobile navigation toggle, the hero slider
//! and the lazy-loading shim. Any feature whose elements are missing from the
//! page is skipped without error.

pub mod binding;
pub mod lazy;
pub mod nav;
pub mod page;
pub mod scheduler;
pub mod surface;

pub use binding::{CarouselBinding, WebCarousel};
pub use page::{boot, ElementIds, Page};

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    boot(document, ElementIds::default());
}

//! Lazy-loading hint for page images.

/// Value assigned to the `loading` attribute of images that lack one.
pub const LAZY_LOADING: &str = "lazy";

/// Images that already declare a loading strategy, even an empty one, are
/// left alone.
pub fn needs_lazy_hint(loading_attribute: Option<&str>) -> bool {
    loading_attribute.is_none()
}

/// Counts of what the shim did to a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LazyLoadReport {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl LazyLoadReport {
    pub fn record(&mut self, outcome: Option<bool>) {
        match outcome {
            None => self.skipped += 1,
            Some(true) => self.updated += 1,
            Some(false) => self.failed += 1,
        }
    }
}

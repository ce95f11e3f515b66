use serde::{Deserialize, Serialize};

/// Horizontal position of the slide strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideOffset {
    /// Committed position, one full viewport width per slide.
    Resting { index: usize },
    /// Direct-manipulation feedback while a finger is down.
    Dragging { index: usize, delta_px: f64 },
}

impl SlideOffset {
    /// CSS `transform` value for the slide strip.
    pub fn css_transform(&self) -> String {
        match *self {
            SlideOffset::Resting { index } => format!("translateX(-{}%)", index * 100),
            SlideOffset::Dragging { index, delta_px } => {
                format!("translateX(calc(-{}% + {}px))", index * 100, delta_px)
            }
        }
    }
}

/// Accessible name for the indicator of slide `index`.
pub fn indicator_label(index: usize) -> String {
    format!("슬라이드 {}", index + 1)
}

/// Visual surface the carousel draws on.
///
/// Implementations are expected to be infallible from the controller's point
/// of view; hosts that can fail (the DOM) swallow their own errors.
pub trait SlideSurface {
    /// Replaces any existing indicators with `count` fresh, inactive ones.
    fn build_indicators(&mut self, count: usize);
    fn set_offset(&mut self, offset: SlideOffset);
    /// Enables or suppresses the slide transition animation.
    fn set_transitions(&mut self, enabled: bool);
    fn set_slide_hidden(&mut self, index: usize, hidden: bool);
    fn set_indicator_active(&mut self, index: usize, active: bool);
    /// Width of the clipping viewport in CSS pixels.
    fn viewport_width(&self) -> f64;
}

/// Snapshot of everything a [`SlideSurface`] has been told.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub offset: SlideOffset,
    pub transform: String,
    pub transitions_enabled: bool,
    pub slides_hidden: Vec<bool>,
    pub indicators_active: Vec<bool>,
}

impl ViewState {
    pub fn active_indicators(&self) -> Vec<usize> {
        self.indicators_active
            .iter()
            .enumerate()
            .filter_map(|(index, active)| active.then_some(index))
            .collect()
    }

    pub fn visible_slides(&self) -> Vec<usize> {
        self.slides_hidden
            .iter()
            .enumerate()
            .filter_map(|(index, hidden)| (!hidden).then_some(index))
            .collect()
    }
}

/// In-memory surface used by tests and the command line simulator.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    viewport_width: f64,
    offset: SlideOffset,
    transitions_enabled: bool,
    slides_hidden: Vec<bool>,
    indicators_active: Vec<bool>,
}

impl RecordingSurface {
    pub fn new(slide_count: usize, viewport_width: f64) -> Self {
        Self {
            viewport_width,
            offset: SlideOffset::Resting { index: 0 },
            transitions_enabled: true,
            slides_hidden: vec![false; slide_count],
            indicators_active: Vec::new(),
        }
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn snapshot(&self) -> ViewState {
        ViewState {
            offset: self.offset,
            transform: self.offset.css_transform(),
            transitions_enabled: self.transitions_enabled,
            slides_hidden: self.slides_hidden.clone(),
            indicators_active: self.indicators_active.clone(),
        }
    }
}

impl SlideSurface for RecordingSurface {
    fn build_indicators(&mut self, count: usize) {
        self.indicators_active = vec![false; count];
    }

    fn set_offset(&mut self, offset: SlideOffset) {
        self.offset = offset;
    }

    fn set_transitions(&mut self, enabled: bool) {
        self.transitions_enabled = enabled;
    }

    fn set_slide_hidden(&mut self, index: usize, hidden: bool) {
        if let Some(slot) = self.slides_hidden.get_mut(index) {
            *slot = hidden;
        }
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if let Some(slot) = self.indicators_active.get_mut(index) {
            *slot = active;
        }
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }
}

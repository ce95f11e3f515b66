//! Core library for the hero carousel.
//!
//! Everything here is host independent: the controller talks to the page
//! through the [`SlideSurface`] trait and to the event loop through
//! [`AutoplayScheduler`], so the same logic runs in the browser binding, the
//! command line simulator and the unit tests.

pub mod carousel;
pub mod config;
pub mod error;
pub mod gesture;
pub mod input;
pub mod lazy;
pub mod nav;
pub mod render;
pub mod timeline;

pub use carousel::{normalize_index, Carousel};
pub use config::{AutoplayConfig, CarouselConfig, KeyboardScope, SwipeConfig, MAX_INTERVAL_MS};
pub use error::{CarouselError, Result};
pub use gesture::{GestureState, SwipeOutcome};
pub use input::{InputEvent, NavKey};
pub use lazy::{needs_lazy_hint, LazyLoadReport, LAZY_LOADING};
pub use nav::NavToggle;
pub use render::{indicator_label, RecordingSurface, SlideOffset, SlideSurface, ViewState};
pub use timeline::{AutoplayScheduler, VirtualClock, VirtualTimer};

//! The carousel controller.
//!
//! [`Carousel`] owns the rotation index, the autoplay timer handle and the
//! drag state. Every input channel (buttons, indicators, arrow keys, swipes,
//! hover/focus) ends up in one of its methods, and every state change is
//! pushed to the [`SlideSurface`] immediately.

use std::fmt;

use crate::{
    config::{CarouselConfig, KeyboardScope},
    gesture::{GestureState, SwipeOutcome},
    input::{InputEvent, NavKey},
    render::{SlideOffset, SlideSurface},
    timeline::AutoplayScheduler,
};

/// Wraps any integer index into `[0, len)`.
///
/// Equivalent to `((index % len) + len) % len`, so negative indices count
/// back from the end. `len` must be non-zero.
pub fn normalize_index(index: isize, len: usize) -> usize {
    debug_assert!(len > 0, "cannot normalise into an empty slide set");
    index.rem_euclid(len as isize) as usize
}

pub struct Carousel<S: SlideSurface, T: AutoplayScheduler> {
    surface: S,
    scheduler: T,
    config: CarouselConfig,
    slide_count: usize,
    current: usize,
    autoplay_enabled: bool,
    timer: Option<T::Handle>,
    gesture: GestureState,
}

impl<S: SlideSurface, T: AutoplayScheduler> Carousel<S, T> {
    /// Builds the indicators, shows the first slide and starts autoplay.
    ///
    /// Returns `None` for an empty slide set; there is nothing to rotate.
    pub fn mount(slide_count: usize, surface: S, scheduler: T, config: CarouselConfig) -> Option<Self> {
        if slide_count == 0 {
            tracing::debug!("no slides, carousel disabled");
            return None;
        }

        let autoplay_enabled = config.autoplay.enabled;
        let mut carousel = Self {
            surface,
            scheduler,
            config,
            slide_count,
            current: 0,
            autoplay_enabled,
            timer: None,
            gesture: GestureState::Idle,
        };

        carousel.surface.build_indicators(slide_count);
        carousel.surface.set_indicator_active(0, true);
        carousel.show_slide(0);
        carousel.start_autoplay();

        tracing::debug!(slide_count, autoplay_enabled, "carousel mounted");
        Some(carousel)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_autoplay_enabled(&self) -> bool {
        self.autoplay_enabled
    }

    /// Whether an autoplay timer is currently scheduled.
    pub fn is_autoplay_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Turns autoplay on or off globally. Disabling cancels a running timer.
    pub fn set_autoplay_enabled(&mut self, enabled: bool) {
        self.autoplay_enabled = enabled;
        if enabled {
            self.start_autoplay();
        } else {
            self.stop_autoplay();
        }
    }

    /// Moves to `index`, wrapping it into range, and redraws.
    pub fn show_slide(&mut self, index: isize) {
        let index = normalize_index(index, self.slide_count);
        self.current = index;

        self.surface.set_offset(SlideOffset::Resting { index });
        for slide in 0..self.slide_count {
            self.surface.set_slide_hidden(slide, slide != index);
        }
        for dot in 0..self.slide_count {
            self.surface.set_indicator_active(dot, dot == index);
        }
    }

    pub fn go_previous(&mut self) {
        self.show_slide(self.current as isize - 1);
        self.reset_autoplay();
        tracing::debug!(index = self.current, "previous slide");
    }

    pub fn go_next(&mut self) {
        self.show_slide(self.current as isize + 1);
        self.reset_autoplay();
        tracing::debug!(index = self.current, "next slide");
    }

    /// Jumps straight to a slide, as an indicator click does.
    pub fn go_to(&mut self, index: usize) {
        self.show_slide((index % self.slide_count) as isize);
        self.reset_autoplay();
        tracing::debug!(index = self.current, "jumped to slide");
    }

    /// Schedules the repeating advance unless autoplay is off or already running.
    pub fn start_autoplay(&mut self) {
        if !self.autoplay_enabled || self.timer.is_some() {
            return;
        }
        let period = self.config.autoplay.interval();
        self.timer = Some(self.scheduler.schedule(period));
        tracing::debug!(interval_ms = self.config.autoplay.interval_ms, "autoplay started");
    }

    pub fn stop_autoplay(&mut self) {
        if self.timer.take().is_some() {
            tracing::debug!("autoplay stopped");
        }
    }

    /// Restarts the interval so the next automatic advance is a full period away.
    pub fn reset_autoplay(&mut self) {
        self.stop_autoplay();
        self.start_autoplay();
    }

    /// Timer callback: advance by one without touching the timer.
    pub fn autoplay_tick(&mut self) {
        self.show_slide(self.current as isize + 1);
        tracing::trace!(index = self.current, "autoplay advanced");
    }

    /// Pointer or focus entered the viewport.
    pub fn pause(&mut self) {
        self.stop_autoplay();
    }

    /// Pointer or focus left the viewport.
    pub fn resume(&mut self) {
        if self.autoplay_enabled {
            self.start_autoplay();
        }
    }

    /// Handles an arrow key. `in_carousel` tells whether focus was inside the
    /// viewport, which matters only for [`KeyboardScope::Carousel`].
    ///
    /// Returns `true` when the key moved the carousel.
    pub fn handle_key(&mut self, key: NavKey, in_carousel: bool) -> bool {
        if self.config.keyboard == KeyboardScope::Carousel && !in_carousel {
            return false;
        }
        match key {
            NavKey::ArrowLeft => self.go_previous(),
            NavKey::ArrowRight => self.go_next(),
        }
        true
    }

    pub fn drag_start(&mut self, x: f64) {
        self.stop_autoplay();
        self.gesture.begin(x);
    }

    /// Follows the finger without committing to a slide.
    pub fn drag_move(&mut self, x: f64) {
        let Some(delta_px) = self.gesture.delta(x) else {
            return;
        };
        self.surface.set_transitions(false);
        self.surface.set_offset(SlideOffset::Dragging {
            index: self.current,
            delta_px,
        });
    }

    /// Ends a drag, committing to a neighbour if it travelled far enough.
    ///
    /// Returns the decision, or `None` if no drag was in progress.
    pub fn drag_end(&mut self, x: Option<f64>) -> Option<SwipeOutcome> {
        let threshold = self.config.swipe.threshold(self.surface.viewport_width());
        let outcome = self.gesture.finish(x, threshold)?;

        self.surface.set_transitions(true);
        match outcome {
            SwipeOutcome::Previous => self.go_previous(),
            SwipeOutcome::Next => self.go_next(),
            SwipeOutcome::SnapBack => self.show_slide(self.current as isize),
        }
        tracing::debug!(?outcome, threshold, "swipe finished");

        if self.autoplay_enabled {
            self.start_autoplay();
        }
        Some(outcome)
    }

    /// Routes a recorded input to the matching handler.
    ///
    /// [`InputEvent::Wait`] and keys other than the arrows are ignored here;
    /// returns whether the event was handled.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Prev => self.go_previous(),
            InputEvent::Next => self.go_next(),
            InputEvent::Dot { index } => self.go_to(*index),
            InputEvent::Key { key, in_carousel } => {
                return NavKey::from_key(key)
                    .map(|key| self.handle_key(key, *in_carousel))
                    .unwrap_or(false);
            }
            InputEvent::PointerEnter | InputEvent::FocusIn => self.pause(),
            InputEvent::PointerLeave | InputEvent::FocusOut => self.resume(),
            InputEvent::TouchStart { x } => self.drag_start(*x),
            InputEvent::TouchMove { x } => {
                if !self.gesture.is_dragging() {
                    return false;
                }
                self.drag_move(*x);
            }
            InputEvent::TouchEnd { x } => return self.drag_end(*x).is_some(),
            InputEvent::Wait { .. } => return false,
        }
        true
    }
}

impl<S: SlideSurface, T: AutoplayScheduler> fmt::Debug for Carousel<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("slide_count", &self.slide_count)
            .field("current", &self.current)
            .field("autoplay_enabled", &self.autoplay_enabled)
            .field("timer_active", &self.timer.is_some())
            .field("gesture", &self.gesture)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AutoplayConfig,
        render::RecordingSurface,
        timeline::VirtualClock,
    };

    type TestCarousel = Carousel<RecordingSurface, VirtualClock>;

    fn mount_with(slides: usize, config: CarouselConfig) -> (TestCarousel, VirtualClock) {
        let clock = VirtualClock::new();
        let surface = RecordingSurface::new(slides, 200.0);
        let carousel = Carousel::mount(slides, surface, clock.clone(), config)
            .expect("non-empty carousel should mount");
        (carousel, clock)
    }

    fn mount(slides: usize) -> (TestCarousel, VirtualClock) {
        mount_with(slides, CarouselConfig::default())
    }

    fn run_clock(carousel: &mut TestCarousel, clock: &VirtualClock, ms: u64) -> usize {
        clock.advance(ms, |_| carousel.autoplay_tick())
    }

    fn assert_only_active(carousel: &TestCarousel, index: usize) {
        let view = carousel.surface().snapshot();
        assert_eq!(view.active_indicators(), vec![index]);
        assert_eq!(view.visible_slides(), vec![index]);
        assert_eq!(view.offset, SlideOffset::Resting { index });
    }

    #[test]
    fn normalize_wraps_every_integer() {
        for len in 1..=7usize {
            for index in -30isize..30 {
                let wrapped = normalize_index(index, len);
                assert!(wrapped < len);
                assert_eq!(normalize_index(index + len as isize, len), wrapped);
                assert_eq!(wrapped as isize, ((index % len as isize) + len as isize) % len as isize);
            }
        }
    }

    #[test]
    fn empty_slide_set_does_not_mount() {
        let surface = RecordingSurface::new(0, 200.0);
        assert!(TestCarousel::mount(0, surface, VirtualClock::new(), CarouselConfig::default()).is_none());
    }

    #[test]
    fn mount_shows_first_slide_and_starts_autoplay() {
        let (carousel, clock) = mount(4);

        assert_eq!(carousel.current_index(), 0);
        assert_only_active(&carousel, 0);
        assert!(carousel.is_autoplay_running());
        assert_eq!(clock.active_timers(), 1);
    }

    #[test]
    fn mount_respects_disabled_autoplay() {
        let config = CarouselConfig {
            autoplay: AutoplayConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let (mut carousel, clock) = mount_with(3, config);

        assert!(!carousel.is_autoplay_running());
        carousel.go_next();
        carousel.resume();
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn go_to_wraps_indices_beyond_isize() {
        let (mut carousel, _clock) = mount(3);
        carousel.go_to(usize::MAX);
        assert_eq!(carousel.current_index(), usize::MAX % 3);
        assert_only_active(&carousel, usize::MAX % 3);

        carousel.go_to(isize::MAX as usize + 1);
        assert_eq!(carousel.current_index(), (isize::MAX as usize + 1) % 3);
    }

    #[test]
    fn unbounded_interval_does_not_panic_on_navigation() {
        let config = CarouselConfig {
            autoplay: AutoplayConfig {
                enabled: true,
                interval_ms: u64::MAX,
            },
            ..Default::default()
        };
        let (mut carousel, clock) = mount_with(3, config);
        run_clock(&mut carousel, &clock, 1);
        carousel.go_next();

        assert_eq!(carousel.current_index(), 1);
        assert_eq!(clock.active_timers(), 1);
        assert_eq!(run_clock(&mut carousel, &clock, 60_000), 0);
    }

    #[test]
    fn next_n_times_returns_to_start() {
        let (mut carousel, _clock) = mount(5);
        for _ in 0..5 {
            carousel.go_next();
        }
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn previous_from_first_wraps_to_last() {
        let (mut carousel, _clock) = mount(3);
        carousel.go_previous();
        assert_eq!(carousel.current_index(), 2);
        assert_only_active(&carousel, 2);
    }

    #[test]
    fn show_slide_coerces_out_of_range() {
        let (mut carousel, _clock) = mount(4);
        carousel.show_slide(9);
        assert_eq!(carousel.current_index(), 1);
        carousel.show_slide(-1);
        assert_eq!(carousel.current_index(), 3);
    }

    #[test]
    fn indicator_tracks_every_index() {
        let (mut carousel, _clock) = mount(6);
        for index in 0..6 {
            carousel.go_to(index);
            assert_only_active(&carousel, index);
        }
    }

    #[test]
    fn manual_navigation_keeps_a_single_timer() {
        let (mut carousel, clock) = mount(4);
        carousel.go_next();
        carousel.go_previous();
        carousel.go_to(3);
        carousel.handle_key(NavKey::ArrowRight, false);
        assert_eq!(clock.active_timers(), 1);
    }

    #[test]
    fn manual_navigation_pushes_back_autoplay() {
        let (mut carousel, clock) = mount(4);
        run_clock(&mut carousel, &clock, 4_000);
        carousel.go_next();
        assert_eq!(carousel.current_index(), 1);

        // The old timer would have fired at 5s; the reset one fires at 9s.
        assert_eq!(run_clock(&mut carousel, &clock, 4_999), 0);
        assert_eq!(run_clock(&mut carousel, &clock, 1), 1);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn autoplay_advances_every_interval() {
        let (mut carousel, clock) = mount(3);
        assert_eq!(run_clock(&mut carousel, &clock, 15_000), 3);
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(clock.active_timers(), 1);
    }

    #[test]
    fn stop_twice_is_harmless() {
        let (mut carousel, clock) = mount(3);
        carousel.stop_autoplay();
        carousel.stop_autoplay();
        assert!(!carousel.is_autoplay_running());
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn start_is_idempotent() {
        let (mut carousel, clock) = mount(3);
        carousel.start_autoplay();
        carousel.start_autoplay();
        assert_eq!(clock.active_timers(), 1);
    }

    #[test]
    fn hover_pauses_and_leave_resumes() {
        let (mut carousel, clock) = mount(3);
        carousel.dispatch(&InputEvent::PointerEnter);
        assert_eq!(clock.active_timers(), 0);
        assert_eq!(run_clock(&mut carousel, &clock, 20_000), 0);

        carousel.dispatch(&InputEvent::PointerLeave);
        assert_eq!(clock.active_timers(), 1);

        carousel.dispatch(&InputEvent::FocusIn);
        carousel.dispatch(&InputEvent::FocusOut);
        carousel.dispatch(&InputEvent::FocusOut);
        assert_eq!(clock.active_timers(), 1);
    }

    #[test]
    fn drag_without_movement_keeps_slide() {
        let (mut carousel, _clock) = mount(3);
        carousel.drag_start(100.0);
        carousel.drag_move(100.0);
        assert_eq!(carousel.drag_end(Some(100.0)), Some(SwipeOutcome::SnapBack));
        assert_eq!(carousel.current_index(), 0);
        assert!(carousel.surface().snapshot().transitions_enabled);
    }

    #[test]
    fn leftward_drag_past_threshold_goes_next() {
        let (mut carousel, _clock) = mount(3);
        carousel.drag_start(100.0);
        assert_eq!(carousel.drag_end(Some(60.0)), Some(SwipeOutcome::Next));
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn short_rightward_drag_snaps_back() {
        let (mut carousel, _clock) = mount(3);
        carousel.drag_start(100.0);
        assert_eq!(carousel.drag_end(Some(120.0)), Some(SwipeOutcome::SnapBack));
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn long_rightward_drag_goes_previous() {
        let (mut carousel, _clock) = mount(3);
        carousel.drag_start(100.0);
        assert_eq!(carousel.drag_end(Some(200.0)), Some(SwipeOutcome::Previous));
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn wide_viewport_raises_threshold() {
        let (mut carousel, _clock) = mount(3);
        carousel.surface_mut().set_viewport_width(1000.0);
        carousel.drag_start(100.0);
        assert_eq!(carousel.drag_end(Some(0.0)), Some(SwipeOutcome::SnapBack));
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn drag_move_renders_transient_offset() {
        let (mut carousel, _clock) = mount(3);
        carousel.go_to(1);
        carousel.drag_start(100.0);
        carousel.drag_move(85.0);

        let view = carousel.surface().snapshot();
        assert!(!view.transitions_enabled);
        assert_eq!(
            view.offset,
            SlideOffset::Dragging {
                index: 1,
                delta_px: -15.0
            }
        );
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn drag_pauses_then_restores_autoplay() {
        let (mut carousel, clock) = mount(3);
        carousel.drag_start(100.0);
        assert_eq!(clock.active_timers(), 0);
        assert!(carousel.gesture().is_dragging());

        carousel.drag_end(Some(100.0));
        assert_eq!(clock.active_timers(), 1);
        assert_eq!(carousel.gesture(), GestureState::Idle);

        carousel.drag_start(100.0);
        carousel.drag_end(Some(0.0));
        assert_eq!(clock.active_timers(), 1);
    }

    #[test]
    fn stray_move_and_end_are_ignored() {
        let (mut carousel, clock) = mount(3);
        assert!(!carousel.dispatch(&InputEvent::TouchMove { x: 10.0 }));
        assert!(!carousel.dispatch(&InputEvent::TouchEnd { x: Some(-500.0) }));
        assert_only_active(&carousel, 0);
        assert!(carousel.surface().snapshot().transitions_enabled);
        assert_eq!(clock.active_timers(), 1);
    }

    #[test]
    fn single_slide_navigation_stays_put() {
        let (mut carousel, clock) = mount(1);
        carousel.go_next();
        carousel.go_previous();
        carousel.go_to(7);
        carousel.drag_start(100.0);
        carousel.drag_end(Some(0.0));
        run_clock(&mut carousel, &clock, 10_000);

        assert_eq!(carousel.current_index(), 0);
        assert_only_active(&carousel, 0);
    }

    #[test]
    fn page_scope_accepts_keys_anywhere() {
        let (mut carousel, _clock) = mount(3);
        assert!(carousel.handle_key(NavKey::ArrowRight, false));
        assert!(carousel.handle_key(NavKey::ArrowRight, true));
        assert_eq!(carousel.current_index(), 2);
        assert!(carousel.handle_key(NavKey::ArrowLeft, false));
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn carousel_scope_requires_focus_inside() {
        let config = CarouselConfig {
            keyboard: KeyboardScope::Carousel,
            ..Default::default()
        };
        let (mut carousel, _clock) = mount_with(3, config);
        assert!(!carousel.handle_key(NavKey::ArrowRight, false));
        assert_eq!(carousel.current_index(), 0);
        assert!(carousel.handle_key(NavKey::ArrowRight, true));
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn dispatch_ignores_other_keys_and_waits() {
        let (mut carousel, _clock) = mount(3);
        assert!(!carousel.dispatch(&InputEvent::Key {
            key: "Enter".to_string(),
            in_carousel: true,
        }));
        assert!(!carousel.dispatch(&InputEvent::Wait { ms: 100 }));
        assert!(carousel.dispatch(&InputEvent::Dot { index: 2 }));
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn disabling_autoplay_cancels_timer() {
        let (mut carousel, clock) = mount(3);
        carousel.set_autoplay_enabled(false);
        assert_eq!(clock.active_timers(), 0);
        carousel.resume();
        assert_eq!(clock.active_timers(), 0);
        carousel.set_autoplay_enabled(true);
        assert_eq!(clock.active_timers(), 1);
    }

    #[test]
    fn dropping_carousel_cancels_timer() {
        let (carousel, clock) = mount(3);
        drop(carousel);
        assert_eq!(clock.active_timers(), 0);
    }
}

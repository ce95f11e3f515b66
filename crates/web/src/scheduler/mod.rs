use std::{rc::Rc, time::Duration};

use gloo_timers::callback::Interval;
use hero_carousel_core::AutoplayScheduler;

/// Autoplay scheduler backed by `setInterval`.
///
/// Every interval it creates runs the same `on_tick` callback. The returned
/// [`Interval`] clears itself when dropped.
pub struct IntervalScheduler {
    on_tick: Rc<dyn Fn()>,
}

impl IntervalScheduler {
    pub fn new(on_tick: impl Fn() + 'static) -> Self {
        Self {
            on_tick: Rc::new(on_tick),
        }
    }
}

impl AutoplayScheduler for IntervalScheduler {
    type Handle = Interval;

    fn schedule(&mut self, period: Duration) -> Interval {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        let on_tick = Rc::clone(&self.on_tick);
        Interval::new(millis, move || on_tick())
    }
}

//! Timer abstraction for autoplay.
//!
//! A scheduler hands out a handle per repeating timer; dropping the handle
//! cancels the timer. The browser binding backs this with `setInterval`, while
//! [`VirtualClock`] drives it deterministically for tests and the simulator.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
    time::Duration,
};

/// Something that can run a repeating callback on the host event loop.
///
/// The callback target is fixed when the scheduler is built; `schedule`
/// only decides the period. The returned handle must cancel the timer when
/// dropped.
pub trait AutoplayScheduler {
    type Handle;

    fn schedule(&mut self, period: Duration) -> Self::Handle;
}

pub type TimerId = u64;

#[derive(Debug, Clone, Copy)]
struct VirtualTimerEntry {
    period_ms: u64,
    /// `None` once the next tick would land past the end of time.
    next_due_ms: Option<u64>,
}

#[derive(Debug, Default)]
struct ClockState {
    now_ms: u64,
    next_id: TimerId,
    timers: BTreeMap<TimerId, VirtualTimerEntry>,
}

/// Deterministic clock with repeating timers, advanced manually.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of timers that are scheduled and not yet cancelled.
    pub fn active_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Moves time forward by `ms`, calling `on_fire` for every timer tick that
    /// falls inside the window, in due order.
    ///
    /// The clock is not borrowed while `on_fire` runs, so the callback may
    /// create or drop timers. Returns the number of ticks delivered.
    pub fn advance(&self, ms: u64, mut on_fire: impl FnMut(TimerId)) -> usize {
        let deadline = self.now_ms().saturating_add(ms);
        let mut fired = 0;

        loop {
            let due = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .timers
                    .iter()
                    .filter_map(|(id, entry)| {
                        entry
                            .next_due_ms
                            .filter(|due_ms| *due_ms <= deadline)
                            .map(|due_ms| (*id, due_ms))
                    })
                    .min_by_key(|(id, due_ms)| (*due_ms, *id));

                match next {
                    Some((id, due_ms)) => {
                        state.now_ms = due_ms;
                        if let Some(entry) = state.timers.get_mut(&id) {
                            entry.next_due_ms = due_ms.checked_add(entry.period_ms);
                        }
                        Some(id)
                    }
                    None => None,
                }
            };

            match due {
                Some(id) => {
                    fired += 1;
                    on_fire(id);
                }
                None => break,
            }
        }

        self.state.borrow_mut().now_ms = deadline;
        fired
    }
}

impl AutoplayScheduler for VirtualClock {
    type Handle = VirtualTimer;

    fn schedule(&mut self, period: Duration) -> VirtualTimer {
        let period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX).max(1);
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let next_due_ms = state.now_ms.checked_add(period_ms);
        state.timers.insert(
            id,
            VirtualTimerEntry {
                period_ms,
                next_due_ms,
            },
        );
        tracing::trace!(id, period_ms, "virtual timer scheduled");

        VirtualTimer {
            id,
            clock: Rc::downgrade(&self.state),
        }
    }
}

/// Handle to a [`VirtualClock`] timer. Cancels the timer on drop.
#[derive(Debug)]
pub struct VirtualTimer {
    id: TimerId,
    clock: Weak<RefCell<ClockState>>,
}

impl VirtualTimer {
    pub fn id(&self) -> TimerId {
        self.id
    }
}

impl Drop for VirtualTimer {
    fn drop(&mut self) {
        if let Some(state) = self.clock.upgrade() {
            state.borrow_mut().timers.remove(&self.id);
        }
    }
}

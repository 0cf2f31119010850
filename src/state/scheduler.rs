//! Timer scheduling - the one place where time enters the engine.
//!
//! A [`Scheduler`] is a deadline queue owned by the host loop. Producers
//! register one-shot timeouts and repeating intervals and get back a
//! [`TimerId`] that they clear on teardown. The host calls
//! [`Scheduler::run_due`] whenever it wakes and sleeps for
//! [`Scheduler::time_until_next`] in between. Nothing here spawns threads:
//! every callback runs on the caller's thread, in deadline order.
//!
//! # Example
//!
//! ```ignore
//! let scheduler = Scheduler::new(Rc::new(SystemClock));
//! let id = scheduler.set_interval(Duration::milliseconds(1000), || tick());
//!
//! loop {
//!     scheduler.run_due();
//!     // sleep for scheduler.time_until_next() ...
//! }
//!
//! scheduler.clear(id);
//! ```

use std::cell::{Cell, RefCell};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

// =============================================================================
// CLOCKS
// =============================================================================

/// `at + by`, clamped to the representable range instead of panicking.
fn saturating_add(at: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    at.checked_add_signed(by).unwrap_or(if by < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Wall-clock time source.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(saturating_add(self.now.get(), by));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

// =============================================================================
// TIMER QUEUE
// =============================================================================

/// Handle to a registered timer. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

type TimerCallback = Rc<dyn Fn()>;

struct TimerEntry {
    callback: TimerCallback,
    /// `Some` for repeating timers.
    period: Option<Duration>,
}

/// Heap key: earliest deadline first, registration order breaks ties.
type HeapKey = Reverse<(DateTime<Utc>, u64, TimerId)>;

#[derive(Default)]
struct TimerQueue {
    entries: HashMap<TimerId, TimerEntry>,
    heap: BinaryHeap<HeapKey>,
    next_id: u64,
    next_seq: u64,
}

impl TimerQueue {
    fn push(&mut self, deadline: DateTime<Utc>, id: TimerId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((deadline, seq, id)));
    }

    fn insert(&mut self, deadline: DateTime<Utc>, entry: TimerEntry) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, entry);
        self.push(deadline, id);
        id
    }

    /// Drop heap keys whose timer was cleared.
    fn prune(&mut self) {
        while let Some(Reverse((_, _, id))) = self.heap.peek() {
            if self.entries.contains_key(id) {
                break;
            }
            self.heap.pop();
        }
    }

    fn next_deadline(&mut self) -> Option<DateTime<Utc>> {
        self.prune();
        self.heap.peek().map(|Reverse((deadline, _, _))| *deadline)
    }

    /// Pop the next timer due at `now`, rescheduling it if it repeats.
    fn pop_due(&mut self, now: DateTime<Utc>) -> Option<(TimerId, TimerCallback)> {
        self.prune();
        let Reverse((deadline, _, id)) = *self.heap.peek()?;
        if deadline > now {
            return None;
        }
        self.heap.pop();

        let (callback, period) = {
            let entry = self.entries.get(&id)?;
            (entry.callback.clone(), entry.period)
        };
        match period {
            Some(period) => {
                // Missed ticks coalesce into one.
                let mut next = saturating_add(deadline, period);
                if next <= now {
                    next = saturating_add(now, period);
                }
                self.push(next, id);
            }
            None => {
                self.entries.remove(&id);
            }
        }
        Some((id, callback))
    }
}

// =============================================================================
// SCHEDULER
// =============================================================================

const MIN_PERIOD_MS: i64 = 1;

/// Shared handle to the host's timer queue.
///
/// Cloning is cheap; all clones see the same queue and clock.
#[derive(Clone)]
pub struct Scheduler {
    queue: Rc<RefCell<TimerQueue>>,
    clock: Rc<dyn Clock>,
}

impl Scheduler {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            queue: Rc::new(RefCell::new(TimerQueue::default())),
            clock,
        }
    }

    /// Current time according to the scheduler's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Run `callback` once, `delay` from now.
    pub fn set_timeout<F>(&self, delay: Duration, callback: F) -> TimerId
    where
        F: Fn() + 'static,
    {
        let deadline = saturating_add(self.now(), delay.max(Duration::zero()));
        let id = self.queue.borrow_mut().insert(
            deadline,
            TimerEntry {
                callback: Rc::new(callback),
                period: None,
            },
        );
        tracing::trace!(?id, %deadline, "timeout scheduled");
        id
    }

    /// Run `callback` every `period`, first firing one period from now.
    ///
    /// Periods below one millisecond are raised to one millisecond.
    pub fn set_interval<F>(&self, period: Duration, callback: F) -> TimerId
    where
        F: Fn() + 'static,
    {
        let period = period.max(Duration::milliseconds(MIN_PERIOD_MS));
        let deadline = saturating_add(self.now(), period);
        let id = self.queue.borrow_mut().insert(
            deadline,
            TimerEntry {
                callback: Rc::new(callback),
                period: Some(period),
            },
        );
        tracing::trace!(?id, period_ms = period.num_milliseconds(), "interval scheduled");
        id
    }

    /// Cancel a timer.
    ///
    /// Returns `true` if the timer was still pending. Clearing an unknown,
    /// fired or already-cleared timer is a no-op.
    pub fn clear(&self, id: TimerId) -> bool {
        let removed = self.queue.borrow_mut().entries.remove(&id).is_some();
        if removed {
            tracing::trace!(?id, "timer cleared");
        }
        removed
    }

    /// Check whether a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.queue.borrow().entries.contains_key(&id)
    }

    /// Number of pending timers. A torn-down view should leave this unchanged.
    pub fn active_count(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.queue.borrow_mut().next_deadline()
    }

    /// How long the host may sleep before the next timer is due.
    ///
    /// `None` if nothing is scheduled, zero if something is already due.
    pub fn time_until_next(&self) -> Option<std::time::Duration> {
        let deadline = self.next_deadline()?;
        Some(
            (deadline - self.now())
                .to_std()
                .unwrap_or(std::time::Duration::ZERO),
        )
    }

    /// Fire every timer due at the current time, in deadline order.
    ///
    /// The queue is not borrowed while a callback runs, so callbacks may
    /// freely schedule or clear timers (including their own).
    /// Returns the number of callbacks invoked.
    pub fn run_due(&self) -> usize {
        let now = self.now();
        let mut fired = 0;
        loop {
            let due = self.queue.borrow_mut().pop_due(now);
            let Some((id, callback)) = due else {
                break;
            };
            tracing::trace!(?id, "timer fired");
            callback();
            fired += 1;
        }
        fired
    }
}

// =============================================================================
// VIRTUAL TIME
// =============================================================================

/// A manual clock paired with a scheduler, for deterministic stepping.
///
/// [`VirtualTime::advance`] walks the clock from deadline to deadline, so
/// each callback observes `now` equal to its own deadline.
pub struct VirtualTime {
    clock: Rc<ManualClock>,
    scheduler: Scheduler,
}

impl VirtualTime {
    pub fn new(start: DateTime<Utc>) -> Self {
        let clock = Rc::new(ManualClock::new(start));
        let scheduler = Scheduler::new(clock.clone());
        Self { clock, scheduler }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Move time forward by `by`, firing every timer that falls due.
    ///
    /// Returns the number of callbacks invoked.
    pub fn advance(&self, by: Duration) -> usize {
        let target = saturating_add(self.clock.now(), by);
        let mut fired = 0;
        while let Some(next) = self.scheduler.next_deadline() {
            if next > target {
                break;
            }
            if next > self.clock.now() {
                self.clock.set(next);
            }
            fired += self.scheduler.run_due();
        }
        self.clock.set(target);
        fired
    }

    /// Shorthand for [`VirtualTime::advance`] in milliseconds.
    pub fn advance_ms(&self, ms: i64) -> usize {
        self.advance(Duration::milliseconds(ms))
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Countdown Clock - remaining time to a fixed target instant.
//!
//! # Lifecycle
//!
//! ```text
//! Initializing ──(target in future)──→ Ticking ──(diff ≤ 0)──→ Expired
//!      │                                  │
//!      └──(target already past)──→ Expired └──(stop)──→ Stopped
//! ```
//!
//! The first value is computed synchronously in [`CountdownClock::start`], so
//! a renderer never sees an unset countdown. Expiring cancels the repeating
//! timer rather than letting it idle.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use spark_signals::{batch, signal, Signal};

use crate::types::{CountdownPhase, CountdownState};
use super::scheduler::{Scheduler, TimerId};

/// Countdown producer bound to one scheduler.
pub struct CountdownClock {
    scheduler: Scheduler,
    target: DateTime<Utc>,
    state: Signal<CountdownState>,
    phase: Signal<CountdownPhase>,
    timer: Rc<Cell<Option<TimerId>>>,
}

/// Recompute the countdown from the scheduler's clock.
///
/// Expiry zeroes the state and cancels the repeating timer.
fn refresh(
    scheduler: &Scheduler,
    target: DateTime<Utc>,
    state: &Signal<CountdownState>,
    phase: &Signal<CountdownPhase>,
    timer: &Cell<Option<TimerId>>,
) {
    if matches!(phase.get(), CountdownPhase::Expired | CountdownPhase::Stopped) {
        return;
    }

    let diff_ms = (target - scheduler.now()).num_milliseconds();
    if diff_ms <= 0 {
        batch(|| {
            state.set(CountdownState::ZERO);
            phase.set(CountdownPhase::Expired);
        });
        if let Some(id) = timer.take() {
            scheduler.clear(id);
        }
        tracing::debug!(target_at = %target, "countdown expired");
    } else {
        state.set(CountdownState::from_millis(diff_ms));
    }
}

impl CountdownClock {
    /// Compute the first value and start ticking every `tick`.
    ///
    /// A target at or before now goes straight to `Expired` without
    /// scheduling anything.
    pub fn start(scheduler: &Scheduler, target: DateTime<Utc>, tick: Duration) -> Self {
        let clock = Self {
            scheduler: scheduler.clone(),
            target,
            state: signal(CountdownState::ZERO),
            phase: signal(CountdownPhase::Initializing),
            timer: Rc::new(Cell::new(None)),
        };

        // First value and phase land together
        batch(|| {
            refresh(scheduler, target, &clock.state, &clock.phase, &clock.timer);
            if clock.phase.get() != CountdownPhase::Expired {
                clock.phase.set(CountdownPhase::Ticking);
            }
        });
        if clock.phase.get() == CountdownPhase::Expired {
            return clock;
        }

        let sched = scheduler.clone();
        let state = clock.state.clone();
        let phase = clock.phase.clone();
        let timer = clock.timer.clone();
        let id = scheduler.set_interval(tick, move || {
            refresh(&sched, target, &state, &phase, &timer);
        });
        clock.timer.set(Some(id));
        tracing::debug!(
            target_at = %target,
            tick_ms = tick.num_milliseconds(),
            "countdown started"
        );

        clock
    }

    pub fn state(&self) -> CountdownState {
        self.state.get()
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase.get()
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn is_ticking(&self) -> bool {
        self.phase() == CountdownPhase::Ticking
    }

    /// The underlying signal, for renderer effects.
    pub fn signal(&self) -> Signal<CountdownState> {
        self.state.clone()
    }

    pub fn phase_signal(&self) -> Signal<CountdownPhase> {
        self.phase.clone()
    }

    /// Cancel the repeating timer.
    ///
    /// Returns `true` if a live timer was cancelled. Safe to call any number
    /// of times; an expired countdown stays `Expired`.
    pub fn stop(&self) -> bool {
        let cancelled = match self.timer.take() {
            Some(id) => self.scheduler.clear(id),
            None => false,
        };
        if matches!(
            self.phase.get(),
            CountdownPhase::Initializing | CountdownPhase::Ticking
        ) {
            self.phase.set(CountdownPhase::Stopped);
            tracing::debug!("countdown stopped");
        }
        cancelled
    }
}

impl Drop for CountdownClock {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scheduler::VirtualTime;
    use chrono::TimeZone;

    const TICK: i64 = 1000;

    fn setup() -> VirtualTime {
        VirtualTime::new(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
    }

    fn start(vt: &VirtualTime, remaining: Duration) -> CountdownClock {
        CountdownClock::start(
            vt.scheduler(),
            vt.now() + remaining,
            Duration::milliseconds(TICK),
        )
    }

    fn dhms(days: u64, hours: u64, minutes: u64, seconds: u64) -> CountdownState {
        CountdownState {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    #[test]
    fn test_initial_value_computed_at_start() {
        let vt = setup();
        let clock = start(&vt, Duration::hours(50) + Duration::seconds(7));

        assert_eq!(clock.phase(), CountdownPhase::Ticking);
        assert_eq!(clock.state(), dhms(2, 2, 0, 7));
        assert_eq!(vt.scheduler().active_count(), 1);
    }

    #[test]
    fn test_tick_recomputes() {
        let vt = setup();
        let clock = start(&vt, Duration::minutes(2));
        assert_eq!(clock.state(), dhms(0, 0, 2, 0));

        vt.advance_ms(TICK);
        assert_eq!(clock.state(), dhms(0, 0, 1, 59));

        vt.advance_ms(59 * TICK);
        assert_eq!(clock.state(), dhms(0, 0, 1, 0));
    }

    #[test]
    fn test_day_boundary() {
        let vt = setup();
        let clock = start(&vt, Duration::days(1) + Duration::seconds(1));
        assert_eq!(clock.state(), dhms(1, 0, 0, 1));

        vt.advance_ms(TICK);
        assert_eq!(clock.state(), dhms(1, 0, 0, 0));

        vt.advance_ms(TICK);
        assert_eq!(clock.state(), dhms(0, 23, 59, 59));
    }

    #[test]
    fn test_past_target_expires_immediately() {
        let vt = setup();
        let clock = start(&vt, Duration::seconds(-30));

        assert_eq!(clock.phase(), CountdownPhase::Expired);
        assert_eq!(clock.state(), CountdownState::ZERO);
        assert_eq!(vt.scheduler().active_count(), 0);

        vt.advance_ms(10 * TICK);
        assert_eq!(clock.state(), CountdownState::ZERO);
    }

    #[test]
    fn test_target_equal_to_now_is_expired() {
        let vt = setup();
        let clock = start(&vt, Duration::zero());
        assert_eq!(clock.phase(), CountdownPhase::Expired);
    }

    #[test]
    fn test_expiry_cancels_timer() {
        let vt = setup();
        let clock = start(&vt, Duration::seconds(3));

        vt.advance_ms(2 * TICK);
        assert_eq!(clock.state(), dhms(0, 0, 0, 1));
        assert!(clock.is_ticking());

        vt.advance_ms(TICK);
        assert_eq!(clock.phase(), CountdownPhase::Expired);
        assert_eq!(clock.state(), CountdownState::ZERO);
        assert_eq!(vt.scheduler().active_count(), 0);

        // No further wakeups once expired
        assert_eq!(vt.advance_ms(60 * TICK), 0);
        assert_eq!(clock.state(), CountdownState::ZERO);
    }

    #[test]
    fn test_stop_freezes_state() {
        let vt = setup();
        let clock = start(&vt, Duration::minutes(10));
        vt.advance_ms(5 * TICK);
        let frozen = clock.state();

        assert!(clock.stop());
        assert_eq!(clock.phase(), CountdownPhase::Stopped);
        assert_eq!(vt.scheduler().active_count(), 0);

        vt.advance_ms(30 * TICK);
        assert_eq!(clock.state(), frozen);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let vt = setup();
        let clock = start(&vt, Duration::minutes(1));

        assert!(clock.stop());
        assert!(!clock.stop());
        assert_eq!(clock.phase(), CountdownPhase::Stopped);
    }

    #[test]
    fn test_stop_after_expiry_keeps_expired() {
        let vt = setup();
        let clock = start(&vt, Duration::seconds(1));
        vt.advance_ms(TICK);

        assert!(!clock.stop());
        assert_eq!(clock.phase(), CountdownPhase::Expired);
    }

    #[test]
    fn test_drop_cancels_timer() {
        let vt = setup();
        {
            let _clock = start(&vt, Duration::hours(1));
            assert_eq!(vt.scheduler().active_count(), 1);
        }
        assert_eq!(vt.scheduler().active_count(), 0);
    }

    #[test]
    fn test_fields_never_exceed_unit_range() {
        let vt = setup();
        let clock = start(&vt, Duration::days(3) + Duration::milliseconds(1500));
        for _ in 0..200 {
            let s = clock.state();
            assert!(s.hours < 24 && s.minutes < 60 && s.seconds < 60);
            vt.advance_ms(TICK * 37);
        }
    }
}

//! Scroll State Module
//!
//! Samples the page scroll position and derives:
//! - `past_threshold` for the navbar background
//! - a clamped `offset`, mapped into the hero fade and parallax translate
//!
//! Architecture:
//! - [`ScrollSource`] = the host's scroll signal (position + listener registry)
//! - [`ScrollTracker`] = one subscription, owning the derived [`ScrollState`]
//!
//! Each event is an immediate pure recomputation from the raw position.
//! Nothing is accumulated, so event order only matters for which value is
//! latest.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};

use crate::config::ScrollConfig;
use crate::types::ScrollState;

// =============================================================================
// PURE MAPPING
// =============================================================================

/// Map `value` linearly from `[in_start, in_end]` to `[out_start, out_end]`,
/// clamping outside the input range.
pub fn map_range(value: f64, in_start: f64, in_end: f64, out_start: f64, out_end: f64) -> f64 {
    if in_end == in_start {
        return if value < in_start { out_start } else { out_end };
    }
    let t = ((value - in_start) / (in_end - in_start)).clamp(0.0, 1.0);
    out_start + (out_end - out_start) * t
}

/// Treat NaN and negative positions as the top of the page.
fn sanitize(scroll_y: f64) -> f64 {
    if scroll_y.is_nan() { 0.0 } else { scroll_y.max(0.0) }
}

/// Derive the scroll state for a raw position.
pub fn compute_scroll_state(scroll_y: f64, config: &ScrollConfig) -> ScrollState {
    let y = sanitize(scroll_y);
    ScrollState {
        past_threshold: y > config.threshold,
        offset: y.min(config.max_offset()),
    }
}

/// Hero opacity: 1 at the top, 0 at `fade_end`.
pub fn hero_opacity(state: &ScrollState, config: &ScrollConfig) -> f64 {
    map_range(state.offset, 0.0, config.fade_end, 1.0, 0.0)
}

/// Hero parallax translate: 0 at the top, `translate_distance` at `translate_end`.
pub fn hero_translate(state: &ScrollState, config: &ScrollConfig) -> f64 {
    map_range(
        state.offset,
        0.0,
        config.translate_end,
        0.0,
        config.translate_distance,
    )
}

// =============================================================================
// SCROLL SOURCE
// =============================================================================

/// Handler for scroll events. Receives the raw position.
pub type ScrollHandler = Rc<dyn Fn(f64)>;

struct SourceInner {
    position: f64,
    handlers: Vec<(usize, ScrollHandler)>,
    next_id: usize,
}

/// The host's scroll signal.
///
/// The host calls [`ScrollSource::dispatch`] for every scroll event;
/// subscribers are notified in registration order.
#[derive(Clone)]
pub struct ScrollSource {
    inner: Rc<RefCell<SourceInner>>,
}

impl Default for ScrollSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSource {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SourceInner {
                position: 0.0,
                handlers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Latest raw position.
    pub fn position(&self) -> f64 {
        self.inner.borrow().position
    }

    /// Number of live subscriptions. Anything left after teardown is a leak.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    /// Subscribe to scroll events.
    /// Returns cleanup function.
    pub fn on_scroll<F>(&self, handler: F) -> Box<dyn FnOnce()>
    where
        F: Fn(f64) + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.handlers.push((id, Rc::new(handler)));
            id
        };

        let weak: Weak<RefCell<SourceInner>> = Rc::downgrade(&self.inner);
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .handlers
                    .retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    /// Record a new position and notify subscribers.
    pub fn dispatch(&self, scroll_y: f64) {
        let handlers: Vec<ScrollHandler> = {
            let mut inner = self.inner.borrow_mut();
            inner.position = scroll_y;
            inner.handlers.iter().map(|(_, h)| h.clone()).collect()
        };
        for handler in handlers {
            handler(scroll_y);
        }
    }
}

// =============================================================================
// SCROLL TRACKER
// =============================================================================

/// Scroll producer: one subscription to a [`ScrollSource`].
pub struct ScrollTracker {
    state: Signal<ScrollState>,
    config: ScrollConfig,
    cleanup: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl ScrollTracker {
    /// Subscribe to `source` and sample its current position immediately.
    pub fn subscribe(source: &ScrollSource, config: ScrollConfig) -> Self {
        let state = signal(compute_scroll_state(source.position(), &config));

        let writer = state.clone();
        let cleanup = source.on_scroll(move |scroll_y| {
            writer.set(compute_scroll_state(scroll_y, &config));
        });
        tracing::debug!(threshold = config.threshold, "scroll tracker subscribed");

        Self {
            state,
            config,
            cleanup: RefCell::new(Some(cleanup)),
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state.get()
    }

    /// The underlying signal, for renderer effects.
    pub fn signal(&self) -> Signal<ScrollState> {
        self.state.clone()
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn hero_opacity(&self) -> f64 {
        hero_opacity(&self.state(), &self.config)
    }

    pub fn hero_translate(&self) -> f64 {
        hero_translate(&self.state(), &self.config)
    }

    pub fn is_subscribed(&self) -> bool {
        self.cleanup.borrow().is_some()
    }

    /// Release the subscription.
    ///
    /// Returns `true` the first time; later calls do nothing.
    pub fn dispose(&self) -> bool {
        let cleanup = self.cleanup.borrow_mut().take();
        match cleanup {
            Some(cleanup) => {
                cleanup();
                tracing::debug!("scroll tracker disposed");
                true
            }
            None => false,
        }
    }
}

impl Drop for ScrollTracker {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ScrollSource, ScrollTracker) {
        let source = ScrollSource::new();
        let tracker = ScrollTracker::subscribe(&source, ScrollConfig::default());
        (source, tracker)
    }

    #[test]
    fn test_threshold_boundary() {
        let (source, tracker) = setup();
        assert!(!tracker.state().past_threshold);

        source.dispatch(20.0);
        assert!(!tracker.state().past_threshold);

        source.dispatch(21.0);
        assert!(tracker.state().past_threshold);

        source.dispatch(0.0);
        assert!(!tracker.state().past_threshold);
    }

    #[test]
    fn test_offset_clamps_to_max() {
        let (source, tracker) = setup();

        source.dispatch(250.0);
        assert_eq!(tracker.state().offset, 250.0);

        source.dispatch(1_000_000.0);
        assert_eq!(tracker.state().offset, 1000.0);

        source.dispatch(f64::INFINITY);
        assert_eq!(tracker.state().offset, 1000.0);
    }

    #[test]
    fn test_negative_and_nan_positions_are_top() {
        let (source, tracker) = setup();

        source.dispatch(-40.0);
        assert_eq!(tracker.state(), ScrollState::default());

        source.dispatch(f64::NAN);
        assert_eq!(tracker.state(), ScrollState::default());
    }

    #[test]
    fn test_recompute_is_pure() {
        let config = ScrollConfig::default();
        let a = compute_scroll_state(333.0, &config);
        let b = compute_scroll_state(333.0, &config);
        assert_eq!(a, b);

        // Same final position through different paths yields the same state.
        let (source, tracker) = setup();
        source.dispatch(900.0);
        source.dispatch(10.0);
        source.dispatch(333.0);
        assert_eq!(tracker.state(), a);
    }

    #[test]
    fn test_parallax_mappings() {
        let (source, tracker) = setup();
        assert_eq!(tracker.hero_opacity(), 1.0);
        assert_eq!(tracker.hero_translate(), 0.0);

        source.dispatch(250.0);
        assert!((tracker.hero_opacity() - 0.5).abs() < 1e-9);
        assert!((tracker.hero_translate() - 75.0).abs() < 1e-9);

        source.dispatch(5000.0);
        assert_eq!(tracker.hero_opacity(), 0.0);
        assert_eq!(tracker.hero_translate(), 300.0);
    }

    #[test]
    fn test_samples_position_at_subscribe() {
        let source = ScrollSource::new();
        source.dispatch(120.0);

        let tracker = ScrollTracker::subscribe(&source, ScrollConfig::default());
        assert!(tracker.state().past_threshold);
        assert_eq!(tracker.state().offset, 120.0);
    }

    #[test]
    fn test_dispose_releases_listener_once() {
        let (source, tracker) = setup();
        assert_eq!(source.listener_count(), 1);

        assert!(tracker.dispose());
        assert_eq!(source.listener_count(), 0);
        assert!(!tracker.is_subscribed());

        // Second call is a no-op
        assert!(!tracker.dispose());
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_no_updates_after_dispose() {
        let (source, tracker) = setup();
        source.dispatch(50.0);
        tracker.dispose();

        source.dispatch(800.0);
        assert_eq!(tracker.state().offset, 50.0);
    }

    #[test]
    fn test_drop_releases_listener() {
        let source = ScrollSource::new();
        {
            let _tracker = ScrollTracker::subscribe(&source, ScrollConfig::default());
            assert_eq!(source.listener_count(), 1);
        }
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_dispose_after_source_dropped() {
        let source = ScrollSource::new();
        let tracker = ScrollTracker::subscribe(&source, ScrollConfig::default());
        drop(source);

        assert!(tracker.dispose());
    }

    #[test]
    fn test_map_range_degenerate() {
        assert_eq!(map_range(5.0, 10.0, 10.0, 0.0, 1.0), 0.0);
        assert_eq!(map_range(10.0, 10.0, 10.0, 0.0, 1.0), 1.0);
    }
}

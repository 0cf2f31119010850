//! Mount API - page lifecycle and snapshot effect.
//!
//! [`PageView::mount`] starts every producer against a host scheduler and
//! scroll source. The renderer either polls [`PageView::snapshot`] after each
//! event or registers an effect with [`PageView::on_change`] that re-runs
//! whenever any producer writes.
//!
//! # Example
//!
//! ```ignore
//! let view = PageView::mount(&config, &ICADC_2026, &scheduler, &source);
//!
//! view.on_change(|snapshot| paint(snapshot));
//! source.dispatch(640.0);
//! scheduler.run_due();
//!
//! view.unmount();
//! ```

use std::cell::{Cell, RefCell};

use serde::Serialize;
use spark_signals::{effect, Signal};

use crate::catalog::{ContentCatalog, Track};
use crate::config::{ScrollConfig, SiteConfig};
use crate::state::scroll::{hero_opacity, hero_translate};
use crate::state::{CountdownClock, Scheduler, ScrollSource, ScrollTracker, SearchBox, TransientUi};
use crate::state::search::tracks_matching;
use crate::types::{CountdownPhase, CountdownState, ScrollState, UiFlags};

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the renderer reads, as plain values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub scroll: ScrollState,
    pub hero_opacity: f64,
    pub hero_translate: f64,
    pub countdown: CountdownState,
    pub countdown_phase: CountdownPhase,
    pub query: String,
    pub tracks: Vec<Track>,
    pub flags: UiFlags,
    pub toast_message: Option<String>,
}

/// Signal handles read by a snapshot. Cloned into effects.
#[derive(Clone)]
struct SnapshotSources {
    catalog: &'static ContentCatalog,
    scroll_config: ScrollConfig,
    scroll: Signal<ScrollState>,
    countdown: Signal<CountdownState>,
    phase: Signal<CountdownPhase>,
    query: Signal<String>,
    menu: Signal<bool>,
    modal: Signal<bool>,
    toast_visible: Signal<bool>,
    toast_message: Signal<Option<String>>,
}

impl SnapshotSources {
    fn read(&self) -> ViewSnapshot {
        let scroll = self.scroll.get();
        let query = self.query.get();
        let tracks = tracks_matching(self.catalog, &query);
        let flags = UiFlags::from_parts(
            self.menu.get(),
            self.modal.get(),
            self.toast_visible.get(),
        );

        ViewSnapshot {
            scroll,
            hero_opacity: hero_opacity(&scroll, &self.scroll_config),
            hero_translate: hero_translate(&scroll, &self.scroll_config),
            countdown: self.countdown.get(),
            countdown_phase: self.phase.get(),
            query,
            tracks,
            flags,
            toast_message: self.toast_message.get(),
        }
    }
}

// =============================================================================
// Page View
// =============================================================================

/// A mounted page: every producer plus its render effects.
///
/// Dropping the view releases everything, same as [`PageView::unmount`].
pub struct PageView {
    pub scroll: ScrollTracker,
    pub countdown: CountdownClock,
    pub search: SearchBox,
    pub ui: TransientUi,
    catalog: &'static ContentCatalog,
    sources: SnapshotSources,
    effects: RefCell<Vec<Box<dyn FnOnce()>>>,
    mounted: Cell<bool>,
}

impl PageView {
    /// Start all producers.
    ///
    /// Scroll samples the source's current position and countdown computes
    /// its first value before this returns, so the first snapshot is complete.
    pub fn mount(
        config: &SiteConfig,
        catalog: &'static ContentCatalog,
        scheduler: &Scheduler,
        source: &ScrollSource,
    ) -> Self {
        let scroll = ScrollTracker::subscribe(source, config.scroll);
        let countdown = CountdownClock::start(scheduler, config.countdown_target, config.tick());
        let search = SearchBox::new(catalog);
        let ui = TransientUi::new(scheduler, config.toast_duration());

        let sources = SnapshotSources {
            catalog,
            scroll_config: config.scroll,
            scroll: scroll.signal(),
            countdown: countdown.signal(),
            phase: countdown.phase_signal(),
            query: search.query_signal(),
            menu: ui.menu.signal(),
            modal: ui.modal.signal(),
            toast_visible: ui.toast.visible_signal(),
            toast_message: ui.toast.message_signal(),
        };

        tracing::info!(
            target_at = %config.countdown_target,
            phase = ?countdown.phase(),
            "page mounted"
        );

        Self {
            scroll,
            countdown,
            search,
            ui,
            catalog,
            sources,
            effects: RefCell::new(Vec::new()),
            mounted: Cell::new(true),
        }
    }

    pub fn catalog(&self) -> &'static ContentCatalog {
        self.catalog
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Current view state.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.sources.read()
    }

    /// Run `render` now and again whenever any producer writes.
    ///
    /// The effect is stopped on unmount. Does nothing once unmounted.
    pub fn on_change<F>(&self, mut render: F)
    where
        F: FnMut(&ViewSnapshot) + 'static,
    {
        if !self.is_mounted() {
            return;
        }
        let sources = self.sources.clone();
        let stop = effect(move || {
            let snapshot = sources.read();
            render(&snapshot);
        });
        self.effects.borrow_mut().push(Box::new(stop));
    }

    /// Release every subscription and timer.
    ///
    /// Returns `true` the first time; later calls do nothing.
    pub fn unmount(&self) -> bool {
        if !self.mounted.replace(false) {
            return false;
        }

        let effects: Vec<Box<dyn FnOnce()>> = self.effects.borrow_mut().drain(..).collect();
        for stop in effects {
            stop();
        }

        self.scroll.dispose();
        self.countdown.stop();
        self.ui.dispose();

        tracing::info!("page unmounted");
        true
    }
}

impl Drop for PageView {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// Tests
// =============================================================================

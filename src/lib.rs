//! # icadc-view
//!
//! Reactive view-state engine for the ICADC 2026 conference page.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Four independent producers each own one slice of view state and write it
//! into signals. A renderer only reads:
//! ```text
//! ScrollSource ─→ ScrollTracker ─┐
//! Scheduler ────→ CountdownClock ├─→ PageView::snapshot / on_change effect
//! query input ──→ SearchBox ─────┤
//! clicks/timer ─→ TransientUi ───┘
//! ```
//!
//! Time only enters through a [`Scheduler`]. Tests drive it with
//! [`VirtualTime`]; the binary drives it with the system clock.
//!
//! ## Modules
//!
//! - [`types`] - Plain state values (ScrollState, CountdownState, UiFlags, Section)
//! - [`catalog`] - Static conference content and the `Searchable` seam
//! - [`config`] - Site constants, TOML and env layering
//! - [`state`] - The producers and the scheduler
//! - [`pipeline`] - Input routing, mounting and snapshots

pub mod catalog;
pub mod config;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use catalog::{
    CareerRole, ContentCatalog, Deadline, DeadlineStatus, Searchable, Track, Workshop, ICADC_2026,
};

pub use config::{ConfigError, ScrollConfig, SiteConfig};

pub use pipeline::{
    parse_line, route_event, InputError, InputEvent, PageView, Routed, ViewSnapshot,
};

pub use state::{
    // Scheduling
    Clock, ManualClock, Scheduler, SystemClock, TimerId, VirtualTime,
    // Scroll
    compute_scroll_state, ScrollSource, ScrollTracker,
    // Countdown
    CountdownClock,
    // Search
    filter, SearchBox,
    // Transient UI
    ClickTarget, MenuToggle, ModalToggle, Toast, TransientUi,
};

//! State Module - the page's reactive producers
//!
//! Each producer owns its state and its teardown:
//!
//! - **Scheduler** - Deadline queue, clocks, virtual time
//! - **Scroll** - Scroll source registry, threshold and parallax offset
//! - **Countdown** - Ticking remaining-time state machine
//! - **Search** - Query-driven catalog projection
//! - **Transient** - Menu, modal click bubbling, auto-dismissing toast

pub mod countdown;
pub mod scheduler;
pub mod scroll;
pub mod search;
pub mod transient;

pub use countdown::CountdownClock;
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock, TimerId, VirtualTime};
pub use scroll::{
    compute_scroll_state, hero_opacity, hero_translate, map_range, ScrollHandler, ScrollSource,
    ScrollTracker,
};
pub use search::{filter, is_blank, matches, tracks_matching, SearchBox};
pub use transient::{ClickTarget, MenuToggle, ModalToggle, Toast, TransientUi};

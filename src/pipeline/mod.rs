//! Page Pipeline
//!
//! Connects host input to the producers and the producers to the renderer.
//!
//! # Pipeline Architecture
//!
//! ```text
//! stdin line → parse_line → route_event → producer signals → snapshot effect
//!                                              ↑
//!                              Scheduler::run_due (timers)
//! ```
//!
//! ## Data Flow
//!
//! 1. **input** - Parses one command line and routes it to its owner
//! 2. **producers** - Write their own signals (scroll, countdown, search, toggles)
//! 3. **mount** - Reads every signal into a [`ViewSnapshot`] inside an effect

pub mod input;
pub mod mount;

// Re-exports
pub use input::{parse_line, route_event, InputError, InputEvent, Routed};
pub use mount::{PageView, ViewSnapshot};

//! Core types shared by the producers and the renderer.
//!
//! Everything here is a plain value: cheap to clone, comparable, and safe to
//! store in a `Signal`. Producers write these, the renderer only reads them.

use serde::Serialize;

// =============================================================================
// Scroll
// =============================================================================

/// Derived scroll state.
///
/// A pure function of the latest raw scroll position: recomputing from the
/// same position always yields the same value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollState {
    /// `true` once the page has scrolled past the navbar threshold.
    pub past_threshold: bool,
    /// Raw position clamped into `[0, max_offset]`.
    pub offset: f64,
}

// =============================================================================
// Countdown
// =============================================================================

/// Remaining time until the countdown target, split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CountdownState {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownState {
    /// The terminal all-zero value.
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Split a millisecond difference into units.
    ///
    /// Differences at or below zero produce [`CountdownState::ZERO`].
    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Self::ZERO;
        }
        let diff = diff_ms as u64;
        Self {
            days: diff / 86_400_000,
            hours: (diff / 3_600_000) % 24,
            minutes: (diff / 60_000) % 60,
            seconds: (diff / 1_000) % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Countdown lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CountdownPhase {
    /// Constructed, first value not yet computed.
    #[default]
    Initializing,
    /// Repeating timer is live.
    Ticking,
    /// Target reached. Terminal; the timer has been cancelled.
    Expired,
    /// Torn down before expiring.
    Stopped,
}

// =============================================================================
// UI Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Snapshot of the transient UI toggles.
    ///
    /// Each flag is owned by an independent toggle; combining them here is
    /// only for the renderer's convenience.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct UiFlags: u8 {
        const NONE = 0;
        const MENU_OPEN = 1 << 0;
        const MODAL_OPEN = 1 << 1;
        const TOAST_VISIBLE = 1 << 2;
    }
}

impl UiFlags {
    /// Combine the three toggle states.
    pub fn from_parts(menu_open: bool, modal_open: bool, toast_visible: bool) -> Self {
        let mut flags = UiFlags::NONE;
        flags.set(UiFlags::MENU_OPEN, menu_open);
        flags.set(UiFlags::MODAL_OPEN, modal_open);
        flags.set(UiFlags::TOAST_VISIBLE, toast_visible);
        flags
    }
}

impl Serialize for UiFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Page sections reachable from the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    Overview,
    Tracks,
    Dates,
    Workshops,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::Tracks,
        Section::Dates,
        Section::Workshops,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Tracks => "Tracks",
            Section::Dates => "Dates",
            Section::Workshops => "Workshops",
        }
    }

    /// In-page anchor for this section.
    pub fn anchor(self) -> &'static str {
        match self {
            Section::Overview => "#overview",
            Section::Tracks => "#tracks",
            Section::Dates => "#dates",
            Section::Workshops => "#workshops",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label.trim()))
    }
}

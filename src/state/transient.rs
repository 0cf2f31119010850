//! Transient UI State - menu, modal and toast toggles.
//!
//! The three toggles are independent: opening one never touches another.
//! Only the toast owns a timer.

use std::cell::Cell;
use std::rc::Rc;

use chrono::Duration;
use spark_signals::{batch, signal, Signal};

use crate::types::{Section, UiFlags};
use super::scheduler::{Scheduler, TimerId};

// =============================================================================
// MENU
// =============================================================================

/// Mobile navigation menu.
pub struct MenuToggle {
    open: Signal<bool>,
}

impl Default for MenuToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuToggle {
    pub fn new() -> Self {
        Self { open: signal(false) }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn open(&self) {
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
    }

    pub fn toggle(&self) {
        self.open.set(!self.open.get());
    }

    /// Follow a menu link: closes the menu and returns the section anchor.
    pub fn navigate(&self, section: Section) -> &'static str {
        self.close();
        tracing::debug!(section = section.label(), "menu navigate");
        section.anchor()
    }

    pub fn signal(&self) -> Signal<bool> {
        self.open.clone()
    }
}

// =============================================================================
// MODAL
// =============================================================================

/// Where a click landed inside the modal overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The close control, nested inside the content panel.
    CloseButton,
    /// Anywhere in the content panel.
    Content,
    /// The dimmed area around the panel.
    Backdrop,
}

impl ClickTarget {
    /// Layers a click passes through, innermost first.
    pub fn bubble_path(self) -> &'static [ClickTarget] {
        match self {
            ClickTarget::CloseButton => &[
                ClickTarget::CloseButton,
                ClickTarget::Content,
                ClickTarget::Backdrop,
            ],
            ClickTarget::Content => &[ClickTarget::Content, ClickTarget::Backdrop],
            ClickTarget::Backdrop => &[ClickTarget::Backdrop],
        }
    }
}

/// Registration modal.
pub struct ModalToggle {
    open: Signal<bool>,
}

impl Default for ModalToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalToggle {
    pub fn new() -> Self {
        Self { open: signal(false) }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn open(&self) {
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
    }

    pub fn signal(&self) -> Signal<bool> {
        self.open.clone()
    }

    /// Handler for one layer. Returns true if the click was consumed.
    fn handle_layer(&self, layer: ClickTarget) -> bool {
        match layer {
            ClickTarget::CloseButton | ClickTarget::Backdrop => {
                self.close();
                true
            }
            // Stops propagation so the backdrop never sees it
            ClickTarget::Content => true,
        }
    }

    /// Bubble a click from `target` outward.
    ///
    /// Returns true if a layer consumed it. Clicks while closed are ignored.
    pub fn dispatch_click(&self, target: ClickTarget) -> bool {
        if !self.is_open() {
            return false;
        }
        for &layer in target.bubble_path() {
            if self.handle_layer(layer) {
                tracing::trace!(?target, ?layer, open = self.is_open(), "modal click consumed");
                return true;
            }
        }
        false
    }
}

// =============================================================================
// TOAST
// =============================================================================

/// Auto-dismissing notification.
///
/// At most one dismissal is pending. Showing again replaces it, so the
/// visible period is always measured from the latest `show`.
pub struct Toast {
    scheduler: Scheduler,
    duration: Duration,
    visible: Signal<bool>,
    message: Signal<Option<String>>,
    pending: Rc<Cell<Option<TimerId>>>,
    auto_dismissals: Rc<Cell<u64>>,
}

impl Toast {
    pub fn new(scheduler: &Scheduler, duration: Duration) -> Self {
        Self {
            scheduler: scheduler.clone(),
            duration,
            visible: signal(false),
            message: signal(None),
            pending: Rc::new(Cell::new(None)),
            auto_dismissals: Rc::new(Cell::new(0)),
        }
    }

    fn cancel_pending(&self) -> bool {
        match self.pending.take() {
            Some(id) => {
                let cancelled = self.scheduler.clear(id);
                if cancelled {
                    tracing::trace!(?id, "toast dismissal cancelled");
                }
                cancelled
            }
            None => false,
        }
    }

    /// Show `message` and schedule its dismissal.
    pub fn show(&self, message: impl Into<String>) {
        self.cancel_pending();

        let message = message.into();
        batch(|| {
            self.message.set(Some(message));
            self.visible.set(true);
        });

        let visible = self.visible.clone();
        let text = self.message.clone();
        let pending = self.pending.clone();
        let count = self.auto_dismissals.clone();
        let id = self.scheduler.set_timeout(self.duration, move || {
            pending.set(None);
            batch(|| {
                visible.set(false);
                text.set(None);
            });
            count.set(count.get() + 1);
            tracing::debug!("toast auto-dismissed");
        });
        self.pending.set(Some(id));
        tracing::debug!(?id, duration_ms = self.duration.num_milliseconds(), "toast scheduled");
    }

    /// Hide immediately and drop any pending dismissal.
    pub fn dismiss(&self) {
        self.cancel_pending();
        batch(|| {
            self.visible.set(false);
            self.message.set(None);
        });
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn message(&self) -> Option<String> {
        self.message.get()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// How many times the timer has hidden the toast.
    pub fn auto_dismissals(&self) -> u64 {
        self.auto_dismissals.get()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn visible_signal(&self) -> Signal<bool> {
        self.visible.clone()
    }

    pub fn message_signal(&self) -> Signal<Option<String>> {
        self.message.clone()
    }
}

impl Drop for Toast {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

// =============================================================================
// COMBINED
// =============================================================================

/// The page's transient toggles, owned together for mounting.
pub struct TransientUi {
    pub menu: MenuToggle,
    pub modal: ModalToggle,
    pub toast: Toast,
}

impl TransientUi {
    pub fn new(scheduler: &Scheduler, toast_duration: Duration) -> Self {
        Self {
            menu: MenuToggle::new(),
            modal: ModalToggle::new(),
            toast: Toast::new(scheduler, toast_duration),
        }
    }

    pub fn flags(&self) -> UiFlags {
        UiFlags::from_parts(
            self.menu.is_open(),
            self.modal.is_open(),
            self.toast.is_visible(),
        )
    }

    /// Cancel the toast timer. Menu and modal hold no resources.
    pub fn dispose(&self) {
        self.toast.cancel_pending();
    }
}

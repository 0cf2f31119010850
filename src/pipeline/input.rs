//! Input Module - line commands and routing
//!
//! The headless host feeds the page one text command per line. Each line is
//! parsed into an [`InputEvent`] and routed to the producer that owns it.
//!
//! | line | event |
//! |---|---|
//! | `scroll 640` | raw scroll position |
//! | `search quantum` | replace the query (`search` alone clears it) |
//! | `menu` | toggle the mobile menu |
//! | `nav tracks` | follow a menu link |
//! | `modal` | open the registration modal |
//! | `click content` / `click backdrop` / `click close` | modal click |
//! | `toast Saved!` | show a toast |
//! | `dismiss` | hide the toast |
//! | `quit` | stop the host loop |
//!
//! # Example
//!
//! ```ignore
//! let event = parse_line("scroll 640")?;
//! route_event(&view, &source, event);
//! ```

use std::str::FromStr;

use thiserror::Error;

use crate::state::{ClickTarget, ScrollSource};
use crate::types::Section;
use super::mount::PageView;

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// One discrete input from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Scroll(f64),
    Search(String),
    ToggleMenu,
    Navigate(Section),
    OpenModal,
    Click(ClickTarget),
    Toast(String),
    Dismiss,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' needs an argument")]
    MissingArgument { command: &'static str },

    #[error("invalid scroll position '{0}'")]
    InvalidPosition(String),

    #[error("unknown section '{0}' (expected overview, tracks, dates or workshops)")]
    UnknownSection(String),

    #[error("unknown click target '{0}' (expected content, backdrop or close)")]
    UnknownTarget(String),
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_click_target(raw: &str) -> Result<ClickTarget, InputError> {
    match raw.to_ascii_lowercase().as_str() {
        "content" => Ok(ClickTarget::Content),
        "backdrop" => Ok(ClickTarget::Backdrop),
        "close" => Ok(ClickTarget::CloseButton),
        _ => Err(InputError::UnknownTarget(raw.to_string())),
    }
}

/// Parse one command line.
///
/// The keyword is case-insensitive. Text arguments (`search`, `toast`) are
/// taken verbatim after the first space.
pub fn parse_line(line: &str) -> Result<InputEvent, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Err(InputError::Empty);
    }

    let (keyword, rest) = match trimmed.split_once(' ') {
        Some((keyword, rest)) => (keyword, rest),
        None => (trimmed, ""),
    };
    let arg = rest.trim();

    match keyword.to_ascii_lowercase().as_str() {
        "scroll" => {
            if arg.is_empty() {
                return Err(InputError::MissingArgument { command: "scroll" });
            }
            arg.parse::<f64>()
                .map(InputEvent::Scroll)
                .map_err(|_| InputError::InvalidPosition(arg.to_string()))
        }
        "search" => Ok(InputEvent::Search(rest.to_string())),
        "menu" => Ok(InputEvent::ToggleMenu),
        "nav" => {
            if arg.is_empty() {
                return Err(InputError::MissingArgument { command: "nav" });
            }
            Section::from_label(arg)
                .map(InputEvent::Navigate)
                .ok_or_else(|| InputError::UnknownSection(arg.to_string()))
        }
        "modal" => Ok(InputEvent::OpenModal),
        "click" => {
            if arg.is_empty() {
                return Err(InputError::MissingArgument { command: "click" });
            }
            parse_click_target(arg).map(InputEvent::Click)
        }
        "toast" => {
            if arg.is_empty() {
                return Err(InputError::MissingArgument { command: "toast" });
            }
            Ok(InputEvent::Toast(rest.to_string()))
        }
        "dismiss" => Ok(InputEvent::Dismiss),
        "quit" | "exit" => Ok(InputEvent::Quit),
        other => Err(InputError::UnknownCommand(other.to_string())),
    }
}

impl FromStr for InputEvent {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// What routing an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// A producer handled the event.
    Handled,
    /// The event had no effect (e.g. a click while the modal is closed).
    Ignored,
    /// A menu link was followed; carries the section anchor.
    Navigated(&'static str),
    /// The host should stop.
    Quit,
}

/// Route an event to the producer that owns it.
pub fn route_event(view: &PageView, source: &ScrollSource, event: InputEvent) -> Routed {
    match event {
        InputEvent::Scroll(y) => {
            source.dispatch(y);
            Routed::Handled
        }
        InputEvent::Search(query) => {
            view.search.set_query(query);
            Routed::Handled
        }
        InputEvent::ToggleMenu => {
            view.ui.menu.toggle();
            Routed::Handled
        }
        InputEvent::Navigate(section) => Routed::Navigated(view.ui.menu.navigate(section)),
        InputEvent::OpenModal => {
            view.ui.modal.open();
            Routed::Handled
        }
        InputEvent::Click(target) => {
            if view.ui.modal.dispatch_click(target) {
                Routed::Handled
            } else {
                Routed::Ignored
            }
        }
        InputEvent::Toast(message) => {
            view.ui.toast.show(message);
            Routed::Handled
        }
        InputEvent::Dismiss => {
            view.ui.toast.dismiss();
            Routed::Handled
        }
        InputEvent::Quit => Routed::Quit,
    }
}

// =============================================================================
// TESTS
// =============================================================================

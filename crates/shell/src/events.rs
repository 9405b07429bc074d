//! Events delivered to the shell on the UI thread.

use std::sync::mpsc::Sender;

use embed::{Browser, BrowserId, DisplayHandler, FocusHandler, Frame};
use tracing::trace;
use ui::ToolkitEvent;

/// A notification for the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellEvent {
    /// The browser navigated a frame.
    AddressChanged {
        browser: BrowserId,
        frame: Frame,
        url: String,
    },
    /// The browser received keyboard focus.
    BrowserGotFocus(BrowserId),
    /// The browser is handing focus back.
    BrowserTakeFocus { browser: BrowserId, next: bool },
    /// The window toolkit raised a notification.
    Toolkit(ToolkitEvent),
    /// The user asked to close the window.
    WindowClosing,
}

/// Forwards browser notifications to the shell's event queue.
///
/// The engine may call handlers from any thread; forwarding keeps every
/// state change on the UI thread.
pub(crate) struct EventForwarder {
    tx: Sender<ShellEvent>,
}

impl EventForwarder {
    pub(crate) fn new(tx: Sender<ShellEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: ShellEvent) {
        if self.tx.send(event).is_err() {
            trace!("Shell gone, dropping browser notification");
        }
    }
}

impl DisplayHandler for EventForwarder {
    fn on_address_change(&self, browser: &dyn Browser, frame: &Frame, url: &str) {
        self.send(ShellEvent::AddressChanged {
            browser: browser.id(),
            frame: frame.clone(),
            url: url.to_string(),
        });
    }
}

impl FocusHandler for EventForwarder {
    fn on_got_focus(&self, browser: &dyn Browser) {
        self.send(ShellEvent::BrowserGotFocus(browser.id()));
    }

    fn on_take_focus(&self, browser: &dyn Browser, next: bool) {
        self.send(ShellEvent::BrowserTakeFocus {
            browser: browser.id(),
            next,
        });
    }
}

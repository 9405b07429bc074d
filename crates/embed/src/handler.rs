//! Notification handlers attached to a client.
//!
//! Every method has an empty default so implementors only override the
//! notifications they care about. The library may invoke handlers from its
//! own threads.

use crate::browser::{Browser, Frame};

/// Display-related notifications.
pub trait DisplayHandler: Send + Sync {
    /// The address of a frame changed.
    fn on_address_change(&self, _browser: &dyn Browser, _frame: &Frame, _url: &str) {}
}

/// Focus-related notifications.
pub trait FocusHandler: Send + Sync {
    /// The browser received keyboard focus.
    fn on_got_focus(&self, _browser: &dyn Browser) {}

    /// The browser is giving up focus, e.g. when tabbing out of the last
    /// element. `next` is true when moving forward.
    fn on_take_focus(&self, _browser: &dyn Browser, _next: bool) {}
}

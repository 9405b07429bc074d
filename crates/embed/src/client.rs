//! Clients group browsers and carry their handlers.

use std::sync::Arc;

use common::ShellResult;

use crate::browser::Browser;
use crate::handler::{DisplayHandler, FocusHandler};

/// Configuration of a JavaScript-to-host message router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRouterConfig {
    /// Name of the query function injected into pages.
    pub js_query_function: String,
    /// Name of the cancel function injected into pages.
    pub js_cancel_function: String,
}

impl Default for MessageRouterConfig {
    fn default() -> Self {
        Self {
            js_query_function: "cefQuery".to_string(),
            js_cancel_function: "cefQueryCancel".to_string(),
        }
    }
}

/// Connector between the host and the browsers it owns.
///
/// Handlers added after a browser was created still receive that
/// browser's notifications.
pub trait Client: Send {
    fn add_message_router(&mut self, config: MessageRouterConfig);

    fn add_display_handler(&mut self, handler: Box<dyn DisplayHandler>);

    fn add_focus_handler(&mut self, handler: Box<dyn FocusHandler>);

    /// Create a browser showing `url`.
    fn create_browser(
        &mut self,
        url: &str,
        offscreen: bool,
        transparent: bool,
    ) -> ShellResult<Arc<dyn Browser>>;
}

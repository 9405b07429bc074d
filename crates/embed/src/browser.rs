//! Browser instances and the surface they render into.

/// Browser identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BrowserId(pub u64);

/// A frame inside a browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame identifier.
    pub id: i64,
    /// Frame name, empty for unnamed frames.
    pub name: String,
    /// Whether this is the top-level frame.
    pub is_main: bool,
}

impl Frame {
    /// The top-level frame.
    pub fn main() -> Self {
        Self {
            id: 0,
            name: String::new(),
            is_main: true,
        }
    }
}

/// Toolkit-embeddable view through which a browser renders its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiSurface {
    /// Owning browser.
    pub browser: BrowserId,
    /// Rendered off-screen and composited by the host.
    pub offscreen: bool,
    /// Rendered with a transparent background.
    pub transparent: bool,
}

/// Keyboard input forwarded to a browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserKey {
    Char(char),
    Enter,
    Backspace,
    Tab { shift: bool },
}

/// A browser instance.
pub trait Browser: Send + Sync {
    fn id(&self) -> BrowserId;

    /// The view to place in the host window.
    fn ui_surface(&self) -> UiSurface;

    /// URL of the main frame.
    fn url(&self) -> String;

    /// Navigate the main frame.
    fn load_url(&self, url: &str);

    /// Give or remove keyboard focus.
    fn set_focus(&self, focus: bool);

    fn has_focus(&self) -> bool;

    /// Deliver a key press to the focused element.
    fn send_key_event(&self, key: BrowserKey);
}

//! Top-level shell window.

use std::collections::VecDeque;
use std::sync::Arc;

use common::Size;
use embed::Browser;
use tracing::{debug, info, trace};

use crate::layout::{BorderLayout, Component, Slot, Widget};

/// Notification raised by the window toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolkitEvent {
    /// A widget became the global focus owner.
    FocusGained(Widget),
}

/// Shell window.
pub struct ShellWindow {
    /// Window title.
    title: String,
    /// Window dimensions.
    dimensions: WindowDimensions,
    /// Content layout.
    layout: BorderLayout,
    /// Toolkit-wide focus owner.
    focus_owner: Option<Widget>,
    /// Pending toolkit notifications.
    events: VecDeque<ToolkitEvent>,
    /// Native browser hosted by the browser surface.
    native_view: Option<Arc<dyn Browser>>,
    /// Is visible.
    visible: bool,
    /// Is disposed.
    disposed: bool,
}

impl ShellWindow {
    /// Create a new hidden window.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            dimensions: WindowDimensions::default(),
            layout: BorderLayout::new(),
            focus_owner: None,
            events: VecDeque::new(),
            native_view: None,
            visible: false,
            disposed: false,
        }
    }

    /// Get the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the content layout.
    pub fn layout(&self) -> &BorderLayout {
        &self.layout
    }

    /// Attach a component to the content layout.
    pub fn add(&mut self, component: Component, slot: Slot) {
        trace!(?component, ?slot, "Component added");
        self.layout.add(component, slot);
    }

    /// Host `browser` as the native view behind the browser surface.
    ///
    /// The view loses native focus whenever another widget takes focus.
    pub fn attach_native_view(&mut self, browser: Arc<dyn Browser>) {
        trace!(browser = browser.id().0, "Native view attached");
        self.native_view = Some(browser);
    }

    /// Size the window to the preferred size of its content.
    pub fn pack(&mut self) {
        let preferred = self.layout.preferred_size();
        self.dimensions.width = preferred.width.ceil() as u32;
        self.dimensions.height = preferred.height.ceil() as u32;
    }

    /// Get window dimensions.
    pub fn dimensions(&self) -> &WindowDimensions {
        &self.dimensions
    }

    /// Resize the window.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.dimensions.width = width;
        self.dimensions.height = height;
    }

    /// Content size in logical pixels.
    pub fn size(&self) -> Size {
        Size::new(self.dimensions.width as f32, self.dimensions.height as f32)
    }

    /// Make the window visible.
    pub fn show(&mut self) {
        if self.disposed {
            return;
        }
        self.visible = true;
        info!(
            width = self.dimensions.width,
            height = self.dimensions.height,
            "Window shown"
        );
    }

    /// Check if visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Release the window. It cannot be shown again.
    pub fn dispose(&mut self) {
        self.visible = false;
        self.disposed = true;
        self.focus_owner = None;
        self.events.clear();
        self.native_view = None;
        debug!("Window disposed");
    }

    /// Check if disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Get the toolkit-wide focus owner.
    pub fn focus_owner(&self) -> Option<Widget> {
        self.focus_owner
    }

    /// Clear the toolkit-wide focus owner.
    pub fn clear_global_focus_owner(&mut self) {
        trace!(previous = ?self.focus_owner, "Global focus owner cleared");
        self.focus_owner = None;
    }

    /// Give focus to `widget`.
    ///
    /// A change of owner queues a [`ToolkitEvent::FocusGained`].
    /// Returns false when the widget is not part of this window.
    pub fn request_focus(&mut self, widget: Widget) -> bool {
        if self.disposed || !self.layout.contains(widget) {
            return false;
        }
        if self.focus_owner != Some(widget) {
            if widget != Widget::BrowserView {
                self.blur_native_view();
            }
            self.focus_owner = Some(widget);
            self.events.push_back(ToolkitEvent::FocusGained(widget));
        }
        true
    }

    /// Move focus from `from` to its neighbour in traversal order.
    pub fn transfer_focus(&mut self, from: Widget, forward: bool) -> Option<Widget> {
        let order = self.layout.focus_order();
        let index = order.iter().position(|w| *w == from)?;
        let len = order.len();
        let next = if forward {
            order[(index + 1) % len]
        } else {
            order[(index + len - 1) % len]
        };
        self.request_focus(next).then_some(next)
    }

    fn blur_native_view(&self) {
        if let Some(view) = &self.native_view {
            if view.has_focus() {
                trace!(browser = view.id().0, "Native view lost focus");
                view.set_focus(false);
            }
        }
    }

    /// Take the next pending toolkit notification.
    pub fn poll_event(&mut self) -> Option<ToolkitEvent> {
        self.events.pop_front()
    }
}

/// Window dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowDimensions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}
